// Library entry so integration tests can exercise the engine directly.
// The binary (`main.rs`) uses the same modules.

pub mod alerts;
pub mod config;
pub mod salesbot;
