//! Sales-assistant module - greets visitors, hands out the lead form,
//! connects to a human agent, and renders the admin dashboard.

pub mod agents;
pub mod dashboard;
pub mod database;
pub mod engine;
pub mod keyboard;
pub mod templates;

pub use agents::Agent;
pub use database::{Counters, Database};
pub use engine::{Reply, SalesConfig, SalesEngine, Visitor};
