//! Reply keyboard shown after /start. Button labels double as dispatch keys.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub const BTN_QUOTE: &str = "📋 Cotação";
pub const BTN_CONTACT: &str = "💬 Atendente";
pub const BTN_SERVICES: &str = "ℹ️ Serviços";
pub const BTN_DASHBOARD: &str = "📊 Dashboard";

/// Build the main keyboard. Admins get the extra Dashboard button,
/// laid out two buttons per row.
pub fn main_keyboard(is_admin: bool) -> KeyboardMarkup {
    let mut rows = vec![vec![
        KeyboardButton::new(BTN_QUOTE),
        KeyboardButton::new(BTN_CONTACT),
    ]];

    if is_admin {
        rows.push(vec![
            KeyboardButton::new(BTN_SERVICES),
            KeyboardButton::new(BTN_DASHBOARD),
        ]);
    } else {
        rows.push(vec![KeyboardButton::new(BTN_SERVICES)]);
    }

    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Total number of buttons on the keyboard (used by the self-test reply).
pub fn button_count(markup: &KeyboardMarkup) -> usize {
    markup.keyboard.iter().map(|row| row.len()).sum()
}
