//! Tracing layer that forwards WARN/ERROR events to the admin alert chat.

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Telegram caps messages at 4096 chars; leave headroom for the prefix.
const MAX_ALERT_LEN: usize = 4000;

pub struct AdminAlertLayer {
    tx: mpsc::UnboundedSender<String>,
}

impl AdminAlertLayer {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                let text = if text.chars().count() > MAX_ALERT_LEN {
                    let truncated: String = text.chars().take(MAX_ALERT_LEN).collect();
                    format!("{truncated}...")
                } else {
                    text
                };
                if let Err(e) = bot.send_message(chat_id, &text).await {
                    eprintln!("Failed to send alert to Telegram: {e}");
                }
            }
        });

        Self { tx }
    }
}

struct EventMessage {
    message: String,
}

impl Visit for EventMessage {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else if self.message.is_empty() {
            self.message = format!("{} = {:?}", field.name(), value);
        } else {
            self.message
                .push_str(&format!(", {} = {:?}", field.name(), value));
        }
    }
}

impl<S: Subscriber> Layer<S> for AdminAlertLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();

        // Only WARN and ERROR are worth an admin ping.
        if level > Level::WARN {
            return;
        }

        let mut visitor = EventMessage { message: String::new() };
        event.record(&mut visitor);

        let prefix = if level == Level::ERROR { "❌" } else { "⚠️" };
        if self.tx.send(format!("{prefix} {}", visitor.message)).is_err() {
            eprintln!("Alert channel closed, message dropped");
        }
    }
}
