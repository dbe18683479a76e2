//! Sales engine - routes exact button text and commands to handlers.
//!
//! No session state is kept across turns: every inbound text maps to at
//! most one reply through a flat dispatch table, with a single
//! admin/non-admin fork on the gated surfaces.

use chrono::{DateTime, Utc};
use teloxide::types::{KeyboardMarkup, UserId};
use tracing::info;

use crate::salesbot::agents::{self, Agent};
use crate::salesbot::dashboard;
use crate::salesbot::database::Database;
use crate::salesbot::keyboard::{self, BTN_CONTACT, BTN_DASHBOARD, BTN_QUOTE, BTN_SERVICES};
use crate::salesbot::templates;

/// Engine configuration, built from the file config at startup.
#[derive(Debug, Clone)]
pub struct SalesConfig {
    pub admin_ids: Vec<UserId>,
    pub form_link: String,
    pub agents: Vec<Agent>,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            admin_ids: Vec::new(),
            form_link: String::new(),
            agents: agents::default_roster(),
        }
    }
}

/// The sender of an inbound message.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub user_id: UserId,
    pub username: Option<String>,
    pub first_name: String,
}

/// An outbound reply: text, optionally with the main keyboard attached.
pub struct Reply {
    pub text: String,
    pub keyboard: Option<KeyboardMarkup>,
}

impl Reply {
    fn text(text: String) -> Self {
        Self { text, keyboard: None }
    }

    fn with_keyboard(text: String, keyboard: KeyboardMarkup) -> Self {
        Self { text, keyboard: Some(keyboard) }
    }
}

/// The sales engine.
pub struct SalesEngine {
    config: SalesConfig,
    database: Database,
    started_at: DateTime<Utc>,
}

impl SalesEngine {
    pub fn new(config: SalesConfig, database: Database, started_at: DateTime<Utc>) -> Self {
        Self { config, database, started_at }
    }

    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.config.admin_ids.contains(&user_id)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Route one inbound text to its handler and produce the reply.
    pub fn dispatch(&self, visitor: &Visitor, text: &str) -> Reply {
        let now = Utc::now();
        let trimmed = text.trim();

        match normalize_command(trimmed) {
            Some("start") => return self.greet(visitor, now),
            Some("dashboard") => return self.show_dashboard(visitor, now),
            Some("zerartudo") => return self.reset(visitor, now),
            Some("testar") => return self.self_test(visitor, now),
            Some("guia") => return self.guide(visitor, now),
            Some(_) => return self.fallback(visitor, now),
            None => {}
        }

        match trimmed {
            BTN_QUOTE => self.quote(visitor, now),
            BTN_CONTACT => self.contact(visitor, now),
            BTN_SERVICES => self.services(visitor, now),
            BTN_DASHBOARD => self.show_dashboard(visitor, now),
            _ => self.fallback(visitor, now),
        }
    }

    fn greet(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        info!("👋 /start from {} ({})", visitor.first_name, visitor.user_id);
        self.database.upsert_user(
            visitor.user_id.0 as i64,
            visitor.username.as_deref(),
            &visitor.first_name,
            &stamp(now),
        );
        self.database.add_user_served();

        Reply::with_keyboard(templates::welcome(), keyboard::main_keyboard(self.is_admin(visitor.user_id)))
    }

    fn quote(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        info!("📋 Form sent to {}", visitor.user_id);
        self.touch(visitor, now);
        self.database.add_form_sent();
        Reply::text(templates::form_invite(&self.config.form_link))
    }

    fn contact(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        self.database.add_contact_requested();

        match agents::pick(&self.config.agents) {
            Some(agent) => {
                info!("📞 Contact requested by {} -> {}", visitor.user_id, agent.name);
                Reply::text(templates::agent_card(agent))
            }
            None => Reply::text(templates::no_agent_available()),
        }
    }

    fn services(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        Reply::text(templates::services())
    }

    fn guide(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        Reply::text(templates::guide())
    }

    fn fallback(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        Reply::text(templates::fallback_hint())
    }

    fn show_dashboard(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        if !self.is_admin(visitor.user_id) {
            info!("🔒 Dashboard refused for {}", visitor.user_id);
            return Reply::text(templates::denied());
        }

        let counters = self.database.counters();
        let text = dashboard::render(&counters, self.database.user_count(), now - self.started_at);
        Reply::text(text)
    }

    fn reset(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        if !self.is_admin(visitor.user_id) {
            info!("🔒 Reset refused for {}", visitor.user_id);
            return Reply::text(templates::denied());
        }

        self.database.reset_counters();
        Reply::text(templates::reset_done())
    }

    fn self_test(&self, visitor: &Visitor, now: DateTime<Utc>) -> Reply {
        self.touch(visitor, now);
        if !self.is_admin(visitor.user_id) {
            return Reply::text(templates::denied());
        }

        let label = dashboard::uptime_label(now - self.started_at);
        Reply::text(templates::self_test(&label, self.database.user_count()))
    }

    fn touch(&self, visitor: &Visitor, now: DateTime<Utc>) {
        self.database.touch_user(visitor.user_id.0 as i64, &stamp(now));
    }
}

fn stamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M").to_string()
}

/// Extract the command name from "/cmd" or "/cmd@BotName" text.
/// Returns None for anything that is not a command.
fn normalize_command(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('/')?;
    let first = rest.split_whitespace().next().unwrap_or("");
    let name = first.split('@').next().unwrap_or("");
    if name.is_empty() { None } else { Some(name) }
}
