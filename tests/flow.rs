//! End-to-end flow through the sales engine: greet, capture a lead,
//! hand off to an agent, and read/reset the dashboard as an admin.

use chrono::Utc;
use teloxide::types::UserId;

use firstseller::salesbot::keyboard::{BTN_CONTACT, BTN_DASHBOARD, BTN_QUOTE, BTN_SERVICES};
use firstseller::salesbot::{Database, SalesConfig, SalesEngine, Visitor, agents};

const ADMIN: UserId = UserId(5932207916);
const FORM_LINK: &str = "https://docs.google.com/forms/d/e/example/viewform";

fn engine() -> SalesEngine {
    let config = SalesConfig {
        admin_ids: vec![ADMIN],
        form_link: FORM_LINK.to_string(),
        agents: agents::default_roster(),
    };
    SalesEngine::new(config, Database::new(), Utc::now())
}

fn visitor(id: u64, name: &str) -> Visitor {
    Visitor {
        user_id: UserId(id),
        username: Some(name.to_lowercase()),
        first_name: name.to_string(),
    }
}

#[test]
fn full_sales_flow() {
    let engine = engine();
    let alice = visitor(100, "Alice");

    // Greeting registers the user and counts them once.
    let reply = engine.dispatch(&alice, "/start");
    assert!(reply.text.contains("FirstSeller"));
    assert!(reply.keyboard.is_some());
    assert_eq!(engine.database().counters().users_served, 1);

    // Lead capture hands out the form link and counts one form.
    let reply = engine.dispatch(&alice, BTN_QUOTE);
    assert!(reply.text.contains(FORM_LINK));
    assert_eq!(engine.database().counters().forms_sent, 1);

    // Agent handoff names a roster member and counts one contact.
    let reply = engine.dispatch(&alice, BTN_CONTACT);
    let roster = agents::default_roster();
    assert!(roster.iter().any(|a| reply.text.contains(&a.name)));
    assert_eq!(engine.database().counters().contacts_requested, 1);

    // The services button replies without touching any counter.
    engine.dispatch(&alice, BTN_SERVICES);
    assert_eq!(engine.database().counters().total(), 3);

    // Alice's record tracked every interaction.
    let record = engine.database().get_user(100).expect("registered on /start");
    assert_eq!(record.message_count, 4);
    assert!(record.last_seen >= record.first_seen);
}

#[test]
fn dashboard_is_admin_only() {
    let engine = engine();
    let mallory = visitor(200, "Mallory");

    for text in ["/dashboard", BTN_DASHBOARD, "/zerartudo", "/testar"] {
        let reply = engine.dispatch(&mallory, text);
        assert!(
            reply.text.contains("restrito"),
            "{text} must be refused for non-admins"
        );
    }

    let admin = visitor(ADMIN.0, "Boss");
    let reply = engine.dispatch(&admin, "/dashboard");
    assert!(reply.text.contains("FIRSTSELLER DASHBOARD"));
}

#[test]
fn dashboard_renders_zero_state() {
    let engine = engine();
    let admin = visitor(ADMIN.0, "Boss");

    let reply = engine.dispatch(&admin, "/dashboard");
    assert!(reply.text.contains("▱▱▱▱▱▱▱▱▱▱ 0 (0%)"));
}

#[test]
fn reset_zeroes_all_counters() {
    let engine = engine();
    let alice = visitor(100, "Alice");
    let admin = visitor(ADMIN.0, "Boss");

    engine.dispatch(&alice, "/start");
    engine.dispatch(&alice, BTN_QUOTE);
    engine.dispatch(&alice, BTN_CONTACT);
    assert_eq!(engine.database().counters().total(), 3);

    engine.dispatch(&admin, "/zerartudo");
    let counters = engine.database().counters();
    assert_eq!(counters.users_served, 0);
    assert_eq!(counters.forms_sent, 0);
    assert_eq!(counters.contacts_requested, 0);

    // Counting resumes after a reset.
    engine.dispatch(&alice, "/start");
    assert_eq!(engine.database().counters().users_served, 1);
}

#[test]
fn repeated_start_counts_every_time_but_registers_once() {
    let engine = engine();
    let alice = visitor(100, "Alice");

    engine.dispatch(&alice, "/start");
    engine.dispatch(&alice, "/start");
    engine.dispatch(&alice, "/start");

    assert_eq!(engine.database().counters().users_served, 3);
    assert_eq!(engine.database().user_count(), 1);
}

#[test]
fn self_test_reports_store_state() {
    let engine = engine();
    let admin = visitor(ADMIN.0, "Boss");

    engine.dispatch(&visitor(100, "Alice"), "/start");
    engine.dispatch(&visitor(101, "Bob"), "/start");

    let reply = engine.dispatch(&admin, "/testar");
    assert!(reply.text.contains("Bot operacional"));
    assert!(reply.text.contains("2 cadastrados"));
}

#[test]
fn guide_is_open_to_everyone() {
    let engine = engine();
    let reply = engine.dispatch(&visitor(100, "Alice"), "/guia");
    assert!(reply.text.contains(BTN_QUOTE));
    assert!(reply.text.contains(BTN_CONTACT));
}
