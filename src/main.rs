use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use firstseller::alerts::AdminAlertLayer;
use firstseller::config::Config;
use firstseller::salesbot::{Database, SalesConfig, SalesEngine, Visitor};

struct BotState {
    engine: SalesEngine,
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "firstseller.json".to_string());

    // Missing or invalid configuration is fatal at startup.
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("🔴 {e}");
            std::process::exit(1);
        }
    };

    let bot = Bot::new(&config.telegram_bot_token);

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("firstseller.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    let registry = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        );

    if let Some(alert_chat_id) = config.alert_chat_id {
        let alert_layer = AdminAlertLayer::new(bot.clone(), alert_chat_id);
        registry.with(alert_layer).init();
    } else {
        registry.init();
    }

    info!("🚀 Starting FirstSeller bot...");
    info!("Loaded config from {config_path}");
    info!("Admin IDs: {:?}", config.admin_ids);
    info!("Agent roster: {} agent(s)", config.agents.len());

    let database = Database::load_or_new(&config.data_dir.join("firstseller.db"));
    let sales_config = SalesConfig {
        admin_ids: config.admin_ids.clone(),
        form_link: config.form_link.clone(),
        agents: config.agents.clone(),
    };
    let state = Arc::new(BotState {
        engine: SalesEngine::new(sales_config, database, Utc::now()),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let user = match msg.from {
        Some(ref u) => u,
        None => return Ok(()),
    };
    if user.is_bot {
        return Ok(());
    }

    // Only text participates in dispatch; media and stickers are ignored.
    let text = match msg.text() {
        Some(t) => t,
        None => return Ok(()),
    };

    let visitor = Visitor {
        user_id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
    };

    let reply = state.engine.dispatch(&visitor, text);

    let mut request = bot
        .send_message(msg.chat.id, reply.text)
        .parse_mode(ParseMode::Markdown);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }

    if let Err(e) = request.await {
        warn!("Failed to send reply: {e}");
    }

    Ok(())
}
