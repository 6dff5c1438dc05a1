//! Headless dashboard service.
//!
//! Loads the document, answers board windows over the in-process bus,
//! persists changes and delivers deadline reminders. `--once` runs a single
//! deadline check, saves and exits.

use anyhow::Context;
use chrono::Utc;
use refboard::dashboard::Dashboard;
use refboard::reminders::DiscordWebhook;
use refboard::storage::JsonFileStorage;
use refboard::sync::EventBus;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refboard=info,warn"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().compact()).init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let run_once = std::env::args().skip(1).any(|arg| arg == "--once");

    let storage = JsonFileStorage::open_default().context("failed to resolve data directory")?;
    info!(dir = %storage.dir().display(), "using data directory");

    let bus = EventBus::new();
    let mut dashboard = Dashboard::open(storage, DiscordWebhook::new(), &bus).context("failed to load document")?;

    if run_once {
        let fired = dashboard.check_deadlines(Instant::now(), Utc::now());
        info!(fired, "deadline check complete");
        if dashboard.is_dirty() {
            dashboard.flush_save().context("failed to save document")?;
        }
        return Ok(());
    }

    loop {
        dashboard.pump_messages();
        dashboard.tick(Instant::now(), Utc::now());
        std::thread::sleep(POLL_INTERVAL);
    }
}
