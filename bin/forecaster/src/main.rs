use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, EngineCommand, Notifier, WatchlistConfig};
use engine::{Engine, FinazonClient, ForecastService, PayloadCache};
use notify::{start_bot, BotDeps, LogNotifier, TelegramNotifier};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"));
    let watchlist = match WatchlistConfig::load(&cfg.watchlist_path) {
        Ok(watchlist) => watchlist,
        Err(e) => {
            warn!(error = %e, "Using default watchlist");
            WatchlistConfig::default()
        }
    };
    let tickers = watchlist.tickers();
    info!(
        tickers = ?tickers,
        interval = %watchlist.interval,
        page_size = watchlist.page_size,
        "Forecaster starting"
    );

    // ── Market data + cache ───────────────────────────────────────────────────
    let source = FinazonClient::new(&cfg.finazon_api_key, &watchlist.interval, watchlist.page_size)
        .unwrap_or_else(|e| panic!("Failed to build market data client: {e}"));
    let cache = PayloadCache::new(&cfg.cache_dir);

    // ── Notifications ─────────────────────────────────────────────────────────
    let bot = cfg.telegram_token.clone().map(teloxide::Bot::new);
    let notifier: Arc<dyn Notifier> = match &bot {
        Some(bot) if cfg.telegram_enabled() => {
            info!(chats = cfg.telegram_chat_ids.len(), "Summaries go to Telegram");
            Arc::new(TelegramNotifier::new(bot.clone(), &cfg.telegram_chat_ids))
        }
        _ => {
            info!("Telegram not configured, summaries go to the log");
            Arc::new(LogNotifier)
        }
    };

    // ── Service + scheduler ───────────────────────────────────────────────────
    let service = Arc::new(ForecastService::new(
        Arc::new(source),
        cache,
        notifier,
        tickers.clone(),
    ));
    let (engine, engine_handle) = Engine::new(
        service.clone(),
        Duration::from_secs(cfg.schedule_interval_secs),
    );
    tokio::spawn(engine.run());
    if cfg.scheduler_autostart {
        engine_handle.send(EngineCommand::Start).await;
    }

    // ── Telegram operator bot ─────────────────────────────────────────────────
    if let Some(bot) = bot.filter(|_| cfg.telegram_enabled()) {
        let deps = BotDeps {
            engine: engine_handle.clone(),
            tickers: Arc::new(tickers),
            allowed_chat_ids: Arc::new(cfg.telegram_chat_ids.clone()),
        };
        tokio::spawn(start_bot(bot, deps));
    }

    // ── HTTP API ──────────────────────────────────────────────────────────────
    let api_state = api::AppState {
        service,
        engine: engine_handle,
        api_token: cfg.api_token.clone(),
    };
    let port = cfg.port;
    tokio::spawn(async move {
        if let Err(e) = api::serve(api_state, port).await {
            error!(error = %e, "API server stopped");
        }
    });

    info!("All subsystems started. Waiting for shutdown signal.");
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received. Exiting.");
}
