use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};
use tracing::{info, warn};

use common::{EngineCommand, EngineState};
use engine::EngineHandle;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Dependencies injected into every handler via `dptree`.
#[derive(Clone)]
pub struct BotDeps {
    pub engine: EngineHandle,
    pub tickers: Arc<Vec<String>>,
    /// Chats allowed to drive the scheduler. Same list that receives summaries.
    pub allowed_chat_ids: Arc<Vec<i64>>,
}

/// Telegram bot commands exposed to the operator.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Forecaster commands:")]
pub enum Command {
    #[command(description = "Start the periodic fetch/analyze schedule")]
    Start,
    #[command(description = "Stop the periodic schedule")]
    Stop,
    #[command(description = "Show scheduler state and watchlist")]
    Status,
    #[command(description = "Fetch and analyze now; the summary follows when ready")]
    Analyze,
}

/// Start the Telegram bot in long-polling mode.
pub async fn start_bot(bot: Bot, deps: BotDeps) {
    let deps = Arc::new(deps);

    info!("Telegram bot starting (long-polling)");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_start))
        .branch(case![Command::Stop].endpoint(handle_stop))
        .branch(case![Command::Status].endpoint(handle_status))
        .branch(case![Command::Analyze].endpoint(handle_analyze));

    Update::filter_message()
        .map(|msg: Message| msg.chat.id)
        .filter_async(auth_filter)
        .branch(command_handler)
}

/// Silently drop messages from chats not in the allowed list.
async fn auth_filter(chat_id: ChatId, deps: Arc<BotDeps>) -> bool {
    let allowed = is_allowed(&deps.allowed_chat_ids, chat_id);
    if !allowed {
        warn!(chat_id = chat_id.0, "Unauthorized Telegram access attempt");
    }
    allowed
}

fn is_allowed(allowed: &[i64], chat_id: ChatId) -> bool {
    allowed.contains(&chat_id.0)
}

async fn handle_start(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    if deps.engine.state().await == EngineState::Running {
        bot.send_message(msg.chat.id, "Scheduler is already running.").await?;
    } else {
        deps.engine.send(EngineCommand::Start).await;
        bot.send_message(msg.chat.id, "Scheduler started.").await?;
    }
    Ok(())
}

async fn handle_stop(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    if deps.engine.state().await == EngineState::Stopped {
        bot.send_message(msg.chat.id, "Scheduler is already stopped.").await?;
    } else {
        deps.engine.send(EngineCommand::Stop).await;
        bot.send_message(msg.chat.id, "Scheduler stopped.").await?;
    }
    Ok(())
}

async fn handle_status(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let state = deps.engine.state().await;
    bot.send_message(msg.chat.id, status_text(state, &deps.tickers))
        .await?;
    Ok(())
}

async fn handle_analyze(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    deps.engine.send(EngineCommand::RunNow).await;
    bot.send_message(msg.chat.id, "Analysis queued.").await?;
    Ok(())
}

fn status_text(state: EngineState, tickers: &[String]) -> String {
    format!(
        "Forecaster Status\n\
         Scheduler: {state}\n\
         Watchlist: {}",
        tickers.join(", ")
    )
}
