use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{info, warn};

use common::{EngineCommand, EngineState, ScheduledJob};

/// Cloneable handle passed to other crates (Telegram, API).
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<EngineCommand>,
    state: Arc<RwLock<EngineState>>,
}

impl EngineHandle {
    pub async fn send(&self, cmd: EngineCommand) {
        if self.command_tx.send(cmd).await.is_err() {
            warn!(?cmd, "Engine is gone, command dropped");
        }
    }

    pub async fn state(&self) -> EngineState {
        *self.state.read().await
    }
}

/// The scheduler: triggers the job on a fixed cadence while running and
/// processes commands in between. Jobs run inline, so passes never overlap.
pub struct Engine {
    job: Arc<dyn ScheduledJob>,
    period: Duration,
    state: Arc<RwLock<EngineState>>,
    command_rx: mpsc::Receiver<EngineCommand>,
}

impl Engine {
    pub fn new(job: Arc<dyn ScheduledJob>, period: Duration) -> (Self, EngineHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let state = Arc::new(RwLock::new(EngineState::Stopped));

        let handle = EngineHandle {
            command_tx,
            state: state.clone(),
        };

        let engine = Engine {
            job,
            period,
            state,
            command_rx,
        };

        (engine, handle)
    }

    fn ticker(&self) -> Interval {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    /// Run the command loop until every handle is dropped.
    /// Call from `tokio::spawn`.
    pub async fn run(mut self) {
        info!(period_secs = self.period.as_secs(), "Scheduler initialized in Stopped state");
        let mut ticker: Option<Interval> = None;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(EngineCommand::Start) => {
                        if ticker.is_some() {
                            info!("Scheduler already running");
                            continue;
                        }
                        info!("Scheduler started");
                        *self.state.write().await = EngineState::Running;
                        ticker = Some(self.ticker());
                    }
                    Some(EngineCommand::Stop) => {
                        info!("Scheduler stopped");
                        *self.state.write().await = EngineState::Stopped;
                        ticker = None;
                    }
                    Some(EngineCommand::RunNow) => {
                        info!("Running one pass on request");
                        self.job.trigger(Utc::now()).await;
                    }
                    None => {
                        warn!("Engine command channel closed, shutting down");
                        break;
                    }
                },
                _ = next_tick(&mut ticker) => {
                    self.job.trigger(Utc::now()).await;
                }
            }
        }
    }
}

/// Resolves on the next tick, or never while the scheduler is stopped.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
