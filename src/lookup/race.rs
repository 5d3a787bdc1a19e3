//! Race coordinator - start both adapters, take the first success, drain the rest
//!
//! Both pending -> one complete, reported -> both complete, exit.

use crate::lookup::error::{LookupError, RaceError};
use crate::lookup::types::{Drained, LookupResult, Provider, Winner};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One channel slot per adapter so no publish ever waits
const ADAPTERS: usize = 2;

type Outcome = Result<LookupResult, LookupError>;

/// A running race between two adapters
pub struct Race {
    started: Instant,
    rx: mpsc::Receiver<Outcome>,
    handles: Vec<JoinHandle<()>>,
}

/// A race whose winner has been taken; `wait` joins whatever is still running
pub struct Draining {
    rx: mpsc::Receiver<Outcome>,
    handles: Vec<JoinHandle<()>>,
}

impl Race {
    /// Spawn both adapters onto the current tokio runtime
    ///
    /// Each adapter is paired with the provider it queries, so a panic inside
    /// it still reaches the coordinator as that provider's failure.
    pub fn start<A, B>(first: (Provider, A), second: (Provider, B)) -> Self
    where
        A: Future<Output = Outcome> + Send + 'static,
        B: Future<Output = Outcome> + Send + 'static,
    {
        let started = Instant::now();
        let (tx, rx) = mpsc::channel(ADAPTERS);

        let handles = vec![
            spawn_adapter(first.0, first.1, tx.clone()),
            spawn_adapter(second.0, second.1, tx),
        ];
        debug!("Started {} adapters", handles.len());

        Race {
            started,
            rx,
            handles,
        }
    }

    /// Consume the first successful result in completion order
    ///
    /// A failed arrival doesn't end the race; the other adapter still gets
    /// its chance. Only when no success can arrive any more is the race
    /// lost, with every failure collected.
    pub async fn winner(mut self) -> (Result<Winner, RaceError>, Draining) {
        let mut failures = Vec::new();
        let mut winner = None;

        while let Some(outcome) = self.rx.recv().await {
            match outcome {
                Ok(result) => {
                    let elapsed = self.started.elapsed();
                    info!("[{}] won the race in {:?}", result.provider(), elapsed);
                    winner = Some(Winner { result, elapsed });
                    break;
                }
                Err(e) => {
                    warn!("Lookup failed: {}", e);
                    failures.push(e);
                }
            }
        }

        let draining = Draining {
            rx: self.rx,
            handles: self.handles,
        };

        (winner.ok_or(RaceError::AllFailed(failures)), draining)
    }
}

impl Draining {
    /// Block until every adapter task has finished
    pub async fn wait(mut self) -> Drained {
        let mut drained = Drained::default();

        for handle in self.handles {
            match handle.await {
                Ok(()) => drained.joined += 1,
                Err(e) => warn!("Adapter task did not finish: {}", e),
            }
        }

        // results that arrived after the winner are dropped unread
        while let Ok(outcome) = self.rx.try_recv() {
            let provider = match &outcome {
                Ok(result) => result.provider(),
                Err(e) => e.provider(),
            };
            debug!("Discarding late result from {}", provider);
            drained.unread += 1;
        }

        info!("Drain complete: {}", drained);
        drained
    }
}

fn spawn_adapter<F>(
    provider: Provider,
    adapter: F,
    tx: mpsc::Sender<Outcome>,
) -> JoinHandle<()>
where
    F: Future<Output = Outcome> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = match AssertUnwindSafe(adapter).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(_) => Err(LookupError::Panicked { provider }),
        };
        if tx.send(outcome).await.is_err() {
            debug!("Race already dropped, result discarded");
        }
    })
}
