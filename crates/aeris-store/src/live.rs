//! Observable query results.
//!
//! A [`LiveQuery`] holds the latest result of a query in a `watch` channel
//! and re-runs the query whenever one of the tables it reads is written.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::Result;

/// Tables that writes can invalidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Cities,
    CurrentConditions,
    HourlyForecasts,
    DailyForecasts,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Cities,
        Table::CurrentConditions,
        Table::HourlyForecasts,
        Table::DailyForecasts,
    ];
}

/// Handle to a self-refreshing query result.
///
/// The refresh task stops when the handle is dropped. Receivers obtained
/// from [`LiveQuery::subscribe`] then see the channel close.
pub struct LiveQuery<T> {
    rx: watch::Receiver<T>,
    _refresh: DropGuard,
}

impl<T> std::fmt::Debug for LiveQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveQuery").finish_non_exhaustive()
    }
}

impl<T> LiveQuery<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Run `query` once for the initial snapshot, then keep it fresh on `runtime`.
    ///
    /// `invalidations` must be subscribed before the snapshot is taken so a
    /// write racing with construction is never missed.
    pub(crate) fn start<F>(
        runtime: &Handle,
        mut invalidations: broadcast::Receiver<Table>,
        depends_on: &'static [Table],
        query: F,
    ) -> Result<Self>
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        let initial = query()?;
        let (tx, rx) = watch::channel(initial);
        let query = Arc::new(query);

        let token = CancellationToken::new();
        let cancelled = token.clone();

        runtime.spawn(async move {
            loop {
                let received = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    received = invalidations.recv() => received,
                };

                match received {
                    Ok(table) if !depends_on.contains(&table) => continue,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("Live query lagged by {} invalidations", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }

                // Writes often come in bursts, one refresh covers all of them
                while invalidations.try_recv().is_ok() {}

                let query = Arc::clone(&query);
                match tokio::task::spawn_blocking(move || query()).await {
                    Ok(Ok(fresh)) => {
                        tx.send_if_modified(|current| {
                            if *current == fresh {
                                false
                            } else {
                                *current = fresh;
                                true
                            }
                        });
                    }
                    Ok(Err(e)) => {
                        tracing::error!("Live query refresh failed, keeping last result: {}", e);
                    }
                    Err(e) => {
                        tracing::error!("Live query task failed: {}", e);
                    }
                }
            }
            tracing::trace!("Live query stopped");
        });

        Ok(Self {
            rx,
            _refresh: token.drop_guard(),
        })
    }
}

impl<T: Clone> LiveQuery<T> {
    /// Latest result
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Receiver that is notified on every change of the result
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}
