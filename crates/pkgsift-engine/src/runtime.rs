//! Event loop driver
//!
//! Runs a mounted filter on the current task: input events arrive over a
//! channel and the single pending debounce deadline is awaited alongside
//! them. Immediate passes run inside the event branch, so they can overtake
//! a pending debounced pass; the later pass simply recomputes.

use pkgsift_core::Location;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::controller::{InputEvent, PackageFilter, PassReport};
use crate::error::Result;
use crate::view::CatalogView;

/// Far enough away to never fire while no pass is pending
const IDLE_WAIT: Duration = Duration::from_secs(24 * 60 * 60);

/// Drive `filter` until `events` closes.
///
/// `on_pass` is called after every successful pass. Failed passes are logged
/// and the loop carries on. A debounced pass still pending when the channel
/// closes is awaited and run before returning.
pub async fn drive<V, L, F>(
    filter: &mut PackageFilter<V, L>,
    mut events: mpsc::Receiver<InputEvent>,
    mut on_pass: F,
) where
    V: CatalogView,
    L: Location,
    F: FnMut(&PackageFilter<V, L>, &PassReport),
{
    loop {
        let deadline = filter.pending_deadline().map(Instant::from_std);
        let wake = deadline.unwrap_or_else(|| Instant::now() + IDLE_WAIT);

        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let outcome = filter.handle(event, Instant::now().into_std());
                settle(filter, outcome, &mut on_pass);
            }
            _ = sleep_until(wake), if deadline.is_some() => {
                let outcome = filter.tick(Instant::now().into_std());
                settle(filter, outcome, &mut on_pass);
            }
        }
    }

    if let Some(deadline) = filter.pending_deadline() {
        sleep_until(Instant::from_std(deadline)).await;
        let outcome = filter.tick(Instant::now().into_std());
        settle(filter, outcome, &mut on_pass);
    }

    tracing::debug!(passes = filter.passes(), "input closed, driver stopped");
}

fn settle<V, L, F>(filter: &PackageFilter<V, L>, outcome: Result<Option<PassReport>>, on_pass: &mut F)
where
    V: CatalogView,
    L: Location,
    F: FnMut(&PackageFilter<V, L>, &PassReport),
{
    match outcome {
        Ok(Some(report)) => on_pass(filter, &report),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "filter pass failed"),
    }
}
