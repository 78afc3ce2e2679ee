//! Periodic refresh of cached RSVP counts.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Recompute cached counts from the ledger every `period`, forever.
pub async fn run(state: AppState, period: Duration) {
    info!(period_secs = period.as_secs(), "count resync enabled");

    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match state.resync() {
            Ok(0) => {}
            Ok(changed) => debug!(changed, "resynced RSVP counts"),
            Err(e) => error!(error = %e, "RSVP count resync failed"),
        }
    }
}
