//! Background expiry sweep for the result cache.

use std::time::Duration;
use titleseek_core::CacheDb;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn a task that calls `clear_expired` immediately and then every `every`.
///
/// Sweep failures are logged and the loop keeps going. Abort the returned
/// handle to stop it.
pub fn spawn_expiry_sweeper(cache: CacheDb, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match cache.clear_expired().await {
                Ok(0) => tracing::trace!("expiry sweep found nothing"),
                Ok(removed) => tracing::info!(removed, "expiry sweep removed cache entries"),
                Err(e) => tracing::warn!("expiry sweep failed: {}", e),
            }
        }
    })
}
