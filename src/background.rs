use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};
use crate::state::AppState;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired advisory edit locks so an abandoned editing
/// session never keeps a reservation claimed past its TTL.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background lock sweeper...");

    loop {
        match state.lock_repo.sweep_expired().await {
            Ok(0) => {}
            Ok(n) => debug!("Released {} expired edit locks", n),
            Err(e) => error!("Failed to sweep expired edit locks: {:?}", e),
        }
        sleep(Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
    }
}
