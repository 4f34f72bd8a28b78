//! Background cache expiry sweeps
//!
//! Periodically removes expired records from the shared cache in the
//! background and reports each sweep to the owner over a tokio channel.
//! Meant for long-lived processes that keep one cache across many lookups.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cache::CountyCache;

/// Messages sent from the background sweeper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupMessage {
    /// A sweep finished
    Swept {
        /// Entries removed by this sweep
        removed: usize,
        /// Entries left afterwards
        remaining: usize,
    },
}

/// Configuration for background sweeps
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Time between sweeps
    pub interval: Duration,
    /// Whether sweeping is enabled
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600), // 1 hour
            enabled: true,
        }
    }
}

/// Handle for controlling the background sweeper
pub struct CleanupHandle {
    /// Channel for receiving sweep reports
    pub receiver: mpsc::Receiver<CleanupMessage>,
    /// Signals shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl CleanupHandle {
    /// Spawns the sweeper over a shared cache
    ///
    /// Nothing is spawned when `config.enabled` is false. Must be called from
    /// within a tokio runtime.
    ///
    /// # Arguments
    /// * `cache` - The cache to sweep
    /// * `config` - Sweep interval and enable flag
    pub fn spawn(cache: Arc<CountyCache>, config: CleanupConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(config.interval);
                // Skip the first tick (immediate)
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let removed = cache.cleanup_expired();
                            let remaining = cache.size();
                            debug!(removed, remaining, "Cache sweep finished");
                            // A full channel only means the owner is not listening
                            let _ = msg_tx.try_send(CleanupMessage::Swept { removed, remaining });
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Stops the background sweeper
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::data::CountyRecord;

    fn record(name: &str) -> CountyRecord {
        CountyRecord {
            name: name.to_string(),
            population: 1,
            median_household_income: 0,
            median_home_value: 0,
            total_commute_time: 0,
            bachelors_degree_pop: 0,
            owner_occupied_housing: 0,
            renter_occupied_housing: 0,
            state_code: "48".to_string(),
            county_code: "001".to_string(),
        }
    }

    #[test]
    fn test_cleanup_config_default() {
        let config = CleanupConfig::default();
        assert_eq!(config.interval, Duration::from_secs(3600));
        assert!(config.enabled);
    }

    #[tokio::test]
    async fn test_cleanup_handle_spawn_disabled() {
        let config = CleanupConfig {
            enabled: false,
            ..Default::default()
        };

        let mut handle = CleanupHandle::spawn(Arc::new(CountyCache::new()), config);

        // With sweeping disabled, there should be no messages
        assert!(handle.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(CountyCache::with_clock(clock.clone()));
        cache.set("anderson", record("Anderson County, Texas"));
        clock.advance(chrono::Duration::hours(25));
        cache.set("andrews", record("Andrews County, Texas"));

        let config = CleanupConfig {
            interval: Duration::from_millis(10),
            enabled: true,
        };
        let mut handle = CleanupHandle::spawn(cache.clone(), config);

        let message = tokio::time::timeout(Duration::from_secs(5), handle.receiver.recv())
            .await
            .expect("sweep should report")
            .expect("channel open");

        assert_eq!(
            message,
            CleanupMessage::Swept {
                removed: 1,
                remaining: 1
            }
        );
        assert!(!cache.has("anderson"));
        assert!(cache.has("andrews"));

        handle.shutdown().await;
    }
}
