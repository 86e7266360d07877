use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Told when cached renderings of a path are stale.
pub trait CacheInvalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

const CHANNEL_CAPACITY: usize = 64;

/// Broadcasts stale paths to whoever subscribed. Without subscribers the signal is dropped.
pub struct RevalidationBus {
    sender: broadcast::Sender<String>,
}

impl RevalidationBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Logs every stale path until the bus is dropped.
    pub fn spawn_logger(&self) -> JoinHandle<()> {
        let mut receiver = self.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(path) => log::info!("Cached renderings of {path} are stale"),
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("Revalidation logger missed {skipped} paths")
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for RevalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheInvalidator for RevalidationBus {
    fn revalidate_path(&self, path: &str) {
        log::debug!("Revalidating {path}");
        // Err only means nobody is listening
        let _ = self.sender.send(path.to_string());
    }
}
