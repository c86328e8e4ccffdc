//! Feed plugins.
//!
//! Each plugin runs as its own task, holds a clone of the IRC [`Client`] and
//! talks to the network only through `join`, `message` and `disconnect`.
//!
//! [`Client`]: crate::irc::Client

pub mod mastodon;

use anyhow::Result;
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Plugin: Send {
    /// Label used in logs.
    fn name(&self) -> String;

    /// Run until the feed ends, fails, or `cancel` fires.
    async fn run(self: Box<Self>, cancel: CancellationToken) -> Result<()>;
}

/// Spawn one task per plugin. Each task logs how its plugin ended.
pub fn spawn_all(plugins: Vec<Box<dyn Plugin>>, cancel: &CancellationToken) -> Vec<JoinHandle<()>> {
    plugins
        .into_iter()
        .map(|plugin| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let name = plugin.name();
                tracing::info!(plugin = %name, "plugin started");
                match plugin.run(cancel).await {
                    Ok(()) => tracing::info!(plugin = %name, "plugin stopped"),
                    Err(e) => tracing::error!(plugin = %name, error = %format!("{:#}", e), "plugin failed"),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Waiter {
        stopped: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Plugin for Waiter {
        fn name(&self) -> String {
            "waiter".into()
        }

        async fn run(self: Box<Self>, cancel: CancellationToken) -> Result<()> {
            cancel.cancelled().await;
            self.stopped.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Plugin for Failing {
        fn name(&self) -> String {
            "failing".into()
        }

        async fn run(self: Box<Self>, _cancel: CancellationToken) -> Result<()> {
            anyhow::bail!("feed unavailable")
        }
    }

    #[tokio::test]
    async fn test_plugins_stop_on_cancel() {
        let stopped = Arc::new(AtomicUsize::new(0));
        let plugins: Vec<Box<dyn Plugin>> = vec![
            Box::new(Waiter { stopped: stopped.clone() }),
            Box::new(Waiter { stopped: stopped.clone() }),
            Box::new(Failing),
        ];
        let cancel = CancellationToken::new();
        let handles = spawn_all(plugins, &cancel);

        cancel.cancel();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(stopped.load(Ordering::SeqCst), 2);
    }
}
