use std::{sync::Arc, time::Duration};

use parking_lot::{Mutex, MutexGuard};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

/// ROS2 node shared by the MoveIt clients of one process.
#[derive(Clone)]
pub struct Node(Arc<Mutex<r2r::Node>>);

impl Node {
    /// Creates a new ROS2 node in a new context.
    pub fn new(name: &str, namespace: &str) -> Result<Self, ur3_arci::Error> {
        let ctx = r2r::Context::create().map_err(anyhow::Error::from)?;
        let node = r2r::Node::create(ctx, name, namespace).map_err(anyhow::Error::from)?;
        debug!(name, namespace, "created ROS2 node");
        Ok(Self(Arc::new(Mutex::new(node))))
    }

    /// Gets underlying `r2r::Node`.
    pub fn r2r(&self) -> MutexGuard<'_, r2r::Node> {
        self.0.lock()
    }

    /// Handles pending callbacks every `interval` until the returned
    /// [`Spinner`] is dropped.
    pub(crate) fn spin(&self, interval: Duration) -> Spinner {
        let node = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Never block while holding the lock.
                node.r2r().spin_once(Duration::ZERO);
            }
        });
        Spinner(task)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").finish_non_exhaustive()
    }
}

/// Background task spinning a [`Node`].
#[derive(Debug)]
pub(crate) struct Spinner(JoinHandle<()>);

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.abort();
        debug!("stopped spinning ROS2 node");
    }
}
