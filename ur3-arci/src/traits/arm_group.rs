use auto_impl::auto_impl;

use crate::{error::Error, waits::WaitFuture};

/// A single MoveIt-style planning group, e.g. `ur_manipulator`.
#[auto_impl(Box, Arc)]
pub trait ArmGroup: Send + Sync {
    /// Returns the planning group name.
    fn group_name(&self) -> String;

    /// Returns names of joints that this group handles, in command order.
    fn joint_names(&self) -> Vec<String>;

    /// Issues a motion to the given joint positions (radians) and returns a
    /// future that waits until the motion is executed.
    ///
    /// # Implementation
    ///
    /// This method must not block on the motion itself. The returned future
    /// is expected to behave similarly to [`tokio::task::JoinHandle`]:
    ///
    /// - Can wait for the motion to complete by `.await`.
    /// - The motion does not stop even if it is dropped.
    fn move_to_joint_positions(&self, positions: Vec<f64>) -> Result<WaitFuture, Error>;
}
