//! [`ur3_arci`] implementation using MoveIt on ROS2.
#![cfg(feature = "ros2")]
#![warn(missing_docs)]

mod moveit;
mod node;

pub use crate::{moveit::*, node::*};
// re-export
pub use r2r;
