//! Moves a UR3 arm to named joint positions.
//!
//! Positions are loaded once with [`ur3_motion_config::NamedPositions`] and
//! visited through a [`PositionCommander`] wrapping one planning group.

mod config;
mod error;
mod position_commander;
pub mod utils;

pub use crate::{config::*, error::*, position_commander::*};
// re-export
pub use ur3_motion_config::NamedPositions;
