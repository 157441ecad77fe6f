//! Loading of named joint positions.
//!
//! A positions file is a YAML mapping from position name to a record holding
//! `joint_positions` in degrees:
//!
//! ```yaml
//! HOME:
//!   joint_positions: [0, -90, 90, -90, -90, 0]
//! ```
//!
//! [`NamedPositions`] holds the same entries converted to radians.

mod error;
mod named_positions;
mod path;

pub use crate::{error::*, named_positions::*, path::*};
