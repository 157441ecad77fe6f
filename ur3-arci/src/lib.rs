//! Abstract arm control interface.
//!
//! A [`MotionPlanningInterface`] hands out [`ArmGroup`]s by planning group
//! name. An [`ArmGroup`] accepts joint positions and returns a [`WaitFuture`]
//! that resolves once the motion has been executed.

mod clients;
mod error;
mod traits;
mod waits;

pub use clients::*;
pub use error::*;
pub use traits::*;
pub use waits::*;
