mod dummy_arm_group;
mod dummy_motion_planning_interface;

pub use dummy_arm_group::*;
pub use dummy_motion_planning_interface::*;
