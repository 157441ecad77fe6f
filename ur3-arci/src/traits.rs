mod arm_group;
mod motion_planning_interface;

pub use arm_group::*;
pub use motion_planning_interface::*;
