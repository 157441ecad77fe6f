use std::sync::Arc;

use auto_impl::auto_impl;

use crate::{error::Error, traits::ArmGroup};

/// Entry point of a motion planning framework: selects planning groups by name.
#[auto_impl(Box, Arc)]
pub trait MotionPlanningInterface: Send + Sync {
    /// Returns names of the planning groups this interface knows.
    fn group_names(&self) -> Vec<String>;

    /// Returns the planning group with the given name.
    fn get_group(&self, name: &str) -> Result<Arc<dyn ArmGroup>, Error>;
}
