use std::{collections::BTreeMap, sync::Arc};

use crate::{
    clients::DummyArmGroup,
    error::Error,
    traits::{ArmGroup, MotionPlanningInterface},
};

/// Dummy MotionPlanningInterface for Debug or Tests
#[derive(Debug, Default, Clone)]
pub struct DummyMotionPlanningInterface {
    groups: BTreeMap<String, Arc<DummyArmGroup>>,
}

impl DummyMotionPlanningInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group, replacing one with the same name.
    pub fn with_group(mut self, group: DummyArmGroup) -> Self {
        self.groups.insert(group.group_name(), Arc::new(group));
        self
    }

    pub fn dummy_group(&self, name: &str) -> Option<&Arc<DummyArmGroup>> {
        self.groups.get(name)
    }
}

impl MotionPlanningInterface for DummyMotionPlanningInterface {
    fn group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    fn get_group(&self, name: &str) -> Result<Arc<dyn ArmGroup>, Error> {
        match self.groups.get(name) {
            Some(group) => Ok(group.clone() as Arc<dyn ArmGroup>),
            None => Err(Error::NoGroup {
                name: name.to_owned(),
                available: self.group_names(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_group() {
        let interface = DummyMotionPlanningInterface::new()
            .with_group(DummyArmGroup::new("ur_manipulator", vec![]))
            .with_group(DummyArmGroup::new("gripper", vec![]));
        assert_eq!(interface.group_names(), vec!["gripper", "ur_manipulator"]);
        let group = interface.get_group("ur_manipulator").unwrap();
        assert_eq!(group.group_name(), "ur_manipulator");

        match interface.get_group("arm") {
            Err(Error::NoGroup { name, available }) => {
                assert_eq!(name, "arm");
                assert_eq!(available.len(), 2);
            }
            Err(e) => panic!("unexpected error {e:?}"),
            Ok(group) => panic!("unexpected group {}", group.group_name()),
        }
    }
}
