use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tracing::debug;

use crate::{error::Error, traits::ArmGroup, waits::WaitFuture};

/// What happened to a [`DummyArmGroup`], in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DummyArmEvent {
    /// A motion to these positions was issued.
    Sent(Vec<f64>),
    /// The caller finished waiting for the motion to these positions.
    Waited(Vec<f64>),
}

/// Dummy ArmGroup for Debug or Tests.
///
/// Motions are simulated: the positions become current as soon as they are
/// sent, and the returned [`WaitFuture`] completes after `execution_time`.
#[derive(Debug, Clone)]
pub struct DummyArmGroup {
    group_name: String,
    joint_names: Vec<String>,
    execution_time: Duration,
    current_positions: Arc<Mutex<Vec<f64>>>,
    events: Arc<Mutex<Vec<DummyArmEvent>>>,
}

impl DummyArmGroup {
    pub fn new(group_name: impl Into<String>, joint_names: Vec<String>) -> Self {
        let dof = joint_names.len();
        Self {
            group_name: group_name.into(),
            joint_names,
            execution_time: Duration::ZERO,
            current_positions: Arc::new(Mutex::new(vec![0.0; dof])),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets how long each simulated motion takes.
    pub fn with_execution_time(mut self, execution_time: Duration) -> Self {
        self.execution_time = execution_time;
        self
    }

    pub fn current_positions(&self) -> Vec<f64> {
        self.current_positions.lock().clone()
    }

    /// Returns every issued motion, oldest first.
    pub fn sent_positions(&self) -> Vec<Vec<f64>> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                DummyArmEvent::Sent(positions) => Some(positions.clone()),
                DummyArmEvent::Waited(_) => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<DummyArmEvent> {
        self.events.lock().clone()
    }
}

impl ArmGroup for DummyArmGroup {
    fn group_name(&self) -> String {
        self.group_name.clone()
    }

    fn joint_names(&self) -> Vec<String> {
        self.joint_names.clone()
    }

    fn move_to_joint_positions(&self, positions: Vec<f64>) -> Result<WaitFuture, Error> {
        // An empty joint list accepts vectors of any length.
        if !self.joint_names.is_empty() && positions.len() != self.joint_names.len() {
            return Err(Error::LengthMismatch {
                model: self.joint_names.len(),
                input: positions.len(),
            });
        }
        debug!(group = %self.group_name, ?positions, "dummy motion issued");
        self.events
            .lock()
            .push(DummyArmEvent::Sent(positions.clone()));
        *self.current_positions.lock() = positions.clone();

        let execution_time = self.execution_time;
        let events = self.events.clone();
        Ok(WaitFuture::new(async move {
            if !execution_time.is_zero() {
                tokio::time::sleep(execution_time).await;
            }
            events.lock().push(DummyArmEvent::Waited(positions));
            Ok(())
        }))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn joint_names() -> Vec<String> {
        vec!["a".to_owned(), "b".to_owned()]
    }

    #[test]
    fn send_and_get() {
        let client = DummyArmGroup::new("arm", joint_names());
        assert_eq!(client.group_name(), "arm");
        assert_eq!(client.joint_names(), joint_names());
        let pos = client.current_positions();
        assert_eq!(pos.len(), 2);
        assert_approx_eq!(pos[0], 0.0);
        assert_approx_eq!(pos[1], 0.0);

        let wait = client.move_to_joint_positions(vec![1.0, 2.0]).unwrap();
        assert_eq!(client.events(), vec![DummyArmEvent::Sent(vec![1.0, 2.0])]);
        assert!(tokio_test::block_on(wait).is_ok());
        let pos2 = client.current_positions();
        assert_approx_eq!(pos2[0], 1.0);
        assert_approx_eq!(pos2[1], 2.0);
        assert_eq!(
            client.events(),
            vec![
                DummyArmEvent::Sent(vec![1.0, 2.0]),
                DummyArmEvent::Waited(vec![1.0, 2.0])
            ]
        );
    }

    #[test]
    fn length_mismatch() {
        let client = DummyArmGroup::new("arm", joint_names());
        let err = client.move_to_joint_positions(vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { model: 2, input: 1 }));
        assert!(client.sent_positions().is_empty());
    }

    #[test]
    fn any_length_without_joint_names() {
        let client = DummyArmGroup::new("arm", vec![]);
        tokio_test::block_on(client.move_to_joint_positions(vec![1.0, 2.0, 3.0]).unwrap())
            .unwrap();
        assert_eq!(client.sent_positions(), vec![vec![1.0, 2.0, 3.0]]);
    }

    #[tokio::test]
    async fn execution_time() {
        let client = DummyArmGroup::new("arm", joint_names())
            .with_execution_time(Duration::from_millis(20));
        let start = std::time::Instant::now();
        client
            .move_to_joint_positions(vec![0.5, 0.5])
            .unwrap()
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_approx_eq!(client.current_positions()[1], 0.5);
    }
}
