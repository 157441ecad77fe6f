#![cfg(feature = "ros2")]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use futures::stream::{Stream, StreamExt};
use parking_lot::Mutex;
use r2r::moveit_msgs::{action::MoveGroup, msg::MoveItErrorCodes};
use ur3_arci::*;
use ur3_arci_ros2::{r2r, MoveItClientConfig, MoveItInterface, Node};

// (node_name, action_name)
fn node_and_action_name() -> (String, String) {
    static COUNT: AtomicUsize = AtomicUsize::new(0);
    let n = COUNT.fetch_add(1, Ordering::SeqCst);
    let node_name = format!("test_moveit_node_{n}");
    let action_name = format!("/test_move_action_{n}");
    (node_name, action_name)
}

/// Accepts every goal, records its joint constraints and answers with `code`.
async fn move_group_server(
    mut requests: impl Stream<Item = r2r::ActionServerGoalRequest<MoveGroup::Action>> + Unpin,
    received: Arc<Mutex<Vec<Vec<(String, f64)>>>>,
    code: i32,
) {
    while let Some(req) = requests.next().await {
        let (mut goal, _cancel) = req.accept().expect("could not accept goal");
        let constraints = goal.goal.request.goal_constraints[0]
            .joint_constraints
            .iter()
            .map(|c| (c.joint_name.clone(), c.position))
            .collect();
        received.lock().push(constraints);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let result = MoveGroup::Result {
            error_code: MoveItErrorCodes {
                val: code,
                ..Default::default()
            },
            ..Default::default()
        };
        if code == 1 {
            goal.succeed(result).expect("could not send result");
        } else {
            goal.abort(result).expect("could not send result");
        }
    }
}

fn spawn_server(code: i32) -> (Node, String, Arc<Mutex<Vec<Vec<(String, f64)>>>>) {
    let (node_name, action_name) = node_and_action_name();
    let node = Node::new(&node_name, "ur3_arci_ros2").unwrap();
    let requests = node
        .r2r()
        .create_action_server::<MoveGroup::Action>(&action_name)
        .unwrap();
    let received = Arc::new(Mutex::new(vec![]));
    tokio::spawn(move_group_server(requests, received.clone(), code));
    (node, action_name, received)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_move_to_joint_positions() {
    let (node, action_name, received) = spawn_server(1);
    let config = MoveItClientConfig {
        action_name,
        joint_names: vec!["j1".to_owned(), "j2".to_owned()],
        ..Default::default()
    };
    let interface = MoveItInterface::new(node, &[config]).unwrap();
    assert_eq!(interface.group_names(), vec!["ur_manipulator"]);
    let group = interface.get_group("ur_manipulator").unwrap();

    group
        .move_to_joint_positions(vec![1.0, 0.5])
        .unwrap()
        .await
        .unwrap();
    assert_eq!(
        received.lock().clone(),
        vec![vec![("j1".to_owned(), 1.0), ("j2".to_owned(), 0.5)]]
    );

    assert!(matches!(
        group.move_to_joint_positions(vec![1.0]),
        Err(Error::LengthMismatch { model: 2, input: 1 })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_planning_failure() {
    // moveit_msgs/MoveItErrorCodes::PLANNING_FAILED
    let (node, action_name, _received) = spawn_server(-1);
    let config = MoveItClientConfig {
        action_name,
        ..Default::default()
    };
    let interface = MoveItInterface::new(node, &[config]).unwrap();
    let group = interface.get_group("ur_manipulator").unwrap();
    let err = group
        .move_to_joint_positions(vec![0.0; 6])
        .unwrap()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PlanningFailed { code: -1, .. }), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_group_outlives_interface() {
    let (node, action_name, received) = spawn_server(1);
    let config = MoveItClientConfig {
        group_name: "arm".to_owned(),
        action_name,
        joint_names: vec!["j1".to_owned()],
        ..Default::default()
    };
    let interface = MoveItInterface::new(node, &[config]).unwrap();
    let group = interface.get_group("arm").unwrap();
    drop(interface);

    // the node is still spun for the remaining group handle
    group
        .move_to_joint_positions(vec![0.25])
        .unwrap()
        .await
        .unwrap();
    assert_eq!(received.lock().clone(), vec![vec![("j1".to_owned(), 0.25)]]);
}
