use std::{collections::BTreeMap, sync::Arc, time::Duration};

use futures::stream::StreamExt;
use r2r::moveit_msgs::{
    action::MoveGroup,
    msg::{
        Constraints, JointConstraint, MotionPlanRequest, MoveItErrorCodes, PlanningOptions,
        RobotState,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ur3_arci::{ArmGroup, Error, MotionPlanningInterface, WaitFuture};

use crate::{node::Spinner, Node};

// moveit_msgs/msg/MoveItErrorCodes
const MOVEIT_SUCCESS: i32 = 1;
const SPIN_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for [`MoveItClient`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MoveItClientConfig {
    /// Planning group name.
    #[serde(default = "default_group_name")]
    pub group_name: String,
    /// Action name for moveit_msgs/MoveGroup.
    #[serde(default = "default_action_name")]
    pub action_name: String,
    /// Names of joints of the group, in the order positions are given.
    #[serde(default = "default_joint_names")]
    pub joint_names: Vec<String>,
    /// Time allowed for planning, in seconds.
    #[serde(default = "default_planning_time_sec")]
    pub planning_time_sec: f64,
    /// Number of times the planner is run before giving up.
    #[serde(default = "default_planning_attempts")]
    pub planning_attempts: i32,
    /// Scaling of the joint velocity limits, in `(0, 1]`.
    #[serde(default = "default_scaling_factor")]
    pub max_velocity_scaling_factor: f64,
    /// Scaling of the joint acceleration limits, in `(0, 1]`.
    #[serde(default = "default_scaling_factor")]
    pub max_acceleration_scaling_factor: f64,
    /// Allowed deviation of each joint from the target, in radians.
    #[serde(default = "default_joint_tolerance")]
    pub joint_tolerance: f64,
}

fn default_group_name() -> String {
    "ur_manipulator".to_owned()
}

fn default_action_name() -> String {
    "move_action".to_owned()
}

fn default_joint_names() -> Vec<String> {
    [
        "shoulder_pan_joint",
        "shoulder_lift_joint",
        "elbow_joint",
        "wrist_1_joint",
        "wrist_2_joint",
        "wrist_3_joint",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_planning_time_sec() -> f64 {
    5.0
}

fn default_planning_attempts() -> i32 {
    10
}

fn default_scaling_factor() -> f64 {
    0.1
}

fn default_joint_tolerance() -> f64 {
    1e-3
}

impl Default for MoveItClientConfig {
    fn default() -> Self {
        Self {
            group_name: default_group_name(),
            action_name: default_action_name(),
            joint_names: default_joint_names(),
            planning_time_sec: default_planning_time_sec(),
            planning_attempts: default_planning_attempts(),
            max_velocity_scaling_factor: default_scaling_factor(),
            max_acceleration_scaling_factor: default_scaling_factor(),
            joint_tolerance: default_joint_tolerance(),
        }
    }
}

/// `ur3_arci::ArmGroup` implementation that plans and executes through
/// MoveIt's `move_group` node.
///
/// Created by [`MoveItInterface`]. The node keeps spinning while any client
/// of the interface is alive.
pub struct MoveItClient {
    action_client: r2r::ActionClient<MoveGroup::Action>,
    // keep not to be dropped
    _node: Node,
    _spinner: Arc<Spinner>,
    config: MoveItClientConfig,
}

impl MoveItClient {
    fn new(node: Node, spinner: Arc<Spinner>, config: MoveItClientConfig) -> Result<Self, Error> {
        let action_client = node
            .r2r()
            .create_action_client::<MoveGroup::Action>(&config.action_name)
            .map_err(anyhow::Error::from)?;
        debug!(group = %config.group_name, action = %config.action_name, "created MoveIt client");
        Ok(Self {
            action_client,
            _node: node,
            _spinner: spinner,
            config,
        })
    }

    /// Returns the configuration of this client.
    pub fn config(&self) -> &MoveItClientConfig {
        &self.config
    }

    fn goal(&self, positions: &[f64]) -> MoveGroup::Goal {
        let joint_constraints = self
            .config
            .joint_names
            .iter()
            .zip(positions)
            .map(|(joint_name, &position)| JointConstraint {
                joint_name: joint_name.clone(),
                position,
                tolerance_above: self.config.joint_tolerance,
                tolerance_below: self.config.joint_tolerance,
                weight: 1.0,
            })
            .collect();
        MoveGroup::Goal {
            request: MotionPlanRequest {
                group_name: self.config.group_name.clone(),
                // plan from the current state
                start_state: RobotState {
                    is_diff: true,
                    ..Default::default()
                },
                goal_constraints: vec![Constraints {
                    joint_constraints,
                    ..Default::default()
                }],
                num_planning_attempts: self.config.planning_attempts,
                allowed_planning_time: self.config.planning_time_sec,
                max_velocity_scaling_factor: self.config.max_velocity_scaling_factor,
                max_acceleration_scaling_factor: self.config.max_acceleration_scaling_factor,
                ..Default::default()
            },
            planning_options: PlanningOptions {
                plan_only: false,
                planning_scene_diff: r2r::moveit_msgs::msg::PlanningScene {
                    is_diff: true,
                    robot_state: RobotState {
                        is_diff: true,
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}

fn check_result(
    group_name: &str,
    status: r2r::GoalStatus,
    error_code: &MoveItErrorCodes,
) -> Result<(), Error> {
    match status {
        r2r::GoalStatus::Succeeded if error_code.val == MOVEIT_SUCCESS => {
            info!(group = group_name, "motion executed");
            Ok(())
        }
        r2r::GoalStatus::Canceled => Err(Error::Canceled {
            message: format!("MoveGroup goal for {group_name} was canceled"),
        }),
        status => Err(Error::PlanningFailed {
            code: error_code.val,
            message: format!("MoveGroup goal for {group_name} finished with {status:?}"),
        }),
    }
}

impl ArmGroup for MoveItClient {
    fn group_name(&self) -> String {
        self.config.group_name.clone()
    }

    fn joint_names(&self) -> Vec<String> {
        self.config.joint_names.clone()
    }

    fn move_to_joint_positions(&self, positions: Vec<f64>) -> Result<WaitFuture, Error> {
        if positions.len() != self.config.joint_names.len() {
            return Err(Error::LengthMismatch {
                model: self.config.joint_names.len(),
                input: positions.len(),
            });
        }
        let goal = self.goal(&positions);
        let action_client = self.action_client.clone();
        let is_available =
            r2r::Node::is_available(&self.action_client).map_err(anyhow::Error::from)?;
        let group_name = self.config.group_name.clone();
        debug!(group = %group_name, ?positions, "sending MoveGroup goal");

        // Dropping the WaitFuture must not abandon the goal.
        let handle = tokio::spawn(async move {
            is_available.await.map_err(anyhow::Error::from)?;
            let send_goal_request = action_client
                .send_goal_request(goal)
                .map_err(anyhow::Error::from)?;
            let (_goal, result, feedback) =
                send_goal_request.await.map_err(anyhow::Error::from)?;
            tokio::spawn(async move { feedback.for_each(|_| std::future::ready(())).await });
            let (status, result) = result.await.map_err(anyhow::Error::from)?;
            check_result(&group_name, status, &result.error_code)
        });
        Ok(WaitFuture::new(async move {
            handle.await.map_err(|e| Error::Other(e.into()))?
        }))
    }
}

/// `ur3_arci::MotionPlanningInterface` implementation over MoveIt planning
/// groups sharing one node.
pub struct MoveItInterface {
    groups: BTreeMap<String, Arc<MoveItClient>>,
}

impl MoveItInterface {
    /// Creates a client for each config and starts spinning `node`.
    ///
    /// Spinning stops once the interface and every group handle it gave out
    /// are dropped.
    pub fn new(node: Node, configs: &[MoveItClientConfig]) -> Result<Self, Error> {
        let spinner = Arc::new(node.spin(SPIN_INTERVAL));
        let mut groups = BTreeMap::new();
        for config in configs {
            let client = MoveItClient::new(node.clone(), spinner.clone(), config.clone())?;
            groups.insert(config.group_name.clone(), Arc::new(client));
        }
        Ok(Self { groups })
    }
}

impl MotionPlanningInterface for MoveItInterface {
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

impl std::fmt::Debug for MoveItClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveItClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for MoveItInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveItInterface")
            .field("groups", &self.group_names())
            .finish()
    }
}
