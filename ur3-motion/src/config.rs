use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;
use ur3_arci::{DummyArmGroup, DummyMotionPlanningInterface, MotionPlanningInterface};
#[cfg(feature = "ros2")]
use ur3_arci_ros2::{MoveItClientConfig, MoveItInterface, Node};

use crate::Error;

/// Where motions are sent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "args")]
#[serde(deny_unknown_fields)]
#[non_exhaustive] // The variants will increase depending on the feature flag.
pub enum BackendConfig {
    /// In-memory arm that accepts every motion.
    Dummy {
        /// Joint names of the simulated group. Empty accepts any length.
        #[serde(default)]
        joint_names: Vec<String>,
        /// Simulated duration of each motion.
        #[serde(default)]
        execution_time_sec: f64,
    },
    #[cfg(feature = "ros2")]
    MoveIt {
        #[serde(default)]
        config: MoveItClientConfig,
    },
    // Not public API.
    // A dummy variant to catch that there is a config that requires the ros2 feature.
    #[doc(hidden)]
    #[cfg(not(feature = "ros2"))]
    #[serde(rename = "MoveIt")]
    __MoveIt {
        #[serde(default)]
        config: Option<toml::Value>,
    },
}

impl Default for BackendConfig {
    #[cfg(feature = "ros2")]
    fn default() -> Self {
        BackendConfig::MoveIt {
            config: MoveItClientConfig::default(),
        }
    }

    #[cfg(not(feature = "ros2"))]
    fn default() -> Self {
        BackendConfig::Dummy {
            joint_names: vec![],
            execution_time_sec: 0.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Ur3MotionConfig {
    // Serialized before `backend`: a TOML key written after the `[backend]`
    // table header would belong to that table.
    #[serde(default = "default_node_name")]
    pub node_name: String,
    /// Planning group the positions are sent to. Also used as the MoveIt
    /// group name, replacing `group_name` of the backend config.
    #[serde(default = "default_group_name")]
    pub group_name: String,
    /// Positions file. Relative paths are resolved against this config file.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions_path: Option<PathBuf>,
    /// Positions visited when none are given on the command line.
    #[serde(default = "default_positions")]
    pub default_positions: Vec<String>,

    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_node_name() -> String {
    "ur3_moveit_controller".to_owned()
}

fn default_group_name() -> String {
    "ur_manipulator".to_owned()
}

fn default_positions() -> Vec<String> {
    vec!["HOME".to_owned()]
}

impl Default for Ur3MotionConfig {
    fn default() -> Self {
        Self {
            node_name: default_node_name(),
            group_name: default_group_name(),
            positions_path: None,
            default_positions: default_positions(),
            backend: BackendConfig::default(),
        }
    }
}

impl Ur3MotionConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::NoFile(path.as_ref().to_owned(), e),
                _ => Error::ReadFailure(path.as_ref().to_owned(), e),
            })?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let mut config: Ur3MotionConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))?;

        // Returns an error if a config requires ros2 feature but ros2 feature is disabled.
        #[cfg(not(feature = "ros2"))]
        if matches!(config.backend, BackendConfig::__MoveIt { .. }) {
            return Err(Error::ConfigRequireRos2("backend".into()));
        }

        if let BackendConfig::Dummy {
            execution_time_sec, ..
        } = &config.backend
        {
            execution_time(*execution_time_sec)?;
        }

        if let Some(positions_path) = &mut config.positions_path {
            *positions_path = resolve_relative_path(path.as_ref(), positions_path);
        }
        debug!("{:?}", config);
        Ok(config)
    }

    /// Connects to the configured backend.
    pub fn create_motion_planning_interface(
        &self,
    ) -> Result<Box<dyn MotionPlanningInterface>, Error> {
        match &self.backend {
            BackendConfig::Dummy {
                joint_names,
                execution_time_sec,
            } => {
                let group = DummyArmGroup::new(&self.group_name, joint_names.clone())
                    .with_execution_time(execution_time(*execution_time_sec)?);
                Ok(Box::new(DummyMotionPlanningInterface::new().with_group(group)))
            }
            #[cfg(feature = "ros2")]
            BackendConfig::MoveIt { config } => {
                let node = Node::new(&self.node_name, "")?;
                let config = self.moveit_client_config(config);
                Ok(Box::new(MoveItInterface::new(node, &[config])?))
            }
            #[cfg(not(feature = "ros2"))]
            BackendConfig::__MoveIt { .. } => Err(Error::ConfigRequireRos2("backend".into())),
        }
    }

    #[cfg(feature = "ros2")]
    fn moveit_client_config(&self, config: &MoveItClientConfig) -> MoveItClientConfig {
        if config.group_name != self.group_name {
            debug!(
                "group_name {:?} of the MoveIt config is replaced by {:?}",
                config.group_name, self.group_name
            );
        }
        MoveItClientConfig {
            group_name: self.group_name.clone(),
            ..config.clone()
        }
    }
}

fn execution_time(sec: f64) -> Result<Duration, Error> {
    Duration::try_from_secs_f64(sec).map_err(|e| Error::InvalidExecutionTime(sec, e))
}

fn resolve_relative_path(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_owned();
    }
    match base_path.parent() {
        Some(dir) => dir.join(path),
        None => path.to_owned(),
    }
}
