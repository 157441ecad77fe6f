use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("ur3-motion: Failed to load joint positions ({}).", .0)]
    ConfigLoad(#[from] ur3_motion_config::Error),
    #[error("ur3-motion: Position '{}' not found!", .0)]
    PositionNotFound(String),
    #[error("ur3-motion: ur3-arci: {}", .0)]
    Arci(#[from] ur3_arci::Error),
    #[error("ur3-motion: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("ur3-motion: Failed to read {:?} ({}).", .0, .1)]
    ReadFailure(PathBuf, #[source] std::io::Error),
    #[error("ur3-motion: Invalid execution_time_sec {} ({}).", .0, .1)]
    InvalidExecutionTime(f64, #[source] std::time::TryFromFloatSecsError),
    #[error("ur3-motion: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("ur3-motion: Config {} requires ros2 feature.", .0)]
    ConfigRequireRos2(String),
}
