use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("ur3-motion-config: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("ur3-motion-config: Failed to read {:?} ({}).", .0, .1)]
    ReadFailure(PathBuf, #[source] std::io::Error),
    #[error("ur3-motion-config: Failed to parse {:?} as yaml ({}).", .0, .1)]
    YamlParseFailure(PathBuf, #[source] serde_yaml::Error),
    #[error(
        "ur3-motion-config: Joint position {} of {:?} in {:?} is not finite ({}).",
        index,
        name,
        path,
        value
    )]
    NonFiniteJointPosition {
        path: PathBuf,
        name: String,
        index: usize,
        value: f64,
    },
    #[error("ur3-motion-config: No share directory of package {:?} is found in AMENT_PREFIX_PATH.", .0)]
    NoPackageShare(String),
}
