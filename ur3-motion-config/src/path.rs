use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::Error;

/// Package whose share directory holds the default positions file.
pub const PACKAGE_NAME: &str = "ur3_motion";
/// Location of the positions file inside the package share directory.
pub const POSITIONS_FILE_IN_SHARE: &str = "config/positions.yaml";

const POSITIONS_PATH_ENV_NAME: &str = "UR3_MOTION_POSITIONS_PATH";
const AMENT_PREFIX_PATH_ENV_NAME: &str = "AMENT_PREFIX_PATH";

/// Returns the positions file to load.
///
/// Precedence: `explicit`, then env `UR3_MOTION_POSITIONS_PATH`, then
/// `<share>/config/positions.yaml` of the `ur3_motion` package found through
/// `AMENT_PREFIX_PATH`.
pub fn resolve_positions_path(explicit: Option<PathBuf>) -> Result<PathBuf, Error> {
    resolve_positions_path_from(
        explicit,
        env::var_os(POSITIONS_PATH_ENV_NAME),
        env::var_os(AMENT_PREFIX_PATH_ENV_NAME),
    )
}

fn resolve_positions_path_from(
    explicit: Option<PathBuf>,
    env_path: Option<OsString>,
    ament_prefix_path: Option<OsString>,
) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        warn!("### ENV VAR {} is used ###", Path::new(&path).display());
        return Ok(PathBuf::from(path));
    }
    let share = find_package_share(PACKAGE_NAME, ament_prefix_path.as_deref())?;
    Ok(share.join(POSITIONS_FILE_IN_SHARE))
}

/// Returns the share directory of an installed ament package.
pub fn package_share_directory(package_name: &str) -> Result<PathBuf, Error> {
    find_package_share(
        package_name,
        env::var_os(AMENT_PREFIX_PATH_ENV_NAME).as_deref(),
    )
}

fn find_package_share(
    package_name: &str,
    ament_prefix_path: Option<&std::ffi::OsStr>,
) -> Result<PathBuf, Error> {
    let prefixes = ament_prefix_path.map(env::split_paths).into_iter().flatten();
    for prefix in prefixes {
        // ament registers every installed package with a marker file.
        let marker = prefix
            .join("share/ament_index/resource_index/packages")
            .join(package_name);
        if marker.exists() {
            let share = prefix.join("share").join(package_name);
            debug!(?share, "found package share directory");
            return Ok(share);
        }
    }
    Err(Error::NoPackageShare(package_name.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn install_package(prefix: &Path) {
        let index = prefix.join("share/ament_index/resource_index/packages");
        fs::create_dir_all(&index).unwrap();
        fs::write(index.join(PACKAGE_NAME), "").unwrap();
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_positions_path_from(
            Some(PathBuf::from("a.yaml")),
            Some("b.yaml".into()),
            None,
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("a.yaml"));
    }

    #[test]
    fn test_env_path() {
        let path = resolve_positions_path_from(None, Some("b.yaml".into()), None).unwrap();
        assert_eq!(path, PathBuf::from("b.yaml"));

        // empty env var is ignored
        let err = resolve_positions_path_from(None, Some("".into()), None).unwrap_err();
        assert!(matches!(err, Error::NoPackageShare(_)));
    }

    #[test]
    fn test_package_share() {
        let empty = tempfile::tempdir().unwrap();
        let installed = tempfile::tempdir().unwrap();
        install_package(installed.path());
        let ament_prefix_path =
            env::join_paths([empty.path(), installed.path()]).unwrap();

        let path = resolve_positions_path_from(None, None, Some(ament_prefix_path)).unwrap();
        assert_eq!(
            path,
            installed
                .path()
                .join("share")
                .join(PACKAGE_NAME)
                .join(POSITIONS_FILE_IN_SHARE)
        );
    }

    #[test]
    fn test_no_package_share() {
        let empty = tempfile::tempdir().unwrap();
        let err = resolve_positions_path_from(None, None, Some(empty.path().into())).unwrap_err();
        assert!(matches!(err, Error::NoPackageShare(name) if name == PACKAGE_NAME));
        assert!(matches!(
            resolve_positions_path_from(None, None, None),
            Err(Error::NoPackageShare(_))
        ));
    }
}
