use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, error};

use crate::Error;

/// One record of the positions file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedPositionEntry {
    /// Joint angles in degrees.
    joint_positions: Vec<f64>,
}

/// Named joint positions, in radians, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedPositions {
    positions: IndexMap<String, Vec<f64>>,
}

impl NamedPositions {
    /// Loads a positions file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!(?path, "loading named positions");
        let s = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NoFile(path.to_owned(), e),
            _ => Error::ReadFailure(path.to_owned(), e),
        })?;
        Self::from_yaml_str(&s, path)
    }

    /// Loads a positions file, or returns an empty set if it cannot be loaded.
    ///
    /// The failure is logged. Use [`load`](Self::load) to tell a broken file
    /// apart from a position that is not defined.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(positions) => positions,
            Err(e) => {
                error!("Failed to load joint positions: {e}");
                Self::default()
            }
        }
    }

    /// Parses a positions document. `path` is only used in error messages.
    pub fn from_yaml_str(s: &str, path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let entries: IndexMap<String, NamedPositionEntry> =
            serde_yaml::from_str(s).map_err(|e| Error::YamlParseFailure(path.to_owned(), e))?;

        let mut positions = IndexMap::with_capacity(entries.len());
        for (name, entry) in entries {
            if let Some((index, &value)) = entry
                .joint_positions
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite())
            {
                return Err(Error::NonFiniteJointPosition {
                    path: PathBuf::from(path),
                    name,
                    index,
                    value,
                });
            }
            let radians = entry
                .joint_positions
                .iter()
                .map(|degrees| degrees.to_radians())
                .collect();
            positions.insert(name, radians);
        }
        debug!(?path, names = ?positions.keys().collect::<Vec<_>>(), "loaded named positions");
        Ok(Self { positions })
    }

    /// Returns the joint positions (radians) of `name`.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.positions.get(name).map(Vec::as_slice)
    }

    /// Returns the joint positions of `name` converted back to degrees.
    pub fn get_degrees(&self, name: &str) -> Option<Vec<f64>> {
        self.get(name)
            .map(|radians| radians.iter().map(|r| r.to_degrees()).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.positions
            .iter()
            .map(|(name, positions)| (name.as_str(), positions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Collects positions that are already in radians.
impl FromIterator<(String, Vec<f64>)> for NamedPositions {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
