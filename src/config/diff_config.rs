use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::{ext::PathExt, traversal::TraversalPreset, tree::TreeError};

pub const CONFIG_FILE_NAME: &str = "snaptree.yaml";

/// Diff options read from a YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffConfig {
    pub skip_folders: Option<Vec<String>>,
    pub traversal: Option<TraversalPreset>,
    pub shallow: Option<bool>,
}

fn key<'a>(name: &'a str) -> Yaml<'a> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

/// Null or missing keys are treated the same.
fn lookup<'m, 'a>(top_level: &'m LinkedHashMap<Yaml<'a>, Yaml<'a>>, name: &'a str) -> Option<&'m Yaml<'a>> {
    top_level
        .get(&key(name))
        .filter(|value| !matches!(value, Yaml::Value(Scalar::Null)))
}

impl DiffConfig {
    /// Reads `snaptree.yaml` from `root`, falling back to defaults when it does not exist.
    pub fn read_or_default(root: &Path) -> Result<Self, ConfigCreationError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(
                "No config file at {}, using defaults",
                path.best_effort_path_display()
            );
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    pub fn from_path(path: PathBuf) -> Result<Self, ConfigCreationError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(&path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    fn parse_skip_folders(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Option<Vec<String>>, ConfigCreationError> {
        let Some(value) = lookup(top_level, "skip_folders") else {
            return Ok(None);
        };
        let items = value.as_sequence().context(InvalidValueSnafu {
            key: "skip_folders",
            expected: "a list of folder names",
        })?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).context(InvalidValueSnafu {
                    key: "skip_folders",
                    expected: "a list of folder names",
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn parse_traversal(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Option<TraversalPreset>, ConfigCreationError> {
        let Some(value) = lookup(top_level, "traversal") else {
            return Ok(None);
        };
        let name = value.as_str().context(InvalidValueSnafu {
            key: "traversal",
            expected: "a traversal name",
        })?;
        name.parse::<TraversalPreset>().context(TraversalSnafu).map(Some)
    }

    fn parse_shallow(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Option<bool>, ConfigCreationError> {
        match lookup(top_level, "shallow") {
            None => Ok(None),
            Some(Yaml::Value(Scalar::Boolean(flag))) => Ok(Some(*flag)),
            Some(_) => InvalidValueSnafu {
                key: "shallow",
                expected: "true or false",
            }
            .fail(),
        }
    }
}

impl TryFrom<&str> for DiffConfig {
    type Error = ConfigCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let contents = contents_vec
            .first()
            .ok_or(ConfigCreationError::MalformedConfig)?;

        let top_level = contents
            .as_mapping()
            .ok_or(ConfigCreationError::TopLevelNotMap)?;

        Ok(DiffConfig {
            skip_folders: Self::parse_skip_folders(top_level)?,
            traversal: Self::parse_traversal(top_level)?,
            shallow: Self::parse_shallow(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigCreationError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'{}' should be {}", key, expected))]
    InvalidValueError { key: String, expected: String },
    #[snafu(display("Invalid traversal in config"))]
    TraversalError { source: TreeError },
}
