use std::path::PathBuf;

use snaptree::{
    config::DiffConfig,
    traversal::{SkipList, TraversalPreset},
};

use crate::cli::Cli;

/// Options for one run. Command-line values win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub first: PathBuf,
    pub second: PathBuf,
    pub config_path: Option<PathBuf>,
    pub shallow: bool,
    pub traversal: Option<TraversalPreset>,
    pub skip_folders: Option<Vec<String>>,
}

impl RuntimeConfig {
    pub fn merge(mut self, file_config: DiffConfig) -> Self {
        self.shallow = self.shallow || file_config.shallow.unwrap_or(false);
        self.traversal = self.traversal.or(file_config.traversal);
        self.skip_folders = self.skip_folders.or(file_config.skip_folders);
        self
    }

    pub fn preset(&self) -> TraversalPreset {
        self.traversal.unwrap_or_default()
    }

    pub fn skip_list(&self) -> SkipList {
        self.skip_folders
            .as_ref()
            .map(|names| SkipList::new(names.iter().cloned()))
            .unwrap_or_default()
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            first: cli.first,
            second: cli.second,
            config_path: cli.config,
            shallow: cli.shallow,
            traversal: cli.traversal,
            skip_folders: (!cli.skip.is_empty()).then_some(cli.skip),
        }
    }
}
