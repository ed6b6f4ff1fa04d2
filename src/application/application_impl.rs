use std::path::Path;

use snafu::Snafu;
use snafu::prelude::*;
use snaptree::{
    config::{ConfigCreationError, DiffConfig},
    ext::PathExt,
    tree::{FolderNode, TreeError},
};
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::{RuntimeConfig, report::render_report};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let file_config = match &app_config.config_path {
            Some(path) => DiffConfig::from_path(path.clone()),
            None => DiffConfig::read_or_default(Path::new(".")),
        }
        .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", file_config);

        let app_config = app_config.merge(file_config);
        debug!("Runtime config: {:?}", app_config);

        let first = FolderNode::new(&app_config.first).context(SnapshotSnafu {
            path: app_config.first.best_effort_path_display(),
        })?;
        let second = FolderNode::new(&app_config.second).context(SnapshotSnafu {
            path: app_config.second.best_effort_path_display(),
        })?;

        let diff = if app_config.shallow {
            first.compare_files_shallow(&second)
        } else {
            first.compare(&second, app_config.preset().decider(app_config.skip_list()))
        }
        .context(DiffSnafu)?;
        info!("Diff summary: {}", diff.stats());

        colored::control::set_override(supports_color::on(Stream::Stdout).is_some());
        print!("{}", render_report(&diff, &first, &second));

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigCreationError },
    #[snafu(display("Could not take a snapshot of {}", path))]
    SnapshotError { path: String, source: TreeError },
    #[snafu(display("Critical failure encountered while diffing"))]
    DiffError { source: TreeError },
}
