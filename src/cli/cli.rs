use std::path::PathBuf;

use clap::Parser;
use snaptree::traversal::TraversalPreset;

use crate::application::data::LogLevel;

/// Compare two folder snapshots and report unchanged, renamed, modified and
/// one-sided files.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    pub first: PathBuf,
    pub second: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Compare only the direct files of both folders
    #[clap(long)]
    pub shallow: bool,

    /// How files are gathered: default, dfs-files or bfs-files
    #[clap(long, short)]
    pub traversal: Option<TraversalPreset>,

    /// Folder name never descended into; repeat to list several. Replaces the defaults
    #[clap(long = "skip", value_name = "NAME")]
    pub skip: Vec<String>,

    /// Config file, `snaptree.yaml` in the working directory when omitted
    #[clap(long, short)]
    pub config: Option<PathBuf>,
}
