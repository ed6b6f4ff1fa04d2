mod diff_config;

pub use diff_config::{CONFIG_FILE_NAME, ConfigCreationError, DiffConfig};
