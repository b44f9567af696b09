//! Directory configuration resolved from the environment.

use std::env;
use std::path::PathBuf;

pub const LOG_DIR_VAR: &str = "MATMUL_LOG_DIR";
pub const RESOURCES_DIR_VAR: &str = "MATMUL_RESOURCES_DIR";

const DEFAULT_LOG_DIR: &str = "./generated/log";
const DEFAULT_RESOURCES_DIR: &str = "./generated/resources";
const CALC_TIME_LOG: &str = "calc_time_log";
const GENERATE_TIME_LOG: &str = "generate_matrix_files_log.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_dir: PathBuf,
    pub resources_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for
    /// missing or empty values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map_or_else(|| PathBuf::from(default), PathBuf::from)
        };
        Self {
            log_dir: dir(LOG_DIR_VAR, DEFAULT_LOG_DIR),
            resources_dir: dir(RESOURCES_DIR_VAR, DEFAULT_RESOURCES_DIR),
        }
    }

    pub fn calc_time_log(&self) -> PathBuf {
        self.log_dir.join(CALC_TIME_LOG)
    }

    pub fn generate_time_log(&self) -> PathBuf {
        self.log_dir.join(GENERATE_TIME_LOG)
    }

    pub fn resource(&self, name: &str) -> PathBuf {
        self.resources_dir.join(name)
    }
}
