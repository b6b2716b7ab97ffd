use std::path::PathBuf;

use crate::character::record::Slot;
use crate::rules::compatibility::RestrictionPolicy;

pub const DEFAULT_DB_PATH: &str = "./shanmei_slots.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorConfig {
    pub db_path: PathBuf,
    /// Directory with races/factions/classes JSON; bundled tables when unset.
    pub data_dir: Option<PathBuf>,
    pub slot: Slot,
    pub policy: RestrictionPolicy,
    /// Keep slots in memory instead of the SQLite file.
    pub in_memory: bool,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            data_dir: None,
            slot: Slot::default(),
            policy: RestrictionPolicy::default(),
            in_memory: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => write!(f, "{} needs a value", flag),
            ConfigError::InvalidValue { flag, message } => write!(f, "{}: {}", flag, message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reads flags from the process arguments; the first element is the program
/// name. Unrecognised arguments are ignored.
pub fn parse_args(args: &[String]) -> Result<CreatorConfig, ConfigError> {
    let mut config = CreatorConfig::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => {
                let value = iter.next().ok_or(ConfigError::MissingValue("--db"))?;
                config.db_path = PathBuf::from(value);
            }
            "--data" => {
                let value = iter.next().ok_or(ConfigError::MissingValue("--data"))?;
                config.data_dir = Some(PathBuf::from(value));
            }
            "--slot" => {
                let value = iter.next().ok_or(ConfigError::MissingValue("--slot"))?;
                config.slot = value
                    .parse()
                    .map_err(|message| ConfigError::InvalidValue {
                        flag: "--slot",
                        message,
                    })?;
            }
            "--policy" => {
                let value = iter.next().ok_or(ConfigError::MissingValue("--policy"))?;
                config.policy = value
                    .parse()
                    .map_err(|message| ConfigError::InvalidValue {
                        flag: "--policy",
                        message,
                    })?;
            }
            "--enforce" => config.policy = RestrictionPolicy::Enforce,
            "--memory" => config.in_memory = true,
            _ => {}
        }
    }
    Ok(config)
}
