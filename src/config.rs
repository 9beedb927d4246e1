// Tue Aug 04 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub pid_filter: Option<u32>,
    pub dump_target: Option<Address>,
    pub dump_all: bool,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pid_filter: None,
            dump_target: None,
            dump_all: false,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pid_filter(mut self, pid: u32) -> Self {
        self.pid_filter = Some(pid);
        self
    }

    pub fn with_dump_target(mut self, target: Address) -> Self {
        self.dump_target = Some(target);
        self
    }

    pub fn with_dump_all(mut self, dump_all: bool) -> Self {
        self.dump_all = dump_all;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.dump_target.is_some() && self.dump_all {
            return Err("dump_target and dump_all are mutually exclusive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        let config = Config::default()
            .with_dump_target(Address::new(0x1000))
            .with_dump_all(true);
        assert!(config.validate().is_err());
    }
}
