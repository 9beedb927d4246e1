// Tue Aug 04 2026 - Alex

use crate::process::{ProcessContext, ProcessError};
use std::fs::File;
use std::path::Path;

pub trait ProcessSource: Send + Sync {
    fn list(&self) -> Result<Vec<ProcessContext>, ProcessError>;

    fn list_matching(&self, pid: Option<u32>) -> Result<Vec<ProcessContext>, ProcessError> {
        let mut processes = self.list()?;
        if let Some(pid) = pid {
            processes.retain(|p| p.pid() == pid);
        }
        Ok(processes)
    }
}

// Process inventory produced by an external enumeration pass over the same
// snapshot, persisted as a JSON manifest next to it.
pub struct ManifestProcessSource {
    processes: Vec<ProcessContext>,
}

impl ManifestProcessSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProcessError> {
        let file = File::open(path)?;
        let processes = serde_json::from_reader(file)?;
        Ok(Self { processes })
    }

    pub fn from_contexts(processes: Vec<ProcessContext>) -> Self {
        Self { processes }
    }
}

impl ProcessSource for ManifestProcessSource {
    fn list(&self) -> Result<Vec<ProcessContext>, ProcessError> {
        Ok(self.processes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Address;

    fn sample() -> ManifestProcessSource {
        ManifestProcessSource::from_contexts(vec![
            ProcessContext::new(4, "System", Address::new(0x1000), 1),
            ProcessContext::new(1234, "notepad.exe", Address::new(0x2000), 2),
        ])
    }

    #[test]
    fn test_list_returns_all() {
        assert_eq!(sample().list().unwrap().len(), 2);
    }

    #[test]
    fn test_pid_filter() {
        let matched = sample().list_matching(Some(1234)).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name(), "notepad.exe");

        assert!(sample().list_matching(Some(99)).unwrap().is_empty());
        assert_eq!(sample().list_matching(None).unwrap().len(), 2);
    }

    #[test]
    fn test_manifest_round_trip() {
        let json = serde_json::to_string(&sample().list().unwrap()).unwrap();
        let parsed: Vec<ProcessContext> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1].heap_handles(), Address::new(0x2000));
        assert_eq!(parsed[1].heap_count(), 2);
    }
}
