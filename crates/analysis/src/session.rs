//! Explorer session.
//!
//! Holds the most recently loaded state log together with its report.
//! Loading replaces both wholesale.

use crate::engine::{ReportEngine, StateLogReport};
use statelog_core::{Config, Result, StateLog};
use std::path::Path;
use tracing::info;

/// The currently loaded state log and its derived views.
#[derive(Debug)]
pub struct Session {
    engine: ReportEngine,
    loaded: Option<(StateLog, StateLogReport)>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: ReportEngine::new(config),
            loaded: None,
        }
    }

    /// Replace the current document and recompute every view.
    pub fn load(&mut self, log: StateLog) -> &StateLogReport {
        let report = self.engine.build(&log);
        let (_, report) = self.loaded.insert((log, report));
        report
    }

    /// Read, parse and load a file. On failure the previous document stays
    /// loaded.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<&StateLogReport> {
        let log = StateLog::from_path(path)?;
        Ok(self.load(log))
    }

    /// Discard the current document.
    pub fn reset(&mut self) {
        if self.loaded.take().is_some() {
            info!("session reset");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn document(&self) -> Option<&StateLog> {
        self.loaded.as_ref().map(|(log, _)| log)
    }

    pub fn report(&self) -> Option<&StateLogReport> {
        self.loaded.as_ref().map(|(_, report)| report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use statelog_core::Error;
    use std::io::Write;

    #[test]
    fn test_load_replaces_previous() {
        let mut session = Session::new(&Config::default());
        session.load(StateLog::new(json!({"transactions": [{"id": "a"}]})));
        assert_eq!(session.report().unwrap().transactions.len(), 1);

        let report = session.load(StateLog::new(json!({})));
        assert!(report.transactions.is_empty());
        assert_eq!(session.document().unwrap().raw(), &json!({}));
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new(&Config::default());
        session.load(StateLog::new(json!({})));
        assert!(session.is_loaded());
        session.reset();
        assert!(!session.is_loaded());
        assert!(session.report().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let mut session = Session::new(&Config::default());
        session.load(StateLog::new(json!({"transactions": [{"id": "a"}]})));
        let err = session.load_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
        assert_eq!(session.report().unwrap().transactions.len(), 1);
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"metamask": {"accounts": {"0x1": "0x0"}}}"#).unwrap();

        let mut session = Session::new(&Config::default());
        let report = session.load_path(file.path()).unwrap();
        assert_eq!(report.accounts.len(), 1);
    }
}
