//! The raw state-log document and its load boundary.
//!
//! A state log is an arbitrary JSON value. Nothing about its shape is
//! guaranteed, so the accessors here only answer "is this path an object"
//! and leave every other interpretation to the extractors.

use crate::error::{Error, Result};
use crate::resolver::lookup;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Key of the nested desktop-extension state.
pub const METAMASK_KEY: &str = "metamask";

/// Path to the mobile controller states.
pub const BACKGROUND_STATE: [&str; 2] = ["engine", "backgroundState"];

/// An immutable, parsed state-log export.
#[derive(Debug, Clone, PartialEq)]
pub struct StateLog {
    raw: Value,
}

impl StateLog {
    /// Wrap an already-decoded JSON value.
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Parse a state log from bytes. Blank input is rejected as a data
    /// error rather than a JSON error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::data("state log is empty"));
        }
        let raw: Value = serde_json::from_slice(bytes)?;
        debug!(bytes = bytes.len(), "parsed state log");
        Ok(Self::new(raw))
    }

    /// Parse a state log from a reader. Read failures and parse failures are
    /// reported as distinct errors.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_slice(&buf)
    }

    /// Load a state log from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading state log");
        let bytes = fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// The untouched document, for raw views.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The nested `metamask` object of desktop-extension exports.
    pub fn metamask(&self) -> Option<&Value> {
        self.raw.get(METAMASK_KEY).filter(|v| v.is_object())
    }

    /// Whether the document nests its state under `metamask`.
    pub fn has_metamask(&self) -> bool {
        self.metamask().is_some()
    }

    /// `engine.backgroundState` of mobile exports.
    pub fn background_state(&self) -> Option<&Value> {
        lookup(&self.raw, &BACKGROUND_STATE).filter(|v| v.is_object())
    }

    /// A named mobile controller under `engine.backgroundState`.
    pub fn controller(&self, name: &str) -> Option<&Value> {
        self.background_state()
            .and_then(|state| state.get(name))
            .filter(|v| v.is_object())
    }

    /// Mobile exports are recognised by the presence of `engine.backgroundState`.
    pub fn is_mobile(&self) -> bool {
        self.background_state().is_some()
    }

    /// Indented JSON of the raw document.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

impl FromStr for StateLog {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

impl From<Value> for StateLog {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_invalid_json() {
        let err = "{not json".parse::<StateLog>().unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
    }

    #[test]
    fn test_blank_input_is_data_error() {
        let err = StateLog::from_slice(b"  \n").unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_from_path_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StateLog::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }

    #[test]
    fn test_from_path_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"metamask": {"accounts": {}}}"#).unwrap();

        let log = StateLog::from_path(&path).unwrap();
        assert!(log.has_metamask());
        assert!(!log.is_mobile());
    }

    #[test]
    fn test_mobile_detection() {
        let log = StateLog::new(json!({
            "engine": {"backgroundState": {"PreferencesController": {}}}
        }));
        assert!(log.is_mobile());
        assert!(log.controller("PreferencesController").is_some());
        assert!(log.controller("NetworkController").is_none());
    }

    #[test]
    fn test_non_object_metamask_is_ignored() {
        let log = StateLog::new(json!({"metamask": "oops"}));
        assert!(!log.has_metamask());

        let log = StateLog::new(json!([1, 2, 3]));
        assert!(!log.has_metamask());
        assert!(!log.is_mobile());
    }
}
