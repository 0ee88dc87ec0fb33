//! Settings variables of interest for a security review.
//!
//! Each setting is resolved along the generic priority chain, extended with
//! the controller paths mobile exports use for that particular setting.

use regex::Regex;
use serde_json::Value;
use statelog_core::resolver::{generic_chain, resolve_chain_with_path, FieldPath};
use statelog_core::{SettingsVariable, StateLog, ValueKind};
use std::sync::OnceLock;
use tracing::debug;

/// Millisecond timestamps are larger than this.
pub const MILLIS_THRESHOLD: f64 = 1_000_000_000_000.0;
/// Second timestamps are larger than this.
pub const SECONDS_THRESHOLD: f64 = 1_000_000_000.0;

fn date_like_re() -> &'static Regex {
    static DATE_LIKE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_LIKE_RE.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}|\d+T\d+").expect("valid date regex"))
}

/// Whether a string looks like a date (`2024-01-31`, `...10T12...`).
pub fn looks_like_date(s: &str) -> bool {
    date_like_re().is_match(s)
}

/// Classify a raw setting value.
pub fn value_kind_of(value: Option<&Value>) -> ValueKind {
    match value {
        Some(Value::Bool(_)) => ValueKind::Boolean,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f > SECONDS_THRESHOLD => ValueKind::Date,
            _ => ValueKind::Number,
        },
        Some(Value::String(s)) if looks_like_date(s) => ValueKind::Date,
        _ => ValueKind::String,
    }
}

/// A logical setting and where to look for it.
#[derive(Debug, Clone)]
pub struct SettingSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub chain: Vec<FieldPath>,
}

impl SettingSpec {
    fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            chain: generic_chain(id),
        }
    }

    fn or_controller(mut self, controller: &str, field: &str) -> Self {
        self.chain.push(FieldPath::controller(controller, field));
        self
    }

    fn or_path<const N: usize>(mut self, segments: [&str; N]) -> Self {
        self.chain.push(FieldPath::new(segments));
        self
    }

    /// Resolve this setting in `log`.
    pub fn resolve(&self, log: &StateLog) -> SettingsVariable {
        let found = resolve_chain_with_path(log.raw(), &self.chain);
        match found {
            Some((_, path)) => debug!(setting = self.id, %path, "resolved setting"),
            None => debug!(setting = self.id, "setting not available"),
        }
        let raw_value = found.map(|(value, _)| value.clone());
        SettingsVariable {
            id: self.id.to_string(),
            label: self.label.to_string(),
            value_kind: value_kind_of(raw_value.as_ref()),
            raw_value,
        }
    }
}

/// The settings shown for every state log, in display order.
pub fn setting_specs() -> Vec<SettingSpec> {
    vec![
        SettingSpec::new("submittedTime", "Submitted Time")
            .or_controller("AppStateController", "lastActiveTime")
            .or_controller("PreferencesController", "lastUserActivityTime"),
        SettingSpec::new("seedphraseBackedUp", "Seedphrase Backed Up")
            .or_controller("BackupController", "seedphraseBackedUp"),
        SettingSpec::new("automaticSecurityChecksEnabled", "Automatic Security Checks Enabled")
            .or_controller("SecurityController", "automaticSecurityChecksEnabled"),
        SettingSpec::new("securityAlertsEnabled", "Security Alerts Enabled")
            .or_controller("SecurityController", "securityAlertsEnabled"),
        SettingSpec::new("isProfileSyncingEnabled", "Profile Syncing Enabled")
            .or_controller("SyncController", "isProfileSyncingEnabled"),
        SettingSpec::new("isProfileSyncingUpdateLoading", "Profile Syncing Update Loading")
            .or_controller("SyncController", "isProfileSyncingUpdateLoading"),
        SettingSpec::new(
            "hasAccountSyncingSyncedAtLeastOnce",
            "Account Syncing Has Synced At Least Once",
        )
        .or_controller("SyncController", "hasAccountSyncingSyncedAtLeastOnce"),
        SettingSpec::new("version", "MetaMask Version")
            .or_path(["engine", "backgroundState", "PreferencesController", "metamask", "version"])
            .or_path(["engine", "backgroundState", "AppStateController", "versions", "metamask"]),
    ]
}

/// Resolve every setting, followed by the derived app type.
pub fn extract_settings(log: &StateLog) -> Vec<SettingsVariable> {
    let mut settings: Vec<SettingsVariable> =
        setting_specs().iter().map(|spec| spec.resolve(log)).collect();

    let app_type = if log.is_mobile() { "Mobile App" } else { "Browser Extension" };
    settings.push(SettingsVariable {
        id: "isMobileApp".to_string(),
        label: "App Type".to_string(),
        raw_value: Some(Value::String(app_type.to_string())),
        value_kind: ValueKind::String,
    });

    settings
}
