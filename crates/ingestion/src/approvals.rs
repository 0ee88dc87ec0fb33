//! Approval extraction.
//!
//! Four independent sources contribute approvals:
//! 1. pending approvals (document root, or `metamask` when present)
//! 2. the mobile `ApprovalController` pending map
//! 3. mobile `PermissionController` subjects, fanned out per permission
//! 4. the legacy extension `permissionHistory`, fanned out per permission
//!
//! Contributions are concatenated without cross-source de-duplication and
//! sorted newest first.

use crate::collection::entries_at;
use crate::value::{as_nonzero_timestamp, as_text, as_timestamp};
use serde_json::{json, Map, Value};
use statelog_core::config::MissingTimestamp;
use statelog_core::resolver::lookup;
use statelog_core::{Approval, SourceKind, StateLog, TimestampMs};
use tracing::{debug, info};

const MOBILE_PENDING: [&str; 4] = [
    "engine",
    "backgroundState",
    "ApprovalController",
    "pendingApprovals",
];
const MOBILE_SUBJECTS: [&str; 4] = [
    "engine",
    "backgroundState",
    "PermissionController",
    "subjects",
];

/// Timestamp given to approvals that carry none, per the configured policy.
/// The clock is sampled here, once per derivation.
pub fn missing_timestamp_fallback(policy: MissingTimestamp) -> TimestampMs {
    match policy {
        MissingTimestamp::Zero => 0,
        MissingTimestamp::ExtractionTime => chrono::Utc::now().timestamp_millis(),
    }
}

/// Extract every approval in the document. Approvals without a timestamp
/// are stamped with `missing_ts`.
pub fn extract_approvals(log: &StateLog, missing_ts: TimestampMs) -> Vec<Approval> {
    let mut approvals = Vec::new();

    approvals.extend(pending_approvals(log, missing_ts));
    approvals.extend(mobile_pending_approvals(log, missing_ts));
    approvals.extend(permission_subjects(log, missing_ts));
    approvals.extend(permission_history(log));

    approvals.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
    info!(count = approvals.len(), "extracted approvals");
    approvals
}

/// The map holding extension-layout data: the `metamask` object when the
/// document has one, otherwise the document root.
fn extension_scope(log: &StateLog) -> &Value {
    log.metamask().unwrap_or_else(|| log.raw())
}

fn pending_entry(id: &str, raw: &Value, missing_ts: TimestampMs, kind: SourceKind) -> Approval {
    Approval {
        id: id.to_string(),
        origin: as_text(raw.get("origin")),
        approval_type: as_text(raw.get("type")),
        timestamp_ms: as_timestamp(raw.get("time")).unwrap_or(missing_ts),
        request_data: raw
            .get("requestData")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        source_kind: kind,
    }
}

fn pending_approvals(log: &StateLog, missing_ts: TimestampMs) -> Vec<Approval> {
    entries_at(extension_scope(log).get("pendingApprovals"), "pendingApprovals")
        .into_iter()
        .filter(|(_, raw)| raw.is_object())
        .map(|(id, raw)| pending_entry(id, raw, missing_ts, SourceKind::Extension))
        .collect()
}

fn mobile_pending_approvals(log: &StateLog, missing_ts: TimestampMs) -> Vec<Approval> {
    entries_at(lookup(log.raw(), &MOBILE_PENDING), "ApprovalController.pendingApprovals")
        .into_iter()
        .filter(|(_, raw)| raw.is_object())
        .map(|(id, raw)| pending_entry(id, raw, missing_ts, SourceKind::Mobile))
        .collect()
}

fn permission_subjects(log: &StateLog, missing_ts: TimestampMs) -> Vec<Approval> {
    let mut approvals = Vec::new();

    for (subject, data) in entries_at(lookup(log.raw(), &MOBILE_SUBJECTS), "PermissionController.subjects") {
        let Some(permissions) = data.get("permissions").and_then(Value::as_object) else {
            continue;
        };
        let origin = as_text(data.get("origin")).unwrap_or_else(|| subject.clone());

        for (permission, details) in permissions {
            if !details.is_object() {
                continue;
            }
            let capability = as_text(details.get("parentCapability"))
                .unwrap_or_else(|| permission.clone());
            let caveats = details
                .get("caveats")
                .filter(|c| !c.is_null())
                .cloned()
                .unwrap_or_else(|| json!([]));

            approvals.push(Approval {
                id: format!("{subject}-{permission}"),
                origin: Some(origin.clone()),
                approval_type: Some(capability.clone()),
                timestamp_ms: as_nonzero_timestamp(details.get("date")).unwrap_or(missing_ts),
                request_data: json!({"permission": capability, "caveats": caveats}),
                source_kind: SourceKind::Mobile,
            });
        }
    }

    debug!(count = approvals.len(), "fanned out permission subjects");
    approvals
}

fn permission_history(log: &StateLog) -> Vec<Approval> {
    let mut approvals = Vec::new();

    for (origin, permissions) in entries_at(extension_scope(log).get("permissionHistory"), "permissionHistory") {
        let Some(permissions) = permissions.as_object() else {
            continue;
        };
        for (permission, details) in permissions {
            // Only permissions that were actually approved count.
            let Some(approved_at) = as_nonzero_timestamp(details.get("lastApproved")) else {
                continue;
            };
            let accounts = details
                .get("accounts")
                .filter(|a| !a.is_null())
                .cloned()
                .unwrap_or_else(|| json!([]));

            approvals.push(Approval {
                id: format!("{origin}-{permission}"),
                origin: Some(origin.clone()),
                approval_type: Some(permission.clone()),
                timestamp_ms: approved_at,
                request_data: json!({"permission": permission, "accounts": accounts}),
                source_kind: SourceKind::Extension,
            });
        }
    }

    debug!(count = approvals.len(), "fanned out permission history");
    approvals
}
