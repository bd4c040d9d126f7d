//! Run report
//!
//! Counts what a run did and keeps every downgraded failure, so callers get
//! more than a boolean back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Where in a device's processing an issue arose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Reading from the NMS
    Source,
    /// Required fields missing
    Validation,
    /// Role, manufacturer, device type, platform or site
    Dependency,
    /// Device create or update
    Device,
    /// Management interface
    Interface,
    /// Management IP address
    IpAddress,
    /// IP to interface binding
    Assignment,
    /// Device primary IPv4
    PrimaryIp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Source => "source",
            Stage::Validation => "validation",
            Stage::Dependency => "dependency",
            Stage::Device => "device",
            Stage::Interface => "interface",
            Stage::IpAddress => "ip-address",
            Stage::Assignment => "assignment",
            Stage::PrimaryIp => "primary-ip",
        };
        f.write_str(name)
    }
}

/// One failure that was logged and skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncIssue {
    /// Device name, or NMS device id when the name is unknown
    pub device: String,
    /// Stage that failed
    pub stage: Stage,
    /// What was logged
    pub message: String,
}

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Set by `finish`
    pub finished_at: Option<DateTime<Utc>>,
    /// Device ids the group resolved to
    pub devices_seen: usize,
    /// Devices that reached the end of the interface/IP stage
    pub devices_reconciled: usize,
    /// Devices dropped before any NetBox write (unreadable or incomplete)
    pub devices_skipped: usize,
    /// NetBox objects created
    pub created: usize,
    /// NetBox objects patched
    pub updated: usize,
    /// Every failure that was logged and skipped
    pub issues: Vec<SyncIssue>,
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncReport {
    /// Empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            devices_seen: 0,
            devices_reconciled: 0,
            devices_skipped: 0,
            created: 0,
            updated: 0,
            issues: Vec::new(),
        }
    }

    /// Keep a failure against `device`
    pub fn record_issue(&mut self, device: &str, stage: Stage, message: impl Into<String>) {
        self.issues.push(SyncIssue {
            device: device.to_string(),
            stage,
            message: message.into(),
        });
    }

    /// Issues recorded against one device
    pub fn issues_for<'a>(&'a self, device: &'a str) -> impl Iterator<Item = &'a SyncIssue> + 'a {
        self.issues.iter().filter(move |issue| issue.device == device)
    }

    /// No issues recorded
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Overall result of the run; issues only count with `fail_on_errors`
    pub fn succeeded(&self, fail_on_errors: bool) -> bool {
        !fail_on_errors || self.is_clean()
    }

    /// Stamp the end time and log the one-line summary
    pub fn finish(&mut self) {
        let finished_at = Utc::now();
        self.finished_at = Some(finished_at);
        let elapsed_ms = (finished_at - self.started_at).num_milliseconds();

        if self.is_clean() {
            info!(
                "Sync finished in {}ms: {} devices seen, {} reconciled, {} skipped, {} created, {} updated",
                elapsed_ms, self.devices_seen, self.devices_reconciled, self.devices_skipped, self.created, self.updated
            );
        } else {
            warn!(
                "Sync finished in {}ms with {} issues: {} devices seen, {} reconciled, {} skipped, {} created, {} updated",
                elapsed_ms, self.issues.len(), self.devices_seen, self.devices_reconciled, self.devices_skipped, self.created, self.updated
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_flag_ignores_issues_by_default() {
        let mut report = SyncReport::new();
        assert!(report.succeeded(true));

        report.record_issue("sw1", Stage::Device, "rejected");
        assert!(report.succeeded(false));
        assert!(!report.succeeded(true));
    }

    #[test]
    fn test_issues_for_filters_by_device() {
        let mut report = SyncReport::new();
        report.record_issue("sw1", Stage::Validation, "missing required fields: mgmtIntf");
        report.record_issue("sw2", Stage::IpAddress, "rejected");

        let sw1: Vec<_> = report.issues_for("sw1").collect();
        assert_eq!(sw1.len(), 1);
        assert_eq!(sw1[0].stage, Stage::Validation);
    }

    #[test]
    fn test_finish_stamps_end_time() {
        let mut report = SyncReport::new();
        report.finish();
        let finished_at = report.finished_at.unwrap();
        assert!(finished_at >= report.started_at);
    }
}
