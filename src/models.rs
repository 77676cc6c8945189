//! Data model for targets, analysis results, and links.
//!
//! A [`Target`] is a tracked page address; each analysis run may append one
//! [`AnalysisResult`] with its ordered list of [`Link`] records. The target's
//! status field is the single source of truth for whether an in-flight run
//! should continue, so it is always re-read from the store, never cached.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle status of a target.
///
/// `queued → running → {done | error | stopped}`; the terminal states last
/// until a new run claims the target or its address is updated (which resets
/// it to `queued`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    /// Registered, waiting for an analysis run.
    Queued,
    /// An analysis run is in flight.
    Running,
    /// The last run completed and persisted a result.
    Done,
    /// The last run failed (fetch, parse, or persist).
    Error,
    /// A stop was requested and observed; no result was persisted.
    Stopped,
}

/// A tracked page subject to analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    /// Row id.
    pub id: i64,
    /// Unique page address.
    pub address: String,
    /// Current lifecycle status.
    pub status: TargetStatus,
    /// Creation time, epoch milliseconds.
    pub created_at_ms: i64,
    /// Last status/address change, epoch milliseconds.
    pub updated_at_ms: i64,
}

/// Occurrence counts for heading levels `<h1>` through `<h6>`.
///
/// Persisted as a JSON column on the analysis result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    /// `<h1>` count.
    pub h1: u32,
    /// `<h2>` count.
    pub h2: u32,
    /// `<h3>` count.
    pub h3: u32,
    /// `<h4>` count.
    pub h4: u32,
    /// `<h5>` count.
    pub h5: u32,
    /// `<h6>` count.
    pub h6: u32,
}

impl HeadingCounts {
    /// Increments the count for a heading level (1..=6). Other values are
    /// ignored.
    pub fn record(&mut self, level: u8) {
        match level {
            1 => self.h1 += 1,
            2 => self.h2 += 1,
            3 => self.h3 += 1,
            4 => self.h4 += 1,
            5 => self.h5 += 1,
            6 => self.h6 += 1,
            _ => {}
        }
    }

    /// Total headings across all levels.
    pub fn total(&self) -> u32 {
        self.h1 + self.h2 + self.h3 + self.h4 + self.h5 + self.h6
    }
}

/// One outbound link observed during an analysis run.
///
/// Owned by its parent analysis result; deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The reference exactly as it appeared in markup.
    pub href: String,
    /// Whether the reference resolved inside the target's own origin.
    pub internal: bool,
    /// Whether the probe marked this link broken.
    pub broken: bool,
    /// Observed HTTP status code; 0 if the probe could not be attempted.
    pub http_status: i64,
}

/// A finished analysis produced by the engine, ready to persist.
///
/// Counts are derived from `links`: internal + external equals the number of
/// link entries and broken never exceeds it.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    /// HTML version classification ("HTML5", "HTML4 or older", "unknown").
    pub html_version: String,
    /// Text of the first `<title>` element, empty if absent.
    pub title: String,
    /// Heading occurrence counts.
    pub headings: HeadingCounts,
    /// Count of links classified internal.
    pub internal_links: i64,
    /// Count of links classified external.
    pub external_links: i64,
    /// Count of links whose probe failed or returned status >= 400.
    pub broken_links: i64,
    /// Whether any form contains a password input.
    pub login_form: bool,
    /// Run completion time, epoch milliseconds.
    pub created_at_ms: i64,
    /// Per-link outcomes in document order.
    pub links: Vec<Link>,
}

/// A persisted analysis result read back from the store.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Row id.
    pub id: i64,
    /// Owning target.
    pub target_id: i64,
    /// HTML version classification.
    pub html_version: String,
    /// Extracted page title.
    pub title: String,
    /// Heading occurrence counts.
    pub headings: HeadingCounts,
    /// Count of internal links.
    pub internal_links: i64,
    /// Count of external links.
    pub external_links: i64,
    /// Count of broken links.
    pub broken_links: i64,
    /// Login form detected.
    pub login_form: bool,
    /// Run completion time, epoch milliseconds.
    pub created_at_ms: i64,
    /// Per-link outcomes in document order.
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_store_strings() {
        assert_eq!(TargetStatus::Queued.to_string(), "queued");
        assert_eq!(TargetStatus::Running.to_string(), "running");
        assert_eq!(TargetStatus::Done.to_string(), "done");
        assert_eq!(TargetStatus::Error.to_string(), "error");
        assert_eq!(TargetStatus::Stopped.to_string(), "stopped");
    }

    #[test]
    fn status_round_trips_through_parse() {
        for status in [
            TargetStatus::Queued,
            TargetStatus::Running,
            TargetStatus::Done,
            TargetStatus::Error,
            TargetStatus::Stopped,
        ] {
            let parsed: TargetStatus = status.to_string().parse().expect("parse status");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        assert!("paused".parse::<TargetStatus>().is_err());
    }

    #[test]
    fn heading_counts_record_and_total() {
        let mut counts = HeadingCounts::default();
        counts.record(1);
        counts.record(2);
        counts.record(2);
        counts.record(9); // out of range, ignored
        assert_eq!(counts.h1, 1);
        assert_eq!(counts.h2, 2);
        assert_eq!(counts.h3, 0);
        assert_eq!(counts.total(), 3);
    }
}
