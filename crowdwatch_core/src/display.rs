// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure projection of the latest metric frame onto display slots.
//!
//! [`DisplayState`] is a value, not a view: it carries the exact strings the
//! presenter writes into the page's text slots plus the derived
//! abnormal-indicator color. Projection has no side effects and no history —
//! lifecycle is scoped to the page session.

use alloc::string::{String, ToString as _};

use crate::frame::MetricFrame;
use crate::trace::ChannelStatus;

/// Text shown in the `restricted` slot when restricted-area entry is flagged.
pub const RESTRICTED_YES: &str = "🚫 Yes";
/// Text shown in the `restricted` slot when no restricted-area entry is
/// flagged.
pub const RESTRICTED_NO: &str = "✅ No";
/// Text shown in the `abnormal` slot when abnormal activity is flagged.
pub const ABNORMAL_DETECTED: &str = "⚠️ Detected";
/// Text shown in the `abnormal` slot during normal activity.
pub const ABNORMAL_NORMAL: &str = "Normal";

/// Color of the abnormal-activity indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorColor {
    /// Abnormal activity flagged.
    Alert,
    /// Normal activity.
    Neutral,
}

impl IndicatorColor {
    /// The CSS color value for this indicator state.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Alert => "red",
            Self::Neutral => "white",
        }
    }
}

/// Returns the indicator color for an abnormal-activity flag.
///
/// This is a pure function of the flag alone; no other frame field affects
/// it.
#[must_use]
pub const fn indicator_color(abnormal_activity: bool) -> IndicatorColor {
    if abnormal_activity {
        IndicatorColor::Alert
    } else {
        IndicatorColor::Neutral
    }
}

/// Returns the text for the `connection` status slot.
#[must_use]
pub const fn connection_label(status: ChannelStatus) -> &'static str {
    match status {
        ChannelStatus::Live => "live",
        ChannelStatus::Disconnected => "disconnected",
    }
}

/// The latest frame projected onto named output slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    /// Producer timestamp label for the "last update" display.
    pub time: String,
    /// Headcount, rendered as decimal text.
    pub crowd: String,
    /// Violation count, rendered as decimal text.
    pub violations: String,
    /// Restricted-entry flag text.
    pub restricted: &'static str,
    /// Abnormal-activity flag text.
    pub abnormal: &'static str,
    /// Derived color of the abnormal indicator.
    pub abnormal_color: IndicatorColor,
    /// Movement track count, rendered as decimal text.
    pub tracks: String,
}

impl DisplayState {
    /// Projects a decoded frame onto the display slots.
    #[must_use]
    pub fn project(frame: &MetricFrame) -> Self {
        Self {
            time: frame.time.clone(),
            crowd: frame.human_count.to_string(),
            violations: frame.violation_count.to_string(),
            restricted: if frame.restricted_entry {
                RESTRICTED_YES
            } else {
                RESTRICTED_NO
            },
            abnormal: if frame.abnormal_activity {
                ABNORMAL_DETECTED
            } else {
                ABNORMAL_NORMAL
            },
            abnormal_color: indicator_color(frame.abnormal_activity),
            tracks: frame.track_count.to_string(),
        }
    }
}
