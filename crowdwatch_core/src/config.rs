// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard configuration.
//!
//! There is no CLI, no configuration file, and no environment lookup — all
//! state is in-memory and session-scoped. Configuration is plain structs with
//! `const` constructors; [`DashboardConfig::page`] and [`SurfaceIds::page`]
//! carry the values the page markup was written against.

use crate::series::WINDOW_POINTS;

/// Endpoints and cadences for one dashboard session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Server-push endpoint delivering metric payloads.
    pub feed_endpoint: &'static str,
    /// Movement heatmap image endpoint.
    pub heatmap_endpoint: &'static str,
    /// Crowd-distribution plot image endpoint.
    pub crowd_plot_endpoint: &'static str,
    /// Abnormal energy plot image endpoint.
    pub energy_plot_endpoint: &'static str,
    /// Live MJPEG video stream endpoint (assigned once, never cache-busted).
    pub video_feed_endpoint: &'static str,
    /// Snapshot refresh period in milliseconds.
    pub snapshot_period_ms: u32,
    /// Number of points the trend chart retains.
    pub window_points: usize,
}

impl DashboardConfig {
    /// The configuration the standard dashboard page is served with.
    #[must_use]
    pub const fn page() -> Self {
        Self {
            feed_endpoint: "/data_feed",
            heatmap_endpoint: "/heatmap",
            crowd_plot_endpoint: "/crowd_plot",
            energy_plot_endpoint: "/energy_plot",
            video_feed_endpoint: "/video_feed",
            snapshot_period_ms: 8_000,
            window_points: WINDOW_POINTS,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::page()
    }
}

/// Stable element ids that form the contract with the page markup.
///
/// The five text slots, the chart canvas, and the three snapshot slots are
/// required; the rest are optional enrichments the presenter tolerates
/// missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceIds {
    /// "Last update" timestamp slot.
    pub time: &'static str,
    /// Headcount slot.
    pub crowd: &'static str,
    /// Violation count slot.
    pub violations: &'static str,
    /// Restricted-entry flag slot.
    pub restricted: &'static str,
    /// Abnormal-activity flag slot (also carries the indicator color).
    pub abnormal: &'static str,
    /// Optional movement track count slot.
    pub tracks: &'static str,
    /// Optional connection status slot.
    pub connection: &'static str,
    /// Trend chart canvas.
    pub chart: &'static str,
    /// Heatmap image slot.
    pub heatmap: &'static str,
    /// Crowd-distribution plot image slot.
    pub crowd_plot: &'static str,
    /// Energy plot image slot.
    pub energy: &'static str,
    /// Optional live video image slot.
    pub video: &'static str,
}

impl SurfaceIds {
    /// The element ids the standard dashboard page uses.
    #[must_use]
    pub const fn page() -> Self {
        Self {
            time: "time",
            crowd: "crowd",
            violations: "violations",
            restricted: "restricted",
            abnormal: "abnormal",
            tracks: "tracks",
            connection: "connection",
            chart: "crowdChart",
            heatmap: "heatmapImg",
            crowd_plot: "crowdPlotImg",
            energy: "energyImg",
            video: "videoFeed",
        }
    }
}

impl Default for SurfaceIds {
    fn default() -> Self {
        Self::page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_config_matches_the_served_markup() {
        let config = DashboardConfig::page();
        assert_eq!(config.feed_endpoint, "/data_feed");
        assert_eq!(config.snapshot_period_ms, 8_000);
        assert_eq!(config.window_points, 15);
    }

    #[test]
    fn page_ids_match_the_served_markup() {
        let ids = SurfaceIds::page();
        assert_eq!(ids.chart, "crowdChart");
        assert_eq!(ids.heatmap, "heatmapImg");
        assert_eq!(ids.crowd_plot, "crowdPlotImg");
        assert_eq!(ids.energy, "energyImg");
    }
}
