// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache-busted URL generation for the periodically refreshed images.
//!
//! The analysis images (movement heatmap, crowd-distribution plot, abnormal
//! energy plot) are regenerated server-side; the dashboard re-fetches them on
//! a fixed cadence by rewriting each image slot's source to the same logical
//! endpoint with a fresh random token in the query string, defeating the
//! browser cache. The recurring timer itself lives in the backend; this
//! module only derives the URLs.

use alloc::format;
use alloc::string::String;

use crate::config::DashboardConfig;

/// Appends a cache-busting token to an endpoint URL.
#[must_use]
pub fn busted_url(endpoint: &str, token: f64) -> String {
    format!("{endpoint}?rand={token}")
}

/// The three snapshot endpoints the scheduler cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotSet {
    /// Movement heatmap endpoint.
    pub heatmap: String,
    /// Crowd-distribution plot endpoint.
    pub crowd_plot: String,
    /// Abnormal energy plot endpoint.
    pub energy_plot: String,
}

impl SnapshotSet {
    /// Creates a snapshot set from the dashboard configuration.
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            heatmap: String::from(config.heatmap_endpoint),
            crowd_plot: String::from(config.crowd_plot_endpoint),
            energy_plot: String::from(config.energy_plot_endpoint),
        }
    }

    /// Derives one refresh cycle's worth of cache-busted URLs.
    ///
    /// All three URLs share the same token; its only job is to differ from
    /// the previous cycle's token.
    #[must_use]
    pub fn urls(&self, token: f64) -> SnapshotUrls {
        SnapshotUrls {
            heatmap: busted_url(&self.heatmap, token),
            crowd_plot: busted_url(&self.crowd_plot, token),
            energy_plot: busted_url(&self.energy_plot, token),
        }
    }
}

/// Cache-busted URLs for one refresh cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotUrls {
    /// Heatmap image URL for this cycle.
    pub heatmap: String,
    /// Crowd-distribution plot URL for this cycle.
    pub crowd_plot: String,
    /// Energy plot URL for this cycle.
    pub energy_plot: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busted_url_carries_the_token() {
        assert_eq!(busted_url("/heatmap", 0.5), "/heatmap?rand=0.5");
    }

    #[test]
    fn urls_cover_all_three_endpoints() {
        let set = SnapshotSet::from_config(&DashboardConfig::page());
        let urls = set.urls(0.25);
        assert_eq!(urls.heatmap, "/heatmap?rand=0.25");
        assert_eq!(urls.crowd_plot, "/crowd_plot?rand=0.25");
        assert_eq!(urls.energy_plot, "/energy_plot?rand=0.25");
    }

    #[test]
    fn distinct_tokens_produce_distinct_urls() {
        let set = SnapshotSet::from_config(&DashboardConfig::page());
        assert_ne!(
            set.urls(0.1),
            set.urls(0.2),
            "a fresh token must force a fresh fetch"
        );
    }
}
