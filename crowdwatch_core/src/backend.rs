// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Crowdwatch splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Push channel** — Delivers raw text payloads, one per server send, in
//!   send order (e.g. a browser `EventSource`). This is backend-specific and
//!   not abstracted by a trait because connection setup and lifecycle differ
//!   fundamentally across transports.
//!
//! - **Recurring timer** — Fires the snapshot refresh at a fixed period with
//!   an explicit init-once/teardown-once lifecycle.
//!
//! - **Wall clock** — A `time_label() -> String` free function producing the
//!   locale time string used as the chart's x-axis label, and a
//!   `cache_token() -> f64` source for snapshot cache busting.
//!
//! - **Surfaces** — Implementations of the three traits below that apply
//!   pipeline output to a real rendered surface (DOM text slots, a canvas,
//!   image elements) or to test doubles.
//!
//! # Crate boundaries
//!
//! `crowdwatch_core` owns the data model, decoding, the rolling store, and
//! this contract module. Backend crates depend on `crowdwatch_core` and
//! provide platform glue. Application code depends on both and wires them
//! together in a reaction loop.

use crate::display::DisplayState;
use crate::series::RollingSeries;
use crate::snapshot::SnapshotUrls;

/// Writes the projected display state into the named text slots.
///
/// Both the DOM stat panel and test doubles implement this trait, enabling
/// the presentation-sync reaction to be exercised without a browser.
pub trait StatPresenter {
    /// Applies one frame's projection to every text slot, including the
    /// abnormal-indicator color.
    fn apply(&mut self, display: &DisplayState);
}

/// Redraws the trend chart from the rolling series.
pub trait TrendSurface {
    /// Redraws both series ("Crowd Count", "Violations") against the label
    /// axis. Called exactly once per decoded frame, after the append.
    fn redraw(&mut self, series: &RollingSeries);
}

/// Rewrites the snapshot image slots to freshly cache-busted URLs.
pub trait SnapshotSurface {
    /// Points every snapshot slot at this cycle's URLs.
    fn refresh(&mut self, urls: &SnapshotUrls);
}
