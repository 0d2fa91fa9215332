// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM slot presenters.
//!
//! [`StatPanel`] writes the projected [`DisplayState`] into the page's text
//! slots; [`SnapshotPanel`] points the image slots at each refresh cycle's
//! cache-busted URLs. Both resolve their elements once, at startup, by the
//! stable ids in [`SurfaceIds`] — the contract with the page markup.

use alloc::format;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;

use web_sys::{Document, HtmlElement, HtmlImageElement};

use crowdwatch_core::backend::{SnapshotSurface, StatPresenter};
use crowdwatch_core::config::SurfaceIds;
use crowdwatch_core::display::{DisplayState, connection_label};
use crowdwatch_core::snapshot::SnapshotUrls;
use crowdwatch_core::trace::ChannelStatus;

fn required(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .map(|el| el.unchecked_into())
        .ok_or_else(|| JsValue::from_str(&format!("missing required #{id} element")))
}

fn optional(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id).map(|el| el.unchecked_into())
}

/// Writes display projections into the page's text slots.
///
/// The five metric slots are required; the `tracks` and `connection` slots
/// are optional page enrichments and are skipped when the markup does not
/// provide them.
pub struct StatPanel {
    time: HtmlElement,
    crowd: HtmlElement,
    violations: HtmlElement,
    restricted: HtmlElement,
    abnormal: HtmlElement,
    tracks: Option<HtmlElement>,
    connection: Option<HtmlElement>,
}

impl StatPanel {
    /// Resolves the text slots from the document.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first required slot the markup is missing.
    pub fn resolve(document: &Document, ids: &SurfaceIds) -> Result<Self, JsValue> {
        Ok(Self {
            time: required(document, ids.time)?,
            crowd: required(document, ids.crowd)?,
            violations: required(document, ids.violations)?,
            restricted: required(document, ids.restricted)?,
            abnormal: required(document, ids.abnormal)?,
            tracks: optional(document, ids.tracks),
            connection: optional(document, ids.connection),
        })
    }

    /// Writes the connection status into the `connection` slot, if the page
    /// has one. Accumulated metric slots are untouched.
    pub fn set_connection(&self, status: ChannelStatus) {
        if let Some(slot) = &self.connection {
            slot.set_text_content(Some(connection_label(status)));
        }
    }
}

impl StatPresenter for StatPanel {
    fn apply(&mut self, display: &DisplayState) {
        self.time.set_text_content(Some(&display.time));
        self.crowd.set_text_content(Some(&display.crowd));
        self.violations.set_text_content(Some(&display.violations));
        self.restricted.set_text_content(Some(display.restricted));
        self.abnormal.set_text_content(Some(display.abnormal));
        let _ = self
            .abnormal
            .style()
            .set_property("color", display.abnormal_color.as_css());
        if let Some(slot) = &self.tracks {
            slot.set_text_content(Some(&display.tracks));
        }
    }
}

impl core::fmt::Debug for StatPanel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatPanel")
            .field("tracks", &self.tracks.is_some())
            .field("connection", &self.connection.is_some())
            .finish_non_exhaustive()
    }
}

/// Points the snapshot image slots at each cycle's cache-busted URLs.
pub struct SnapshotPanel {
    heatmap: HtmlImageElement,
    crowd_plot: HtmlImageElement,
    energy: HtmlImageElement,
    video: Option<HtmlImageElement>,
}

impl SnapshotPanel {
    /// Resolves the image slots from the document.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first required slot the markup is missing.
    pub fn resolve(document: &Document, ids: &SurfaceIds) -> Result<Self, JsValue> {
        Ok(Self {
            heatmap: required(document, ids.heatmap)?.unchecked_into(),
            crowd_plot: required(document, ids.crowd_plot)?.unchecked_into(),
            energy: required(document, ids.energy)?.unchecked_into(),
            video: optional(document, ids.video).map(JsCast::unchecked_into),
        })
    }

    /// Points the optional live-video slot at the stream endpoint.
    ///
    /// The stream is a single persistent fetch; it is assigned once at
    /// startup and never cache-busted.
    pub fn point_video_feed(&self, endpoint: &str) {
        if let Some(video) = &self.video {
            video.set_src(endpoint);
        }
    }
}

impl SnapshotSurface for SnapshotPanel {
    fn refresh(&mut self, urls: &SnapshotUrls) {
        self.heatmap.set_src(&urls.heatmap);
        self.crowd_plot.set_src(&urls.crowd_plot);
        self.energy.set_src(&urls.energy_plot);
    }
}

impl core::fmt::Debug for SnapshotPanel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnapshotPanel")
            .field("video", &self.video.is_some())
            .finish_non_exhaustive()
    }
}
