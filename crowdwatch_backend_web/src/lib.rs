// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for crowdwatch.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`FeedChannel`]: `EventSource` push channel (one payload per server send)
//! - [`IntervalTimer`]: `setInterval` recurring timer with explicit lifecycle
//! - [`StatPanel`] / [`SnapshotPanel`]: DOM slot presenters
//! - [`CanvasTrendChart`]: 2D-canvas rendering of the rolling series
//! - [`ConsoleSink`]: trace sink writing to the browser console

#![no_std]

extern crate alloc;

mod chart;
mod console;
mod feed;
mod interval;
mod presenter;

pub use chart::CanvasTrendChart;
pub use console::ConsoleSink;
pub use feed::FeedChannel;
pub use interval::IntervalTimer;
pub use presenter::{SnapshotPanel, StatPanel};

use alloc::string::String;

use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every use.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Math, js_name = "random")]
    fn math_random() -> f64;

    type Date;

    #[wasm_bindgen(constructor)]
    fn new() -> Date;

    #[wasm_bindgen(method, js_name = "toLocaleTimeString")]
    fn to_locale_time_string(this: &Date) -> String;
}

/// Returns the current wall-clock time formatted as a locale time string.
///
/// This is the label appended to the chart's x-axis for each frame; it is
/// independent of the frame's own `time` field.
#[must_use]
pub fn time_label() -> String {
    Date::new().to_locale_time_string()
}

/// Returns a fresh random cache-busting token in `[0, 1)`.
///
/// Successive calls differ with overwhelming probability, which is all a
/// cache buster needs.
#[must_use]
pub fn cache_token() -> f64 {
    math_random()
}
