// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-console trace output.
//!
//! [`ConsoleSink`] implements [`TraceSink`] and writes one console line per
//! event: decoded frames and snapshot cycles at debug level, channel status
//! changes at warn/info, and dropped payloads at error level — a decode
//! failure is surfaced, never silently swallowed.

use alloc::format;

use wasm_bindgen::prelude::*;

use crowdwatch_core::trace::{
    ChannelStatus, ChannelStatusEvent, DecodeFailedEvent, FrameEvent, SnapshotRefreshEvent,
    TraceSink,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = "debug")]
    fn console_debug(message: &str);

    #[wasm_bindgen(js_namespace = console, js_name = "info")]
    fn console_info(message: &str);

    #[wasm_bindgen(js_namespace = console, js_name = "warn")]
    fn console_warn(message: &str);

    #[wasm_bindgen(js_namespace = console, js_name = "error")]
    fn console_error(message: &str);
}

/// Writes one console line per pipeline event.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn on_frame_decoded(&mut self, e: &FrameEvent) {
        console_debug(&format!(
            "[frame] crowd={} violations={} restricted={} abnormal={} tracks={}",
            e.human_count, e.violation_count, e.restricted_entry, e.abnormal_activity, e.track_count,
        ));
    }

    fn on_decode_failed(&mut self, e: &DecodeFailedEvent<'_>) {
        console_error(&format!(
            "[drop] {} ({} byte payload)",
            e.error, e.payload_len,
        ));
    }

    fn on_channel_status(&mut self, e: &ChannelStatusEvent) {
        match e.status {
            ChannelStatus::Live => console_info("[feed] live"),
            ChannelStatus::Disconnected => {
                console_warn("[feed] disconnected; transport owns reconnection");
            }
        }
    }

    fn on_snapshot_refresh(&mut self, e: &SnapshotRefreshEvent) {
        console_debug(&format!("[snapshot] cycle {}", e.cycle));
    }
}
