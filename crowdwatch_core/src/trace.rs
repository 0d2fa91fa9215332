// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reaction loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! pipeline calls as payloads arrive and timers fire. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink` and performs a single
//! `Option` branch per emitted event. Events arrive at the feed cadence
//! (about one per second) plus one per snapshot cycle, so dispatch is always
//! compiled in rather than feature-gated.

use crate::frame::{DecodeError, MetricFrame};

/// Whether the push channel is currently delivering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelStatus {
    /// Messages are flowing.
    Live,
    /// The transport reported an error; reconnection (if any) is the
    /// transport's business.
    Disconnected,
}

/// Emitted after a payload decodes into a full metric frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Headcount carried by the frame.
    pub human_count: u32,
    /// Violation count carried by the frame.
    pub violation_count: u32,
    /// Restricted-entry flag.
    pub restricted_entry: bool,
    /// Abnormal-activity flag.
    pub abnormal_activity: bool,
    /// Movement track count.
    pub track_count: u32,
}

impl From<&MetricFrame> for FrameEvent {
    fn from(frame: &MetricFrame) -> Self {
        Self {
            human_count: frame.human_count,
            violation_count: frame.violation_count,
            restricted_entry: frame.restricted_entry,
            abnormal_activity: frame.abnormal_activity,
            track_count: frame.track_count,
        }
    }
}

/// Emitted when a payload is dropped because it failed to decode.
#[derive(Debug)]
pub struct DecodeFailedEvent<'a> {
    /// Length of the rejected payload in bytes.
    pub payload_len: usize,
    /// The decode failure itself.
    pub error: &'a DecodeError,
}

/// Emitted when the push channel changes delivery status.
#[derive(Clone, Copy, Debug)]
pub struct ChannelStatusEvent {
    /// The new status.
    pub status: ChannelStatus,
}

/// Emitted when the snapshot scheduler rewrites the image slots.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotRefreshEvent {
    /// Monotonic refresh-cycle counter, starting at 1.
    pub cycle: u64,
}

/// Receives trace events from the reaction loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a payload decodes into a full metric frame.
    fn on_frame_decoded(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a payload is dropped because it failed to decode.
    fn on_decode_failed(&mut self, e: &DecodeFailedEvent<'_>) {
        _ = e;
    }

    /// Called when the push channel changes delivery status.
    fn on_channel_status(&mut self, e: &ChannelStatusEvent) {
        _ = e;
    }

    /// Called when the snapshot scheduler completes a refresh cycle.
    fn on_snapshot_refresh(&mut self, e: &SnapshotRefreshEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// Each method checks the inner `Option` (one branch) before dispatching to
/// the sink.
pub struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self { sink: None }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame_decoded(&mut self, e: &FrameEvent) {
        if let Some(s) = &mut self.sink {
            s.on_frame_decoded(e);
        }
    }

    /// Emits a [`DecodeFailedEvent`].
    #[inline]
    pub fn decode_failed(&mut self, e: &DecodeFailedEvent<'_>) {
        if let Some(s) = &mut self.sink {
            s.on_decode_failed(e);
        }
    }

    /// Emits a [`ChannelStatusEvent`].
    #[inline]
    pub fn channel_status(&mut self, e: &ChannelStatusEvent) {
        if let Some(s) = &mut self.sink {
            s.on_channel_status(e);
        }
    }

    /// Emits a [`SnapshotRefreshEvent`].
    #[inline]
    pub fn snapshot_refresh(&mut self, e: &SnapshotRefreshEvent) {
        if let Some(s) = &mut self.sink {
            s.on_snapshot_refresh(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::frame::decode;

    #[derive(Default)]
    struct CountingSink {
        frames: Vec<u32>,
        failures: usize,
        statuses: Vec<ChannelStatus>,
    }

    impl TraceSink for CountingSink {
        fn on_frame_decoded(&mut self, e: &FrameEvent) {
            self.frames.push(e.human_count);
        }

        fn on_decode_failed(&mut self, _e: &DecodeFailedEvent<'_>) {
            self.failures += 1;
        }

        fn on_channel_status(&mut self, e: &ChannelStatusEvent) {
            self.statuses.push(e.status);
        }
    }

    #[test]
    fn tracer_dispatches_to_the_sink() {
        let mut sink = CountingSink::default();
        let mut tracer = Tracer::new(&mut sink);

        let frame = decode(r#"{"crowd":{"human_count":5}}"#).expect("valid payload");
        tracer.frame_decoded(&FrameEvent::from(&frame));
        tracer.channel_status(&ChannelStatusEvent {
            status: ChannelStatus::Disconnected,
        });

        assert_eq!(sink.frames, [5]);
        assert_eq!(sink.statuses, [ChannelStatus::Disconnected]);
    }

    #[test]
    fn none_tracer_discards_events() {
        let mut tracer = Tracer::none();
        tracer.snapshot_refresh(&SnapshotRefreshEvent { cycle: 1 });
        // Nothing to observe; the call simply must not panic.
    }
}
