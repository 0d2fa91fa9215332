// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-payload presentation reaction.
//!
//! [`PresentationSync`] owns the rolling series and the two render surfaces
//! and performs the whole update for one pushed payload synchronously: decode
//! with defaults, project onto the display slots, append to the series under
//! a caller-supplied wall-clock label, redraw the chart. One decoded frame
//! yields exactly one full presentation update — no batching, no debouncing.
//!
//! A payload that fails to decode changes nothing: the display keeps its
//! previous values, the series keeps its points, and the error is reported to
//! the tracer and returned for the caller to inspect.

use alloc::string::String;

use crate::backend::{StatPresenter, TrendSurface};
use crate::display::DisplayState;
use crate::frame::{DecodeError, decode};
use crate::series::RollingSeries;
use crate::trace::{DecodeFailedEvent, FrameEvent, Tracer};

/// Folds decoded frames into the rolling series and flushes them to the
/// render surfaces.
#[derive(Debug)]
pub struct PresentationSync<P: StatPresenter, C: TrendSurface> {
    series: RollingSeries,
    presenter: P,
    chart: C,
}

impl<P: StatPresenter, C: TrendSurface> PresentationSync<P, C> {
    /// Creates a sync target over the given surfaces and series store.
    pub fn new(presenter: P, chart: C, series: RollingSeries) -> Self {
        Self {
            series,
            presenter,
            chart,
        }
    }

    /// Reacts to one pushed payload.
    ///
    /// `now_label` is the current wall-clock locale time string; it becomes
    /// the appended point's x-axis label. The frame's own `time` field feeds
    /// only the textual "last update" slot.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] (after reporting it to `tracer`) if the
    /// payload is malformed. Display state and series are left untouched in
    /// that case; the channel should simply continue with the next message.
    pub fn on_payload(
        &mut self,
        payload: &str,
        now_label: String,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), DecodeError> {
        let frame = match decode(payload) {
            Ok(frame) => frame,
            Err(error) => {
                tracer.decode_failed(&DecodeFailedEvent {
                    payload_len: payload.len(),
                    error: &error,
                });
                return Err(error);
            }
        };
        tracer.frame_decoded(&FrameEvent::from(&frame));

        self.presenter.apply(&DisplayState::project(&frame));
        self.series
            .append(now_label, frame.human_count, frame.violation_count);
        self.chart.redraw(&self.series);
        Ok(())
    }

    /// The rolling series backing the chart.
    #[must_use]
    pub fn series(&self) -> &RollingSeries {
        &self.series
    }

    /// The stat presenter, for surface concerns outside the per-frame flow
    /// (e.g. the connection status slot).
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;
    use alloc::vec::Vec;

    use super::*;
    use crate::display::IndicatorColor;

    /// Records every projection it is asked to apply.
    #[derive(Debug, Default)]
    struct RecordingPanel {
        applied: Vec<DisplayState>,
    }

    impl StatPresenter for RecordingPanel {
        fn apply(&mut self, display: &DisplayState) {
            self.applied.push(display.clone());
        }
    }

    /// Records the series length seen at each redraw.
    #[derive(Debug, Default)]
    struct RecordingChart {
        redraw_lens: Vec<usize>,
    }

    impl TrendSurface for RecordingChart {
        fn redraw(&mut self, series: &RollingSeries) {
            self.redraw_lens.push(series.len());
        }
    }

    fn sync() -> PresentationSync<RecordingPanel, RecordingChart> {
        PresentationSync::new(
            RecordingPanel::default(),
            RecordingChart::default(),
            RollingSeries::new(),
        )
    }

    const SCENARIO: &str = r#"{"crowd":{"time":"10:00:01","human_count":42,"violation_count":2,"restricted_entry":false,"abnormal_activity":false}}"#;

    #[test]
    fn one_frame_yields_one_full_update() {
        let mut sync = sync();
        sync.on_payload(SCENARIO, "now".to_string(), &mut Tracer::none())
            .expect("scenario payload decodes");

        let display = &sync.presenter.applied[0];
        assert_eq!(display.time, "10:00:01");
        assert_eq!(display.crowd, "42");
        assert_eq!(display.violations, "2");
        assert_eq!(display.restricted, "✅ No");
        assert_eq!(display.abnormal, "Normal");
        assert_eq!(display.abnormal_color, IndicatorColor::Neutral);

        assert_eq!(
            sync.series().newest(),
            Some(("now", 42, 2)),
            "series gains one point under the wall-clock label"
        );
        assert_eq!(sync.chart.redraw_lens, [1], "exactly one redraw per frame");
    }

    #[test]
    fn chart_label_is_the_wall_clock_not_the_frame_time() {
        let mut sync = sync();
        sync.on_payload(SCENARIO, "12:34:56".to_string(), &mut Tracer::none())
            .expect("scenario payload decodes");
        assert_eq!(sync.series().labels(), ["12:34:56"]);
        assert_eq!(sync.presenter.applied[0].time, "10:00:01");
    }

    #[test]
    fn malformed_payload_changes_nothing() {
        let mut sync = sync();
        sync.on_payload(SCENARIO, "t1".to_string(), &mut Tracer::none())
            .expect("valid payload");

        let result = sync.on_payload("{oops", "t2".to_string(), &mut Tracer::none());
        assert!(result.is_err(), "malformed payload is reported");
        assert_eq!(sync.presenter.applied.len(), 1, "no display change");
        assert_eq!(sync.series().len(), 1, "no series append");
        assert_eq!(sync.chart.redraw_lens, [1], "no redraw");

        // The channel stays usable for the next message.
        sync.on_payload(SCENARIO, "t3".to_string(), &mut Tracer::none())
            .expect("subsequent valid payload still decodes");
        assert_eq!(sync.series().labels(), ["t1", "t3"]);
    }

    #[test]
    fn decode_failure_is_reported_to_the_tracer() {
        use crate::trace::{DecodeFailedEvent, TraceSink};

        #[derive(Default)]
        struct FailureSink {
            failures: usize,
        }

        impl TraceSink for FailureSink {
            fn on_decode_failed(&mut self, _e: &DecodeFailedEvent<'_>) {
                self.failures += 1;
            }
        }

        let mut sink = FailureSink::default();
        let mut sync = sync();
        let _ = sync.on_payload("garbage", "t".to_string(), &mut Tracer::new(&mut sink));
        assert_eq!(sink.failures, 1, "the drop is surfaced, never swallowed");
    }

    #[test]
    fn series_stays_bounded_across_many_frames() {
        let mut sync = sync();
        for i in 0..20 {
            let payload = alloc::format!(r#"{{"crowd":{{"human_count":{i}}}}}"#);
            sync.on_payload(&payload, alloc::format!("t{i}"), &mut Tracer::none())
                .expect("valid payload");
        }
        assert_eq!(sync.series().len(), 15);
        assert_eq!(
            sync.series().labels()[0],
            "t5",
            "the first five points were evicted"
        );
        assert_eq!(sync.chart.redraw_lens.len(), 20, "one redraw per frame");
    }
}
