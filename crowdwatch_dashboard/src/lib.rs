// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-resident crowd-monitoring dashboard.
//!
//! Wires the crowdwatch pipeline to the served page: an `EventSource` feed of
//! metric payloads drives the text slots and the rolling trend chart, while
//! an independent 8-second timer cycles the analysis snapshots with fresh
//! cache-busting tokens. All state lives in one explicitly-owned
//! [`Dashboard`] value behind `Rc<RefCell<…>>`; nothing is an ambient
//! singleton, and a single `pagehide` listener closes the channel and cancels
//! the timer exactly once.
//!
//! Build with: `wasm-pack build --target web crowdwatch_dashboard`

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use web_sys::Event;

use crowdwatch_backend_web::{
    CanvasTrendChart, ConsoleSink, FeedChannel, IntervalTimer, SnapshotPanel, StatPanel,
};
use crowdwatch_core::config::{DashboardConfig, SurfaceIds};
use crowdwatch_core::series::RollingSeries;
use crowdwatch_core::snapshot::SnapshotSet;
use crowdwatch_core::sync::PresentationSync;
use crowdwatch_core::trace::{ChannelStatus, ChannelStatusEvent, SnapshotRefreshEvent, Tracer};

/// Everything one page session owns: the sync target, the snapshot surface,
/// and the diagnostics sink. Mutated only from reaction handlers, which the
/// single-threaded event loop serializes.
struct Dashboard {
    sync: PresentationSync<StatPanel, CanvasTrendChart>,
    snapshots: SnapshotPanel,
    snapshot_set: SnapshotSet,
    refresh_cycles: u64,
    status: Option<ChannelStatus>,
    sink: ConsoleSink,
}

impl Dashboard {
    /// Reaction to one pushed payload: one decoded frame, one full
    /// presentation update.
    fn on_payload(&mut self, payload: &str) {
        self.set_status(ChannelStatus::Live);
        let now_label = crowdwatch_backend_web::time_label();

        let Self { sync, sink, .. } = self;
        let mut tracer = Tracer::new(sink);
        // A decode failure is already surfaced through the tracer; prior
        // display state and series history stay as they were.
        let _ = sync.on_payload(payload, now_label, &mut tracer);
    }

    /// Reaction to a transport-reported drop. History is retained; the
    /// transport reconnects (or not) on its own.
    fn on_channel_drop(&mut self) {
        self.set_status(ChannelStatus::Disconnected);
    }

    fn set_status(&mut self, status: ChannelStatus) {
        if self.status == Some(status) {
            return;
        }
        self.status = Some(status);
        self.sync.presenter_mut().set_connection(status);
        Tracer::new(&mut self.sink).channel_status(&ChannelStatusEvent { status });
    }

    /// Reaction to the snapshot timer: re-point all image slots at freshly
    /// cache-busted URLs. Runs at its own cadence, independent of frames.
    fn refresh_snapshots(&mut self) {
        use crowdwatch_core::backend::SnapshotSurface as _;

        self.refresh_cycles += 1;
        let urls = self.snapshot_set.urls(crowdwatch_backend_web::cache_token());
        self.snapshots.refresh(&urls);
        Tracer::new(&mut self.sink).snapshot_refresh(&SnapshotRefreshEvent {
            cycle: self.refresh_cycles,
        });
    }
}

/// The page-session resources with an explicit teardown path: one open push
/// channel and one recurring timer.
struct Session {
    feed: FeedChannel,
    snapshot_timer: IntervalTimer,
}

impl Session {
    fn teardown(self) {
        self.feed.close();
        self.snapshot_timer.stop();
    }
}

/// Entry point; runs once per page load.
///
/// # Errors
///
/// Returns the browser's error value if a required surface element is
/// missing or the feed endpoint URL is rejected.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("window");
    let document = window.document().expect("document");

    let config = DashboardConfig::page();
    let ids = SurfaceIds::page();

    let stat_panel = StatPanel::resolve(&document, &ids)?;
    let chart = CanvasTrendChart::resolve(&document, ids.chart)?;
    let snapshots = SnapshotPanel::resolve(&document, &ids)?;
    snapshots.point_video_feed(config.video_feed_endpoint);

    let state = Rc::new(RefCell::new(Dashboard {
        sync: PresentationSync::new(
            stat_panel,
            chart,
            RollingSeries::with_capacity(config.window_points),
        ),
        snapshots,
        snapshot_set: SnapshotSet::from_config(&config),
        refresh_cycles: 0,
        status: None,
        sink: ConsoleSink,
    }));

    let payload_state = Rc::clone(&state);
    let drop_state = Rc::clone(&state);
    let feed = FeedChannel::connect(
        config.feed_endpoint,
        move |payload| payload_state.borrow_mut().on_payload(&payload),
        move || drop_state.borrow_mut().on_channel_drop(),
    )?;

    // Registered once at startup — never from inside the frame handler —
    // so the page holds exactly one recurring registration.
    let timer_state = Rc::clone(&state);
    let snapshot_timer = IntervalTimer::new(
        move || timer_state.borrow_mut().refresh_snapshots(),
        config.snapshot_period_ms,
    );
    snapshot_timer.start();

    // Single explicit teardown path: close the channel and cancel the timer
    // when the page goes away. The forgotten listener keeps the session
    // alive for the rest of the page's lifetime.
    let session = Rc::new(RefCell::new(Some(Session {
        feed,
        snapshot_timer,
    })));
    let unload_session = Rc::clone(&session);
    let on_pagehide = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(session) = unload_session.borrow_mut().take() {
            session.teardown();
        }
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();

    Ok(())
}
