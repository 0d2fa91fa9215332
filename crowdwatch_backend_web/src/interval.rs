// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setInterval` recurring timer.
//!
//! [`IntervalTimer`] drives the snapshot refresh from the browser's
//! `setInterval` API. It is registered **once** — at startup, by the
//! application — and holds a single recurring registration until
//! [`stop`](IntervalTimer::stop) is called or the timer is dropped.
//! Re-registering a periodic timer from inside a per-event handler
//! accumulates concurrent timers without bound; this type's init-once /
//! teardown-once lifecycle is the replacement for that pattern.

use alloc::boxed::Box;
use core::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every registration.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(callback: &JsValue, period_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);
}

/// A recurring wall-clock timer that invokes its callback every fixed period.
///
/// Create with [`IntervalTimer::new`], then call [`start`](Self::start) once.
/// The registration persists until [`stop`](Self::stop) or `Drop`; it is
/// never re-registered per tick.
pub struct IntervalTimer {
    /// The JS closure registered with `setInterval`. Kept alive for as long
    /// as the registration may fire.
    closure: Closure<dyn FnMut()>,

    period_ms: i32,

    /// The ID returned by `setInterval`, used by [`clear_interval`] when
    /// stopping.
    timer_id: Cell<i32>,

    /// Whether the timer is currently registered.
    running: Cell<bool>,
}

impl IntervalTimer {
    /// Creates a timer that is **not yet running**.
    ///
    /// `callback` will run every `period_ms` milliseconds once
    /// [`start`](Self::start) is called.
    pub fn new(callback: impl FnMut() + 'static, period_ms: u32) -> Self {
        Self {
            closure: Closure::wrap(Box::new(callback) as Box<dyn FnMut()>),
            period_ms: i32::try_from(period_ms).unwrap_or(i32::MAX),
            timer_id: Cell::new(0),
            running: Cell::new(false),
        }
    }

    /// Registers the recurring timer.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self) {
        if self.running.get() {
            return;
        }
        let id = set_interval(self.closure.as_ref(), self.period_ms);
        self.timer_id.set(id);
        self.running.set(true);
    }

    /// Cancels the recurring timer.
    ///
    /// Can be restarted by calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.running.get() {
            return;
        }
        self.running.set(false);
        clear_interval(self.timer_id.get());
    }

    /// Returns `true` if the timer is currently registered.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl core::fmt::Debug for IntervalTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("period_ms", &self.period_ms)
            .field("running", &self.running.get())
            .finish_non_exhaustive()
    }
}
