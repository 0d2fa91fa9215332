// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `EventSource` push channel.
//!
//! [`FeedChannel`] wraps a browser `EventSource`: a single long-lived,
//! one-directional, server-initiated message channel. Payloads are delivered
//! to the message callback in server-send order, one callback per send.
//!
//! Reconnection and backoff are entirely the transport's business —
//! `EventSource` reconnects transparently and this type adds no retry policy
//! of its own. Downstream code must tolerate silent gaps in the stream. The
//! error callback fires whenever the transport reports a drop, so the
//! application can surface a "disconnected" indicator without discarding any
//! accumulated state.

use alloc::boxed::Box;
use alloc::string::String;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use web_sys::{EventSource, MessageEvent};

/// A single long-lived push channel to a fixed server endpoint.
///
/// Closing is explicit via [`close`](Self::close) and implicit on `Drop`;
/// both detach the callbacks so the JS closures do not leak.
pub struct FeedChannel {
    source: EventSource,
    // Kept alive for as long as the handlers may fire.
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut()>,
}

impl FeedChannel {
    /// Opens the channel to `endpoint`.
    ///
    /// `on_payload` receives each raw text payload in arrival order.
    /// `on_drop` fires whenever the transport reports a connection error;
    /// delivery may resume afterwards without further notice.
    ///
    /// # Errors
    ///
    /// Returns the browser's error value if the `EventSource` cannot be
    /// constructed (e.g. an invalid endpoint URL).
    pub fn connect(
        endpoint: &str,
        mut on_payload: impl FnMut(String) + 'static,
        on_drop: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let source = EventSource::new(endpoint)?;

        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            // Server-sent event data is always a string; anything else is
            // not ours to interpret.
            if let Some(payload) = event.data().as_string() {
                on_payload(payload);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_error = Closure::wrap(Box::new(on_drop) as Box<dyn FnMut()>);
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            source,
            _on_message: on_message,
            _on_error: on_error,
        })
    }

    /// Closes the channel. Idempotent; no further callbacks fire.
    pub fn close(&self) {
        self.source.set_onmessage(None);
        self.source.set_onerror(None);
        self.source.close();
    }
}

impl Drop for FeedChannel {
    fn drop(&mut self) {
        // Detach before the closures drop with `self`.
        self.close();
    }
}

impl core::fmt::Debug for FeedChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FeedChannel")
            .field("url", &self.source.url())
            .finish_non_exhaustive()
    }
}
