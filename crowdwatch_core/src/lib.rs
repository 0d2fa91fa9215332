// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data model and streaming-update pipeline for the crowdwatch dashboard.
//!
//! `crowdwatch_core` owns everything about the crowd-telemetry pipeline that
//! does not touch the browser: decoding pushed messages into fully-defaulted
//! metric frames, folding them into a bounded rolling series, projecting the
//! latest frame onto display slots, and cycling cache-busted snapshot URLs.
//! It is `no_std` compatible (with `alloc`) so the model is testable on the
//! host without a browser in the loop.
//!
//! # Architecture
//!
//! The crate is organized around a reaction loop that turns pushed payloads
//! into presentation updates:
//!
//! ```text
//!   Backend (push channel)
//!       │ raw text payload
//!       ▼
//!   frame::decode() ──► MetricFrame ──► DisplayState::project()
//!                            │                  │
//!                            ▼                  ▼
//!            RollingSeries::append()   StatPresenter::apply()
//!                            │
//!                            ▼
//!                 TrendSurface::redraw()
//! ```
//!
//! An independent recurring timer (owned by the backend) drives
//! [`SnapshotSet::urls`](snapshot::SnapshotSet::urls) and
//! [`SnapshotSurface::refresh`](backend::SnapshotSurface::refresh) at its own
//! cadence; it has no ordering relationship with payload reactions.
//!
//! **[`frame`]** — Metric frame type and the decode-with-defaults step.
//! Absent, `null`, or wrong-typed fields coerce to documented defaults in one
//! auditable place; a malformed payload is a [`DecodeError`](frame::DecodeError)
//! that is terminal for that single message only.
//!
//! **[`series`]** — Fixed-capacity rolling series with struct-of-arrays
//! storage. Eviction removes the oldest point from every parallel axis in
//! lock-step so the label axis never drifts against the data axes.
//!
//! **[`display`]** — Pure projection of the latest frame onto named output
//! slots, including the derived abnormal-indicator color.
//!
//! **[`sync`]** — [`PresentationSync`](sync::PresentationSync), the
//! per-payload reaction: decode, project, append, redraw — synchronously,
//! exactly once per decoded frame.
//!
//! **[`snapshot`]** — Cache-busted URL generation for the periodically
//! refreshed analysis images.
//!
//! **[`backend`]** — The [`StatPresenter`](backend::StatPresenter),
//! [`TrendSurface`](backend::TrendSurface), and
//! [`SnapshotSurface`](backend::SnapshotSurface) traits that platform
//! backends implement to apply pipeline output to a real surface.
//!
//! **[`config`]** — Endpoint, slot-id, and cadence configuration structs.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! pipeline diagnostics, with the [`Tracer`](trace::Tracer) wrapper.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod display;
pub mod frame;
pub mod series;
pub mod snapshot;
pub mod sync;
pub mod trace;
