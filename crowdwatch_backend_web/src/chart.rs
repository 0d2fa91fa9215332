// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D-canvas rendering of the rolling series.
//!
//! [`CanvasTrendChart`] draws the two series ("Crowd Count" in teal,
//! "Violations" in amber) as polylines over the label axis, with a shared
//! vertical scale and the oldest retained label anchored at the left edge.
//! The whole surface is redrawn from the series on every frame — the series
//! is at most [`WINDOW_POINTS`](crowdwatch_core::series::WINDOW_POINTS)
//! points, so a full redraw is cheaper than damage tracking and can never
//! show a half-updated chart.

use alloc::format;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;

use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crowdwatch_core::backend::TrendSurface;
use crowdwatch_core::series::RollingSeries;

/// Stroke color of the "Crowd Count" series.
pub const CROWD_SERIES_COLOR: &str = "#00ffcc";
/// Stroke color of the "Violations" series.
pub const VIOLATION_SERIES_COLOR: &str = "#ffcc00";

const AXIS_COLOR: &str = "rgba(255,255,255,0.4)";
const LABEL_FONT: &str = "11px ui-monospace, monospace";
const PAD: f64 = 18.0;

/// Renders the rolling series onto a `<canvas>` element.
pub struct CanvasTrendChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasTrendChart {
    /// Resolves the chart canvas from the document and acquires its 2D
    /// context.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is missing or is not a canvas with an
    /// available 2D context.
    pub fn resolve(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing required #{id} canvas")))?
            .unchecked_into();
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .unchecked_into::<CanvasRenderingContext2d>();
        Ok(Self { canvas, context })
    }

    fn plot_width(&self) -> f64 {
        (f64::from(self.canvas.width()) - 2.0 * PAD).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (f64::from(self.canvas.height()) - 2.0 * PAD).max(1.0)
    }

    fn stroke_series(&self, values: &[u32], scale: u32, color: &str) {
        if values.is_empty() {
            return;
        }
        let (width, height) = (self.plot_width(), self.plot_height());
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(2.0);
        self.context.begin_path();
        for (index, &value) in values.iter().enumerate() {
            let x = PAD + x_at(index, values.len(), width);
            let y = PAD + y_at(value, scale, height);
            if index == 0 {
                self.context.move_to(x, y);
            } else {
                self.context.line_to(x, y);
            }
        }
        self.context.stroke();
    }

    fn draw_frame(&self, series: &RollingSeries) {
        let (width, height) = (self.plot_width(), self.plot_height());

        // Baseline.
        self.context.set_stroke_style_str(AXIS_COLOR);
        self.context.set_line_width(1.0);
        self.context.begin_path();
        self.context.move_to(PAD, PAD + height);
        self.context.line_to(PAD + width, PAD + height);
        self.context.stroke();

        // Legend.
        self.context.set_font(LABEL_FONT);
        self.context.set_fill_style_str(CROWD_SERIES_COLOR);
        let _ = self.context.fill_text("Crowd Count", PAD, 12.0);
        self.context.set_fill_style_str(VIOLATION_SERIES_COLOR);
        let _ = self.context.fill_text("Violations", PAD + 90.0, 12.0);

        // Oldest and newest labels anchor the x axis.
        self.context.set_fill_style_str(AXIS_COLOR);
        if let Some(first) = series.labels().first() {
            let _ = self.context.fill_text(first, PAD, PAD + height + 14.0);
        }
        if series.len() > 1
            && let Some(last) = series.labels().last()
        {
            let _ = self
                .context
                .fill_text(last, PAD + width - 50.0, PAD + height + 14.0);
        }
    }
}

impl TrendSurface for CanvasTrendChart {
    fn redraw(&mut self, series: &RollingSeries) {
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.draw_frame(series);

        let scale = vertical_scale(series);
        self.stroke_series(series.human_counts(), scale, CROWD_SERIES_COLOR);
        self.stroke_series(series.violation_counts(), scale, VIOLATION_SERIES_COLOR);
    }
}

impl core::fmt::Debug for CanvasTrendChart {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasTrendChart")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .finish_non_exhaustive()
    }
}

/// Shared vertical scale: the largest value on either axis, at least 1 so an
/// all-zero series still has a defined baseline.
fn vertical_scale(series: &RollingSeries) -> u32 {
    series
        .human_counts()
        .iter()
        .chain(series.violation_counts())
        .copied()
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Horizontal offset of point `index` in a series of `len` points, spread
/// evenly across `plot_width`. A lone point sits at the left edge.
fn x_at(index: usize, len: usize, plot_width: f64) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "series indices are at most the window size"
    )]
    let fraction = index as f64 / (len - 1) as f64;
    fraction * plot_width
}

/// Vertical offset of `value` under the shared `scale`, measured from the
/// plot top (larger values sit higher).
fn y_at(value: u32, scale: u32, plot_height: f64) -> f64 {
    let fraction = f64::from(value) / f64::from(scale.max(1));
    plot_height - fraction * plot_height
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn vertical_scale_covers_both_axes() {
        let mut series = RollingSeries::new();
        series.append("a".to_string(), 3, 9);
        series.append("b".to_string(), 5, 1);
        assert_eq!(vertical_scale(&series), 9, "violations dominate here");
    }

    #[test]
    fn vertical_scale_of_empty_series_is_one() {
        assert_eq!(vertical_scale(&RollingSeries::new()), 1);
    }

    #[test]
    fn points_spread_across_the_plot_width() {
        assert_eq!(x_at(0, 15, 280.0), 0.0);
        assert_eq!(x_at(14, 15, 280.0), 280.0);
        assert_eq!(x_at(7, 15, 280.0), 140.0);
        assert_eq!(x_at(0, 1, 280.0), 0.0, "a lone point sits at the edge");
    }

    #[test]
    fn larger_values_sit_higher() {
        assert_eq!(y_at(0, 10, 100.0), 100.0);
        assert_eq!(y_at(10, 10, 100.0), 0.0);
        assert_eq!(y_at(5, 10, 100.0), 50.0);
    }
}
