//! Summary graph data preparation
//!
//! The summary screen plots one metric's history inside a frame rect. The
//! engine owns the normalization; the frontend just connects the returned
//! points with `draw_line`.

use glam::Vec2;

use crate::engine::Rect;

/// Map a time series into `frame`: points evenly spaced left to right, y
/// scaled so the series maximum touches the frame top and zero sits on the
/// bottom edge. Timestamps only order the points; spacing ignores gaps.
pub fn polyline(series: &[(u64, f64)], frame: &Rect) -> Vec<Vec2> {
    if series.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<(u64, f64)> = series.to_vec();
    sorted.sort_by_key(|&(at, _)| at);

    let max_value = sorted.iter().fold(0.0_f64, |acc, &(_, v)| acc.max(v));
    let y_scale = if max_value > 0.0 {
        frame.height() as f64 / max_value
    } else {
        0.0
    };

    if sorted.len() == 1 {
        let y = frame.max.y - (sorted[0].1 * y_scale) as f32;
        return vec![Vec2::new(frame.min.x + frame.width() / 2.0, y)];
    }

    let x_step = frame.width() / (sorted.len() - 1) as f32;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &(_, value))| {
            Vec2::new(
                frame.min.x + i as f32 * x_step,
                frame.max.y - (value * y_scale) as f32,
            )
        })
        .collect()
}
