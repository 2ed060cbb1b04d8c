//! Prize wheel scene

use std::f64::consts::FRAC_PI_2;

use super::{DrawCmd, DrawList, Stroke};
use crate::wheel::segment::Wheel;
use crate::wheel::spin::{SEGMENT_ORIGIN, segment_angle};

const BORDER: &str = "#FFFFFF";
const BORDER_WIDTH: f64 = 3.0;
const LABEL_COLOR: &str = "#FFFFFF";
const LABEL_FONT: &str = "bold 18px Arial";
const INDICATOR_FILL: &str = "#E74C3C";
const INDICATOR_SIZE: f64 = 30.0;
const INDICATOR_GAP: f64 = 10.0;
const HUB_FILL: &str = "#2C3E50";
const HUB_RADIUS: f64 = 20.0;

/// Wheel radius relative to the smaller surface dimension
pub const RADIUS_FRACTION: f64 = 0.35;
/// Labels sit this far out along each segment's bisector
const LABEL_RADIUS_FRACTION: f64 = 0.7;

/// Build the wheel frame at `rotation` for a `width` x `height` surface
pub fn draw_wheel(wheel: &Wheel, rotation: f64, width: f64, height: f64) -> DrawList {
    let mut list = DrawList::new();
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = width.min(height) * RADIUS_FRACTION;
    let arc = segment_angle(wheel.len());

    list.push(DrawCmd::Clear { color: None });

    for (i, segment) in wheel.segments().iter().enumerate() {
        let start = rotation + SEGMENT_ORIGIN + i as f64 * arc;
        let end = start + arc;

        list.push(DrawCmd::Wedge {
            center: (cx, cy),
            radius,
            start,
            end,
            fill: segment.color.clone(),
            stroke: Some(Stroke::new(BORDER, BORDER_WIDTH)),
        });

        let bisector = start + arc / 2.0;
        let label_radius = radius * LABEL_RADIUS_FRACTION;
        list.push(DrawCmd::Text {
            pos: (
                cx + bisector.cos() * label_radius,
                cy + bisector.sin() * label_radius,
            ),
            rotation: bisector + FRAC_PI_2,
            text: segment.label.clone(),
            color: LABEL_COLOR.to_string(),
            font: LABEL_FONT.to_string(),
        });
    }

    // Indicator: apex points down at the rim
    let apex_y = cy - radius - INDICATOR_GAP;
    list.push(DrawCmd::Polygon {
        points: vec![
            (cx, apex_y),
            (cx - INDICATOR_SIZE / 2.0, apex_y - INDICATOR_SIZE),
            (cx + INDICATOR_SIZE / 2.0, apex_y - INDICATOR_SIZE),
        ],
        fill: INDICATOR_FILL.to_string(),
        stroke: Some(Stroke::new(BORDER, BORDER_WIDTH)),
    });

    list.push(DrawCmd::Circle {
        center: (cx, cy),
        radius: HUB_RADIUS,
        fill: HUB_FILL.to_string(),
        stroke: Some(Stroke::new(BORDER, BORDER_WIDTH)),
    });

    list
}
