//! Kiosk Arcade - touch kiosk attractions
//!
//! Core modules:
//! - `sim`: Paddle-ball simulation (physics, scoring, input arbitration)
//! - `engine`: Paddle-ball engine lifecycle (start/stop, timers, callbacks)
//! - `wheel`: Prize wheel (spin planning, easing, outcome)
//! - `render`: Draw-command lists and the drawing surface seam
//! - `schedule`: Deferred timers with cancellation tokens
//! - `kiosk`: Screen flow with idle reset
//! - `platform`: Browser glue (wasm32 only)

pub mod engine;
pub mod kiosk;
pub mod platform;
pub mod render;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod wheel;

pub use engine::{PaddleBallCallbacks, PaddleBallEngine};
pub use kiosk::{Kiosk, KioskAction, Screen};
pub use settings::KioskSettings;
pub use wheel::{WheelCallbacks, WheelEngine};

/// Game configuration constants
pub mod consts {
    /// Default playfield size (replaced by the canvas size on mount)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Gap between the side wall and the paddle's outer edge
    pub const PADDLE_INSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Horizontal speed per frame; vertical launch speed is drawn from ±half of this
    pub const BALL_SPEED: f32 = 6.0;
    /// Vertical velocity added by a hit at the very edge of a paddle
    pub const PADDLE_SPIN: f32 = 2.0;

    /// First side to reach this wins
    pub const WIN_SCORE: u8 = 3;
    /// Ball stays frozen this long after a point (ms)
    pub const POINT_DELAY_MS: f64 = 1000.0;
    /// Delay between the winning point and the win callback (ms)
    pub const WIN_TRANSITION_DELAY_MS: f64 = 3000.0;

    /// Wheel spin animation length (ms)
    pub const SPIN_DURATION_MS: f64 = 4000.0;
    /// Inclusive range of whole revolutions added to every spin
    pub const MIN_FULL_ROTATIONS: u32 = 3;
    pub const MAX_FULL_ROTATIONS: u32 = 6;

    /// Return to the welcome screen after this much inactivity (ms)
    pub const IDLE_TIMEOUT_MS: f64 = 60_000.0;

    /// Nominal frame length used by the native demo (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-18) < TAU);
    }
}
