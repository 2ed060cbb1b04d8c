//! Prize wheel
//!
//! - `segment`: prize list, fixed for the wheel's lifetime
//! - `spin`: angle convention, easing and the target/outcome formulas
//! - `engine`: spin session driven by animation frames

pub mod engine;
pub mod segment;
pub mod spin;

pub use engine::{WheelCallbacks, WheelEngine, WheelPhase};
pub use segment::{PrizeSegment, Wheel, default_prizes};
pub use spin::{SpinConfig, SpinPlan, ease_out_cubic, segment_angle, target_offset, winning_segment};
