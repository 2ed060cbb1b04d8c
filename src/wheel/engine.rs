//! Prize wheel engine
//!
//! Owns the rotation angle and runs one eased spin at a time. Driven by the
//! host: `spin` on a button press, `frame` on every animation frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::segment::{PrizeSegment, Wheel};
use super::spin::{SpinConfig, SpinPlan, winning_segment};
use crate::render::{DrawSurface, draw_wheel};
use crate::schedule::FrameLoop;

/// Spin session state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelPhase {
    Idle,
    Spinning(SpinPlan),
    /// Prize index computed, rotation held
    Resolved(usize),
}

/// Callbacks into the hosting shell
pub struct WheelCallbacks {
    pub on_back_to_selection: Box<dyn FnMut()>,
}

impl Default for WheelCallbacks {
    fn default() -> Self {
        Self {
            on_back_to_selection: Box::new(|| {}),
        }
    }
}

pub struct WheelEngine<S: DrawSurface> {
    wheel: Wheel,
    config: SpinConfig,
    surface: Option<S>,
    callbacks: WheelCallbacks,
    rng: Pcg32,
    rotation: f64,
    phase: WheelPhase,
    frames: FrameLoop,
    torn_down: bool,
}

impl<S: DrawSurface> WheelEngine<S> {
    /// Mount on `surface` and draw the idle wheel.
    ///
    /// Without a surface the engine is inert: nothing is drawn and every
    /// operation is ignored.
    pub fn mount(
        wheel: Wheel,
        config: SpinConfig,
        surface: Option<S>,
        callbacks: WheelCallbacks,
        seed: u64,
    ) -> Self {
        if surface.is_none() {
            log::warn!("Prize wheel mounted without a drawing surface; staying blank");
        }
        let mut engine = Self {
            wheel,
            config,
            surface,
            callbacks,
            rng: Pcg32::seed_from_u64(seed),
            rotation: 0.0,
            phase: WheelPhase::Idle,
            frames: FrameLoop::new(),
            torn_down: false,
        };
        engine.redraw();
        engine
    }

    fn is_live(&self) -> bool {
        self.surface.is_some() && !self.torn_down
    }

    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, WheelPhase::Spinning(_))
    }

    /// Buttons are disabled while the wheel turns
    pub fn can_interact(&self) -> bool {
        self.is_live() && !self.is_spinning()
    }

    /// Resolved prize index, if a spin has finished
    pub fn prize_index(&self) -> Option<usize> {
        match self.phase {
            WheelPhase::Resolved(index) => Some(index),
            _ => None,
        }
    }

    pub fn prize(&self) -> Option<&PrizeSegment> {
        self.prize_index().and_then(|i| self.wheel.get(i))
    }

    /// Whether the host should keep requesting animation frames
    pub fn wants_frame(&self) -> bool {
        self.is_live() && self.frames.is_requested()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Start a spin toward a uniformly random segment.
    /// Ignored while already spinning.
    pub fn spin(&mut self, now: f64) -> bool {
        if !self.can_interact() {
            return false;
        }
        let target = self.rng.random_range(0..self.wheel.len());
        let (min, max) = (
            self.config.min_full_rotations,
            self.config.max_full_rotations.max(self.config.min_full_rotations),
        );
        let full_rotations = self.rng.random_range(min..=max);
        self.spin_toward(now, target, full_rotations)
    }

    /// Start a spin that will land on `target`
    pub fn spin_toward(&mut self, now: f64, target: usize, full_rotations: u32) -> bool {
        if !self.can_interact() || target >= self.wheel.len() {
            return false;
        }
        let plan = SpinPlan::new(
            self.rotation,
            target,
            self.wheel.len(),
            full_rotations,
            now,
            self.config.duration_ms,
        );
        log::info!(
            "Wheel spin: target {} after {} full turns",
            target,
            full_rotations
        );
        self.phase = WheelPhase::Spinning(plan);
        self.frames.request();
        true
    }

    /// Advance the spin animation and redraw. Returns whether another frame
    /// is wanted.
    pub fn frame(&mut self, now: f64) -> bool {
        if !self.is_live() {
            return false;
        }
        let WheelPhase::Spinning(plan) = self.phase else {
            self.frames.cancel();
            return false;
        };

        self.rotation = plan.rotation_at(now);
        if plan.is_complete(now) {
            self.frames.cancel();
            let index = winning_segment(self.rotation, self.wheel.len());
            if index != plan.target {
                log::warn!(
                    "Wheel landed on {} but was aimed at {}",
                    index,
                    plan.target
                );
            }
            self.phase = WheelPhase::Resolved(index);
            if let Some(prize) = self.wheel.get(index) {
                log::info!("Wheel resolved: {} ({})", prize.label, index);
            }
        }

        self.redraw();
        self.frames.is_requested()
    }

    /// Back to rotation 0 with no prize. Refused while spinning.
    pub fn reset(&mut self) -> bool {
        if !self.can_interact() {
            return false;
        }
        self.rotation = 0.0;
        self.phase = WheelPhase::Idle;
        log::debug!("Wheel reset");
        self.redraw();
        true
    }

    /// Surface size changed; redraw at the current rotation
    pub fn resize(&mut self) {
        self.redraw();
    }

    /// User asked to leave. Refused while spinning.
    pub fn back_to_selection(&mut self) -> bool {
        if self.torn_down || self.is_spinning() {
            return false;
        }
        (self.callbacks.on_back_to_selection)();
        true
    }

    /// Release the frame loop. Nothing fires or draws afterwards.
    pub fn teardown(&mut self) {
        self.frames.cancel();
        self.torn_down = true;
        log::debug!("Wheel torn down");
    }

    fn redraw(&mut self) {
        if self.torn_down {
            return;
        }
        let rotation = self.rotation;
        if let Some(surface) = self.surface.as_mut() {
            let (width, height) = surface.size();
            let list = draw_wheel(&self.wheel, rotation, width, height);
            surface.present(&list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCmd, RecordingSurface};
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine(segments: usize) -> WheelEngine<RecordingSurface> {
        let prizes = (0..segments)
            .map(|i| PrizeSegment::new(format!("P{i}"), "#123456"))
            .collect();
        WheelEngine::mount(
            Wheel::new(prizes).expect("non-empty"),
            SpinConfig::default(),
            Some(RecordingSurface::new(800.0, 800.0)),
            WheelCallbacks::default(),
            99,
        )
    }

    fn run_to(engine: &mut WheelEngine<RecordingSurface>, from: f64, to: f64) {
        let mut now = from;
        while now <= to {
            engine.frame(now);
            now += 16.0;
        }
        engine.frame(to);
    }

    #[test]
    fn test_mount_draws_idle_wheel() {
        let e = engine(8);
        let surface = e.surface().expect("surface");
        assert_eq!(surface.frames, 1);
        assert!(matches!(surface.last.commands[1], DrawCmd::Wedge { .. }));
        assert_eq!(e.phase(), WheelPhase::Idle);
    }

    #[test]
    fn test_spin_resolves_on_target() {
        let mut e = engine(10);
        assert!(e.spin_toward(0.0, 3, 4));
        assert!(e.is_spinning());
        assert!(e.wants_frame());

        run_to(&mut e, 0.0, 4000.0);

        assert_eq!(e.phase(), WheelPhase::Resolved(3));
        assert_eq!(e.prize().map(|p| p.label.as_str()), Some("P3"));
        assert!(!e.wants_frame());
    }

    #[test]
    fn test_random_spin_lands_on_its_plan() {
        let mut e = engine(8);
        for round in 0..5 {
            let start = round as f64 * 10_000.0;
            assert!(e.spin(start));
            let WheelPhase::Spinning(plan) = e.phase() else {
                panic!("should be spinning");
            };
            assert!((3..=6).contains(&plan.full_rotations));
            run_to(&mut e, start, start + 4000.0);
            assert_eq!(e.prize_index(), Some(plan.target));
        }
    }

    #[test]
    fn test_spin_while_spinning_is_ignored() {
        let mut e = engine(8);
        e.spin_toward(0.0, 2, 3);
        e.frame(1000.0);
        let phase = e.phase();
        let rotation = e.rotation();

        assert!(!e.spin(1100.0));
        assert!(!e.spin_toward(1100.0, 5, 6));
        assert_eq!(e.phase(), phase);
        assert_eq!(e.rotation(), rotation);
        assert_eq!(e.prize_index(), None);
    }

    #[test]
    fn test_rotation_increases_during_spin() {
        let mut e = engine(8);
        e.spin_toward(0.0, 6, 5);
        let mut last = e.rotation();
        for t in (0..=4000).step_by(100) {
            e.frame(t as f64);
            assert!(e.rotation() >= last);
            last = e.rotation();
        }
    }

    #[test]
    fn test_reset_forbidden_while_spinning() {
        let mut e = engine(8);
        e.spin_toward(0.0, 1, 3);
        assert!(!e.reset());

        run_to(&mut e, 0.0, 4000.0);
        assert!(e.reset());
        assert_eq!(e.rotation(), 0.0);
        assert_eq!(e.phase(), WheelPhase::Idle);
        assert!(e.prize().is_none());
    }

    #[test]
    fn test_back_disabled_while_spinning() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut e = WheelEngine::mount(
            Wheel::default(),
            SpinConfig::default(),
            Some(RecordingSurface::new(500.0, 500.0)),
            WheelCallbacks {
                on_back_to_selection: Box::new(move || counter.set(counter.get() + 1)),
            },
            1,
        );

        e.spin_toward(0.0, 0, 3);
        assert!(!e.back_to_selection());
        assert_eq!(count.get(), 0);

        run_to(&mut e, 0.0, 4000.0);
        assert!(e.back_to_selection());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_missing_surface_is_inert() {
        let mut e: WheelEngine<RecordingSurface> = WheelEngine::mount(
            Wheel::default(),
            SpinConfig::default(),
            None,
            WheelCallbacks::default(),
            5,
        );
        assert!(!e.spin(0.0));
        assert!(!e.frame(100.0));
        assert_eq!(e.phase(), WheelPhase::Idle);
    }

    #[test]
    fn test_resize_redraws_at_current_rotation() {
        let mut e = engine(8);
        e.spin_toward(0.0, 4, 3);
        run_to(&mut e, 0.0, 4000.0);
        let frames = e.surface().map(|s| s.frames).unwrap_or(0);

        if let Some(surface) = e.surface_mut() {
            surface.resize(300.0, 200.0);
        }
        e.resize();

        let surface = e.surface().expect("surface");
        assert_eq!(surface.frames, frames + 1);
        match &surface.last.commands[1] {
            DrawCmd::Wedge { center, start, .. } => {
                assert_eq!(*center, (150.0, 100.0));
                assert!((start - (e.rotation() - std::f64::consts::FRAC_PI_2)).abs() < 1e-9);
            }
            other => panic!("expected wedge, got {other:?}"),
        }
    }

    #[test]
    fn test_teardown_stops_animation() {
        let mut e = engine(8);
        e.spin_toward(0.0, 2, 3);
        e.teardown();
        let frames = e.surface().map(|s| s.frames).unwrap_or(0);
        assert!(!e.frame(5000.0));
        assert!(e.is_spinning(), "No resolution after teardown");
        assert_eq!(e.surface().map(|s| s.frames), Some(frames));
    }
}
