//! Paddle-ball engine
//!
//! One instance per mounted view. Owns the game state, the input arbiter,
//! the deferred timers and the drawing surface. The host calls `frame(now)`
//! on every animation frame while `wants_frame()` is true and forwards
//! touch/pointer events to the input handlers.
//!
//! Within a frame: due timers fire first, then physics, then rendering.

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::render::{DrawSurface, draw_game};
use crate::schedule::{FrameLoop, TimerId, Timers};
use crate::sim::{
    GameConfig, GameEvent, GamePhase, GameRng, GameState, InputArbiter, InputMode, Playfield,
    Score, Side, TouchId, tick,
};

/// Deferred transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Serve a new ball after a point
    BallReset,
    /// Hand the winner to the shell
    WinTransition(Side),
}

/// Callbacks into the hosting shell
pub struct PaddleBallCallbacks {
    pub on_back_to_selection: Box<dyn FnMut()>,
    /// Fires once per finished game, after the post-win delay
    pub on_win_transition: Box<dyn FnMut(Side)>,
}

impl Default for PaddleBallCallbacks {
    fn default() -> Self {
        Self {
            on_back_to_selection: Box::new(|| {}),
            on_win_transition: Box::new(|_| {}),
        }
    }
}

pub struct PaddleBallEngine<S: DrawSurface> {
    state: GameState,
    rng: GameRng,
    input: InputArbiter,
    timers: Timers<TimerKind>,
    reset_timer: Option<TimerId>,
    win_timer: Option<TimerId>,
    frames: FrameLoop,
    surface: Option<S>,
    callbacks: PaddleBallCallbacks,
    torn_down: bool,
}

fn playfield_of<S: DrawSurface>(surface: Option<&S>) -> Playfield {
    match surface {
        Some(surface) => {
            let (width, height) = surface.size();
            Playfield::new(width as f32, height as f32)
        }
        None => Playfield::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
    }
}

impl<S: DrawSurface> PaddleBallEngine<S> {
    /// Mount on `surface`, lay out the idle playfield and draw it.
    ///
    /// Without a surface the engine stays blank and ignores every call.
    pub fn mount(
        config: GameConfig,
        surface: Option<S>,
        callbacks: PaddleBallCallbacks,
        seed: u64,
    ) -> Self {
        if surface.is_none() {
            log::warn!("Paddle-ball mounted without a drawing surface; staying blank");
        }
        let mut rng = GameRng::new(seed);
        let playfield = playfield_of(surface.as_ref());
        let state = GameState::new(config, playfield, &mut rng);
        log::info!(
            "Paddle-ball mounted on {}x{} (seed {})",
            playfield.width,
            playfield.height,
            seed
        );

        let mut engine = Self {
            state,
            rng,
            input: InputArbiter::new(),
            timers: Timers::new(),
            reset_timer: None,
            win_timer: None,
            frames: FrameLoop::new(),
            surface,
            callbacks,
            torn_down: false,
        };
        engine.redraw();
        engine
    }

    fn is_live(&self) -> bool {
        self.surface.is_some() && !self.torn_down
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts that script a session (demo, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    /// False once the game is finished; start/stop controls are disabled
    pub fn can_interact(&self) -> bool {
        self.is_live() && self.state.phase != GamePhase::Finished
    }

    /// Whether the host should keep requesting animation frames
    pub fn wants_frame(&self) -> bool {
        self.is_live() && self.frames.is_requested()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Begin a fresh game. Only from `Idle`; ignored otherwise, including
    /// `PointScored`, where the pending ball reset resumes play.
    pub fn start(&mut self, now: f64) -> bool {
        if !self.is_live() || self.state.phase != GamePhase::Idle {
            return false;
        }
        self.state.reset_match();
        let playfield = playfield_of(self.surface.as_ref());
        self.state.initialize(playfield, &mut self.rng);
        self.state.phase = GamePhase::Playing;
        self.frames.request();
        log::info!("Paddle-ball started at {:.0}ms", now);
        true
    }

    /// Halt the loop and any pending ball reset. Refused once finished.
    pub fn stop(&mut self) -> bool {
        if !self.can_interact() {
            return false;
        }
        self.frames.cancel();
        if let Some(id) = self.reset_timer.take() {
            self.timers.cancel(id);
        }
        self.state.phase = GamePhase::Idle;
        self.state.out_of_play = false;
        log::info!(
            "Paddle-ball stopped at {}-{}",
            self.state.score.left,
            self.state.score.right
        );
        self.redraw();
        true
    }

    /// Leave `Finished` for a new `Idle` game
    pub fn new_game(&mut self) -> bool {
        if !self.is_live() || self.state.phase != GamePhase::Finished {
            return false;
        }
        self.frames.cancel();
        self.cancel_timers();
        self.state.reset_match();
        let playfield = playfield_of(self.surface.as_ref());
        self.state.initialize(playfield, &mut self.rng);
        log::info!("Paddle-ball reset for a new game");
        self.redraw();
        true
    }

    /// The surface changed size. Lays the playfield out again while idle.
    pub fn resize(&mut self) {
        if !self.is_live() {
            return;
        }
        if self.state.phase == GamePhase::Idle {
            let playfield = playfield_of(self.surface.as_ref());
            self.state.initialize(playfield, &mut self.rng);
            log::debug!("Playfield resized to {}x{}", playfield.width, playfield.height);
        }
        self.redraw();
    }

    /// One animation frame. Returns whether another frame is wanted.
    pub fn frame(&mut self, now: f64) -> bool {
        if !self.is_live() || !self.frames.is_requested() {
            return false;
        }

        for kind in self.timers.take_due(now) {
            self.fire(kind);
        }

        for event in tick(&mut self.state) {
            match event {
                GameEvent::PointScored(side) => {
                    log::info!(
                        "Point to {} ({}-{})",
                        side.as_str(),
                        self.state.score.left,
                        self.state.score.right
                    );
                    let delay = self.state.config.point_delay_ms;
                    self.reset_timer = Some(self.timers.schedule(now, delay, TimerKind::BallReset));
                }
                GameEvent::GameWon(side) => {
                    log::info!(
                        "{} wins {}-{}",
                        side.as_str(),
                        self.state.score.left,
                        self.state.score.right
                    );
                    let delay = self.state.config.win_transition_delay_ms;
                    self.win_timer =
                        Some(self.timers.schedule(now, delay, TimerKind::WinTransition(side)));
                }
                GameEvent::WallBounce | GameEvent::PaddleHit(_) => {}
            }
        }

        self.redraw();

        let running = matches!(
            self.state.phase,
            GamePhase::Playing | GamePhase::PointScored
        );
        if !running && self.timers.is_empty() {
            self.frames.cancel();
        }
        self.frames.is_requested()
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::BallReset => {
                self.reset_timer = None;
                if self.state.phase == GamePhase::PointScored {
                    self.state.reset_ball(&mut self.rng);
                    self.state.phase = GamePhase::Playing;
                }
            }
            TimerKind::WinTransition(side) => {
                self.win_timer = None;
                log::debug!("Win transition for {}", side.as_str());
                (self.callbacks.on_win_transition)(side);
            }
        }
    }

    /// Contact began at playfield coordinates
    pub fn touch_start(&mut self, id: TouchId, x: f32, y: f32) -> bool {
        if !self.is_live() {
            return false;
        }
        self.input
            .touch_start(id, x, y, self.state.playfield.width)
            .is_some()
    }

    pub fn touch_move(&mut self, id: TouchId, y: f32) -> bool {
        self.is_live() && self.input.touch_move(id, y, &mut self.state)
    }

    /// Contact released or cancelled
    pub fn touch_end(&mut self, id: TouchId) -> bool {
        self.is_live() && self.input.touch_end(id).is_some()
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.is_live() && self.input.pointer_move(x, y, &mut self.state)
    }

    /// User asked to leave the game
    pub fn back_to_selection(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        (self.callbacks.on_back_to_selection)();
        true
    }

    /// Release everything: the frame request first, then the timers.
    /// No callback fires afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.frames.cancel();
        self.cancel_timers();
        self.input.clear();
        self.torn_down = true;
        log::debug!("Paddle-ball torn down");
    }

    fn cancel_timers(&mut self) {
        self.reset_timer = None;
        self.win_timer = None;
        self.timers.cancel_all();
    }

    fn redraw(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            let list = draw_game(&self.state);
            surface.present(&list);
        }
    }
}
