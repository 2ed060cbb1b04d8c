//! Game state and core simulation types
//!
//! Everything one paddle-ball session mutates lives here, owned by a single
//! engine instance.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which half of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Side owning horizontal position `x` (the midline belongs to the right)
    pub fn of_x(x: f32, playfield_width: f32) -> Side {
        if x < playfield_width / 2.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started (or stopped)
    Idle,
    /// Ball in motion
    Playing,
    /// Ball frozen for the point delay
    PointScored,
    /// A side reached the winning score; terminal until a new game
    Finished,
}

/// Physics and playfield tuning for one engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub paddle_spin: f32,
    pub win_score: u8,
    pub point_delay_ms: f64,
    pub win_transition_delay_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            paddle_spin: PADDLE_SPIN,
            win_score: WIN_SCORE,
            point_delay_ms: POINT_DELAY_MS,
            win_transition_delay_ms: WIN_TRANSITION_DELAY_MS,
        }
    }
}

/// The rectangle paddles and ball live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }
}

/// A player's paddle; `x`/`y` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle vertically centered on its side of the playfield
    pub fn centered(side: Side, playfield: &Playfield, config: &GameConfig) -> Self {
        let x = match side {
            Side::Left => config.paddle_inset,
            Side::Right => playfield.width - config.paddle_inset - config.paddle_width,
        };
        let mut paddle = Self {
            side,
            x,
            y: 0.0,
            width: config.paddle_width,
            height: config.paddle_height,
        };
        paddle.set_top(playfield.height / 2.0 - config.paddle_height / 2.0, playfield);
        paddle
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Largest valid top edge for this playfield
    pub fn max_y(&self, playfield: &Playfield) -> f32 {
        (playfield.height - self.height).max(0.0)
    }

    /// Keep the paddle fully inside the playfield vertically
    pub fn clamp(&mut self, playfield: &Playfield) {
        let y = if self.y.is_finite() { self.y } else { 0.0 };
        self.y = y.clamp(0.0, self.max_y(playfield));
    }

    pub fn set_top(&mut self, y: f32, playfield: &Playfield) {
        self.y = y;
        self.clamp(playfield);
    }

    pub fn set_center(&mut self, center_y: f32, playfield: &Playfield) {
        self.set_top(center_y - self.height / 2.0, playfield);
    }

    /// X coordinate of the face the ball bounces off
    pub fn front_face(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add one point and return the side's new total
    pub fn increment(&mut self, side: Side) -> u8 {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Seeded RNG wrapper so every launch angle is reproducible from the seed
#[derive(Debug, Clone)]
pub struct GameRng(pub Pcg32);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Launch velocity: horizontal ±speed, vertical uniform in [-speed/2, speed/2]
    pub fn launch_velocity(&mut self, speed: f32) -> Vec2 {
        let vx = if self.0.random_bool(0.5) { speed } else { -speed };
        let half = speed / 2.0;
        let vy = if half > 0.0 {
            self.0.random_range(-half..=half)
        } else {
            0.0
        };
        Vec2::new(vx, vy)
    }
}

/// Complete state of one paddle-ball session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub playfield: Playfield,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub phase: GamePhase,
    /// Set when the ball leaves play, cleared by the ball reset
    pub out_of_play: bool,
    pub winner: Option<Side>,
}

impl GameState {
    pub fn new(config: GameConfig, playfield: Playfield, rng: &mut GameRng) -> Self {
        let mut state = Self {
            config,
            playfield,
            left: Paddle::centered(Side::Left, &playfield, &config),
            right: Paddle::centered(Side::Right, &playfield, &config),
            ball: Ball::new(playfield.center(), Vec2::ZERO, config.ball_radius),
            score: Score::new(),
            phase: GamePhase::Idle,
            out_of_play: false,
            winner: None,
        };
        state.initialize(playfield, rng);
        state
    }

    /// Center both paddles and serve a fresh ball for the given playfield
    pub fn initialize(&mut self, playfield: Playfield, rng: &mut GameRng) {
        self.playfield = playfield;
        self.left = Paddle::centered(Side::Left, &playfield, &self.config);
        self.right = Paddle::centered(Side::Right, &playfield, &self.config);
        self.reset_ball(rng);
    }

    /// Ball back to the center with a new random velocity
    pub fn reset_ball(&mut self, rng: &mut GameRng) {
        self.ball = Ball::new(
            self.playfield.center(),
            rng.launch_velocity(self.config.ball_speed),
            self.config.ball_radius,
        );
        self.out_of_play = false;
    }

    /// Clear scores and winner for a new game
    pub fn reset_match(&mut self) {
        self.score = Score::new();
        self.winner = None;
        self.out_of_play = false;
        self.phase = GamePhase::Idle;
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn clamp_paddles(&mut self) {
        let playfield = self.playfield;
        self.left.clamp(&playfield);
        self.right.clamp(&playfield);
    }
}
