//! Canvas 2D rendering
//!
//! Scenes are built as a `DrawList` of plain commands from read-only state,
//! then handed to a `DrawSurface` which replays them. The browser surface
//! lives in `platform::web`; `RecordingSurface` keeps frames in memory.

pub mod paddle_ball;
pub mod recording;
pub mod wheel;

pub use paddle_ball::draw_game;
pub use recording::RecordingSurface;
pub use wheel::draw_wheel;

/// Outline settings
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

/// One drawing operation, in surface pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole surface, then fill it when a color is given
    Clear { color: Option<String> },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
    },
    /// Straight line, dashed when `dash` is non-empty
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
        dash: Vec<f64>,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: String,
        stroke: Option<Stroke>,
    },
    /// Pie slice from `start` to `end` (radians, clockwise on screen)
    Wedge {
        center: (f64, f64),
        radius: f64,
        start: f64,
        end: f64,
        fill: String,
        stroke: Option<Stroke>,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: String,
        stroke: Option<Stroke>,
    },
    /// Centered text rotated by `rotation` around its anchor
    Text {
        pos: (f64, f64),
        rotation: f64,
        text: String,
        color: String,
        font: String,
    },
}

/// Ordered commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }
}

/// Something a scene can be drawn onto. Owned by exactly one engine.
pub trait DrawSurface {
    /// Current size in pixels
    fn size(&self) -> (f64, f64);
    /// Replay a frame
    fn present(&mut self, list: &DrawList);
}
