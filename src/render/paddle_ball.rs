//! Paddle-ball scene

use super::{DrawCmd, DrawList, Stroke};
use crate::sim::GameState;

pub const BACKGROUND: &str = "#0f172a";
pub const CENTER_LINE: &str = "#64748b";
pub const LEFT_PADDLE: &str = "#3b82f6";
pub const RIGHT_PADDLE: &str = "#ef4444";
pub const BALL: &str = "#ffffff";

const CENTER_LINE_WIDTH: f64 = 3.0;
const CENTER_LINE_DASH: [f64; 2] = [20.0, 15.0];

/// Build the frame for the current state. Reads only.
pub fn draw_game(state: &GameState) -> DrawList {
    let mut list = DrawList::new();
    let width = state.playfield.width as f64;
    let height = state.playfield.height as f64;

    list.push(DrawCmd::Clear {
        color: Some(BACKGROUND.to_string()),
    });

    list.push(DrawCmd::Line {
        from: (width / 2.0, 0.0),
        to: (width / 2.0, height),
        stroke: Stroke::new(CENTER_LINE, CENTER_LINE_WIDTH),
        dash: CENTER_LINE_DASH.to_vec(),
    });

    for (paddle, color) in [(&state.left, LEFT_PADDLE), (&state.right, RIGHT_PADDLE)] {
        list.push(DrawCmd::FillRect {
            x: paddle.x as f64,
            y: paddle.y as f64,
            w: paddle.width as f64,
            h: paddle.height as f64,
            color: color.to_string(),
        });
    }

    list.push(DrawCmd::Circle {
        center: (state.ball.pos.x as f64, state.ball.pos.y as f64),
        radius: state.ball.radius as f64,
        fill: BALL.to_string(),
        stroke: None,
    });

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameConfig, GameRng, Playfield};

    #[test]
    fn test_scene_layout() {
        let mut rng = GameRng::new(3);
        let state = GameState::new(GameConfig::default(), Playfield::new(800.0, 600.0), &mut rng);
        let before = state.clone();

        let list = draw_game(&state);

        assert_eq!(list.len(), 5);
        assert!(matches!(&list.commands[0], DrawCmd::Clear { color: Some(color) } if color == BACKGROUND));
        match &list.commands[1] {
            DrawCmd::Line { from, to, dash, .. } => {
                assert_eq!(*from, (400.0, 0.0));
                assert_eq!(*to, (400.0, 600.0));
                assert_eq!(dash, &vec![20.0, 15.0]);
            }
            other => panic!("expected center line, got {other:?}"),
        }
        assert!(matches!(
            &list.commands[2],
            DrawCmd::FillRect { x, y, color, .. } if *x == 30.0 && *y == 240.0 && color == LEFT_PADDLE
        ));
        assert!(matches!(
            &list.commands[3],
            DrawCmd::FillRect { x, color, .. } if *x == 755.0 && color == RIGHT_PADDLE
        ));
        assert!(matches!(
            &list.commands[4],
            DrawCmd::Circle { center, radius, .. } if *center == (400.0, 300.0) && *radius == 12.0
        ));

        // Rendering must not touch the state
        assert_eq!(state.ball, before.ball);
        assert_eq!(state.left, before.left);
    }
}
