//! Collision detection and response
//!
//! Walls reflect vertical velocity, paddles reflect horizontal velocity and
//! add spin, side edges take the ball out of play.

use super::state::{Ball, Paddle, Playfield, Side};

/// Result of a paddle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub side: Side,
    /// Hit position on the paddle: 0 = center, -1/+1 = top/bottom edge
    pub offset: f32,
}

/// Bounce off the top or bottom wall.
///
/// Inverts vertical velocity and clamps the ball back inside so it cannot
/// tunnel through or stick to the wall. Returns true on a bounce.
pub fn bounce_walls(ball: &mut Ball, playfield: &Playfield) -> bool {
    let min_y = ball.radius;
    let max_y = (playfield.height - ball.radius).max(min_y);

    if ball.pos.y - ball.radius <= 0.0 {
        ball.vel.y = ball.vel.y.abs();
        ball.pos.y = min_y;
        true
    } else if ball.pos.y + ball.radius >= playfield.height {
        ball.vel.y = -ball.vel.y.abs();
        ball.pos.y = max_y;
        true
    } else {
        false
    }
}

/// Whether the ball currently overlaps the paddle's front face while moving
/// toward it. Balls moving away never collide, so one contact can't bounce twice.
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let moving_toward = match paddle.side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };
    if !moving_toward {
        return false;
    }

    let face = paddle.front_face();
    let overlaps_face = match paddle.side {
        Side::Left => ball.pos.x - ball.radius <= face && ball.pos.x + ball.radius >= paddle.x,
        Side::Right => {
            ball.pos.x + ball.radius >= face && ball.pos.x - ball.radius <= paddle.x + paddle.width
        }
    };
    let within_height = ball.pos.y >= paddle.y && ball.pos.y <= paddle.y + paddle.height;

    overlaps_face && within_height
}

/// Check and resolve a ball/paddle collision.
///
/// On a hit: horizontal velocity flips, vertical velocity gains
/// `offset * spin` where offset is the normalized distance from the paddle
/// center, and the ball is placed flush against the front face.
pub fn collide_paddle(ball: &mut Ball, paddle: &Paddle, spin: f32) -> Option<PaddleHit> {
    if !touches_paddle(ball, paddle) {
        return None;
    }

    let half_height = paddle.height / 2.0;
    let offset = if half_height > 0.0 {
        (ball.pos.y - paddle.center_y()) / half_height
    } else {
        0.0
    };

    ball.vel.x = -ball.vel.x;
    ball.vel.y += offset * spin;

    let face = paddle.front_face();
    ball.pos.x = match paddle.side {
        Side::Left => face + ball.radius,
        Side::Right => face - ball.radius,
    };

    Some(PaddleHit {
        side: paddle.side,
        offset,
    })
}

/// Side whose edge the ball has fully crossed, if any.
///
/// The returned side is the one that conceded; its opponent scores.
pub fn out_of_play(ball: &Ball, playfield: &Playfield) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Left)
    } else if ball.pos.x - ball.radius > playfield.width {
        Some(Side::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0)
    }

    fn left_paddle() -> Paddle {
        Paddle::centered(Side::Left, &field(), &GameConfig::default())
    }

    fn right_paddle() -> Paddle {
        Paddle::centered(Side::Right, &field(), &GameConfig::default())
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut ball = Ball::new(Vec2::new(400.0, 5.0), Vec2::new(6.0, -3.0), 12.0);
        assert!(bounce_walls(&mut ball, &field()));
        assert!(ball.vel.y > 0.0, "Ball should bounce down");
        assert_eq!(ball.vel.x, 6.0, "X velocity should be unchanged");
        assert_eq!(ball.pos.y, 12.0, "Ball should be pushed out of wall");
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let mut ball = Ball::new(Vec2::new(400.0, 598.0), Vec2::new(6.0, 3.0), 12.0);
        assert!(bounce_walls(&mut ball, &field()));
        assert!(ball.vel.y < 0.0, "Ball should bounce up");
        assert_eq!(ball.pos.y, 588.0);
    }

    #[test]
    fn test_no_bounce_mid_field() {
        let mut ball = Ball::new(Vec2::new(400.0, 300.0), Vec2::new(6.0, 3.0), 12.0);
        assert!(!bounce_walls(&mut ball, &field()));
        assert_eq!(ball.vel, Vec2::new(6.0, 3.0));
    }

    #[test]
    fn test_center_hit_left_paddle() {
        let paddle = left_paddle();
        // Face at x=45, paddle spans y 240..360
        let mut ball = Ball::new(Vec2::new(50.0, 300.0), Vec2::new(-6.0, 1.0), 12.0);
        let hit = collide_paddle(&mut ball, &paddle, 2.0).expect("should hit");
        assert_eq!(hit.side, Side::Left);
        assert_eq!(hit.offset, 0.0);
        assert_eq!(ball.vel, Vec2::new(6.0, 1.0));
        assert_eq!(ball.pos.x, 57.0, "Ball should sit flush against the face");
    }

    #[test]
    fn test_edge_hit_adds_spin() {
        let paddle = right_paddle();
        // Face at x=755; hit at the bottom edge (y=360)
        let mut ball = Ball::new(Vec2::new(750.0, 360.0), Vec2::new(6.0, 0.0), 12.0);
        let hit = collide_paddle(&mut ball, &paddle, 2.0).expect("should hit");
        assert_eq!(hit.offset, 1.0);
        assert_eq!(ball.vel, Vec2::new(-6.0, 2.0));
        assert_eq!(ball.pos.x, 743.0);
    }

    #[test]
    fn test_ball_moving_away_is_ignored() {
        let paddle = left_paddle();
        let mut ball = Ball::new(Vec2::new(50.0, 300.0), Vec2::new(6.0, 0.0), 12.0);
        assert!(collide_paddle(&mut ball, &paddle, 2.0).is_none());
        assert_eq!(ball.vel.x, 6.0);
    }

    #[test]
    fn test_ball_beside_paddle_misses() {
        let paddle = left_paddle();
        let mut ball = Ball::new(Vec2::new(50.0, 100.0), Vec2::new(-6.0, 0.0), 12.0);
        assert!(collide_paddle(&mut ball, &paddle, 2.0).is_none());
    }

    #[test]
    fn test_out_of_play_sides() {
        let f = field();
        let gone_left = Ball::new(Vec2::new(-13.0, 300.0), Vec2::ZERO, 12.0);
        let gone_right = Ball::new(Vec2::new(813.0, 300.0), Vec2::ZERO, 12.0);
        let partly_out = Ball::new(Vec2::new(-5.0, 300.0), Vec2::ZERO, 12.0);
        assert_eq!(out_of_play(&gone_left, &f), Some(Side::Left));
        assert_eq!(out_of_play(&gone_right, &f), Some(Side::Right));
        assert_eq!(out_of_play(&partly_out, &f), None);
    }

    proptest! {
        #[test]
        fn prop_wall_bounce_keeps_ball_inside(y in -50.0f32..650.0, vy in -20.0f32..20.0) {
            let mut ball = Ball::new(Vec2::new(400.0, y), Vec2::new(6.0, vy), 12.0);
            bounce_walls(&mut ball, &field());
            if y - 12.0 <= 0.0 || y + 12.0 >= 600.0 {
                prop_assert!(ball.pos.y >= 12.0 && ball.pos.y <= 588.0);
            }
        }

        #[test]
        fn prop_paddle_hit_leaves_ball_outside_body(
            x in 40.0f32..60.0,
            y in 240.0f32..=360.0,
            vx in -12.0f32..-0.5,
        ) {
            let paddle = left_paddle();
            let mut ball = Ball::new(Vec2::new(x, y), Vec2::new(vx, 0.0), 12.0);
            if collide_paddle(&mut ball, &paddle, 2.0).is_some() {
                ball.pos += ball.vel;
                prop_assert!(ball.pos.x - ball.radius > paddle.front_face());
                prop_assert!(!touches_paddle(&ball, &paddle));
            }
        }
    }
}
