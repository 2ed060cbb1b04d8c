//! Kiosk Arcade
//!
//! The browser build is a library (`platform::web`). Natively this runs a
//! headless session: a scripted left player against an idle right player,
//! then a prize spin for the winner.

#[cfg(not(target_arch = "wasm32"))]
use std::cell::RefCell;
#[cfg(not(target_arch = "wasm32"))]
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use kiosk_arcade::consts::FRAME_MS;
#[cfg(not(target_arch = "wasm32"))]
use kiosk_arcade::render::RecordingSurface;
#[cfg(not(target_arch = "wasm32"))]
use kiosk_arcade::sim::Side;
#[cfg(not(target_arch = "wasm32"))]
use kiosk_arcade::{
    KioskAction, KioskSettings, PaddleBallCallbacks, PaddleBallEngine, WheelCallbacks, WheelEngine,
};

/// Give up on a match after this much simulated time
#[cfg(not(target_arch = "wasm32"))]
const MATCH_LIMIT_MS: f64 = 10.0 * 60_000.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Kiosk arcade (native) starting...");

    let settings = KioskSettings::load();
    let mut kiosk = settings.kiosk();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(7);

    let mut now = 0.0;
    kiosk.transition(KioskAction::TapToPlay, now);
    kiosk.transition(KioskAction::Confirm, now);

    let winner: Rc<RefCell<Option<Side>>> = Rc::new(RefCell::new(None));
    let mut game = {
        let winner = winner.clone();
        PaddleBallEngine::mount(
            settings.game_config(),
            Some(RecordingSurface::new(800.0, 600.0)),
            PaddleBallCallbacks {
                on_back_to_selection: Box::new(|| {}),
                on_win_transition: Box::new(move |side| *winner.borrow_mut() = Some(side)),
            },
            seed,
        )
    };
    game.start(now);

    while winner.borrow().is_none() && now < MATCH_LIMIT_MS {
        now += FRAME_MS;
        // Left player keeps its paddle on the ball
        let ball_y = game.state().ball.pos.y;
        if game.pointer_move(100.0, ball_y) {
            kiosk.record_activity(now);
        }
        if !game.frame(now) {
            break;
        }
    }
    game.teardown();

    let Some(side) = *winner.borrow() else {
        log::warn!("No winner after {:.0}s", now / 1000.0);
        return;
    };
    let score = game.score();
    log::info!("{} won {}-{}", side.as_str(), score.left, score.right);
    kiosk.transition(KioskAction::WinTransition, now);

    let mut wheel = WheelEngine::mount(
        settings.wheel(),
        settings.spin_config(),
        Some(RecordingSurface::new(800.0, 800.0)),
        WheelCallbacks::default(),
        seed,
    );
    wheel.spin(now);
    while wheel.frame(now) {
        now += FRAME_MS;
    }
    match wheel.prize() {
        Some(prize) => log::info!("Prize: {}", prize.label),
        None => log::warn!("Wheel did not resolve"),
    }

    wheel.back_to_selection();
    wheel.teardown();
    kiosk.transition(KioskAction::BackToSelection, now);
    log::info!("Back to {:?}", kiosk.screen());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
