//! Kiosk screen flow
//!
//! Welcome → confirmation → (game selection) → paddle-ball → prize wheel,
//! with an inactivity timeout that returns to the welcome screen.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::consts::IDLE_TIMEOUT_MS;

/// Kiosk screens
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Confirmation,
    GameSelection,
    PaddleBall,
    PrizeWheel,
}

/// Actions that trigger screen transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskAction {
    TapToPlay,
    Confirm,
    Cancel,
    SelectPaddleBall,
    BackToSelection,
    WinTransition,
    IdleTimeout,
    /// Unrecognized action string; never transitions
    Unknown,
}

/// Result of a screen transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_screen: Screen,
    to_screen: Screen,
    action: KioskAction,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_screen(&self) -> Screen {
        self.from_screen
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_screen(&self) -> Screen {
        self.to_screen
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn action(&self) -> KioskAction {
        self.action
    }
}

/// Kiosk session state machine
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct Kiosk {
    screen: Screen,
    last_interaction: f64,
    idle_timeout_ms: f64,
    skip_game_selection: bool,
}

impl Default for Kiosk {
    fn default() -> Self {
        Self::new(IDLE_TIMEOUT_MS, true)
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl Kiosk {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(idle_timeout_ms: f64, skip_game_selection: bool) -> Self {
        Self {
            screen: Screen::Welcome,
            last_interaction: 0.0,
            idle_timeout_ms,
            skip_game_selection,
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current screen as string (for JS interop)
    pub fn screen_string(&self) -> String {
        format!("{:?}", self.screen)
    }

    pub fn can_transition(&self, action: KioskAction) -> bool {
        self.next_screen(action).is_some()
    }

    /// Attempt a transition at host time `now`
    pub fn transition(&mut self, action: KioskAction, now: f64) -> TransitionResult {
        let from_screen = self.screen;

        match self.next_screen(action) {
            Some(to_screen) => {
                self.screen = to_screen;
                self.last_interaction = now;
                log::info!("Kiosk: {:?} --{:?}--> {:?}", from_screen, action, to_screen);
                TransitionResult {
                    success: true,
                    from_screen,
                    to_screen,
                    action,
                }
            }
            None => TransitionResult {
                success: false,
                from_screen,
                to_screen: from_screen,
                action,
            },
        }
    }

    /// Transition using action string (for easier JS interop).
    /// Unrecognized strings are rejected with `KioskAction::Unknown`.
    pub fn transition_str(&mut self, action: &str, now: f64) -> TransitionResult {
        let action = match action {
            "TAP_TO_PLAY" => KioskAction::TapToPlay,
            "CONFIRM" => KioskAction::Confirm,
            "CANCEL" => KioskAction::Cancel,
            "SELECT_PADDLE_BALL" => KioskAction::SelectPaddleBall,
            "BACK_TO_SELECTION" => KioskAction::BackToSelection,
            "WIN_TRANSITION" => KioskAction::WinTransition,
            "IDLE_TIMEOUT" => KioskAction::IdleTimeout,
            _ => {
                log::warn!("Kiosk: unknown action {:?}", action);
                KioskAction::Unknown
            }
        };
        self.transition(action, now)
    }

    /// Any touch or click on the kiosk
    pub fn record_activity(&mut self, now: f64) {
        self.last_interaction = self.last_interaction.max(now);
    }

    /// Return to the welcome screen after a long enough pause.
    /// Returns whether the timeout fired.
    pub fn check_idle(&mut self, now: f64) -> bool {
        if self.screen == Screen::Welcome || now - self.last_interaction <= self.idle_timeout_ms {
            return false;
        }
        log::info!(
            "Kiosk idle for {:.0}ms, returning to welcome",
            now - self.last_interaction
        );
        self.transition(KioskAction::IdleTimeout, now).success
    }

    fn next_screen(&self, action: KioskAction) -> Option<Screen> {
        match (self.screen, action) {
            (Screen::Welcome, KioskAction::TapToPlay) => Some(Screen::Confirmation),

            (Screen::Confirmation, KioskAction::Confirm) => Some(if self.skip_game_selection {
                Screen::PaddleBall
            } else {
                Screen::GameSelection
            }),
            (Screen::Confirmation, KioskAction::Cancel) => Some(Screen::Welcome),

            (Screen::GameSelection, KioskAction::SelectPaddleBall) => Some(Screen::PaddleBall),

            (Screen::PaddleBall, KioskAction::WinTransition) => Some(Screen::PrizeWheel),
            (Screen::PaddleBall | Screen::PrizeWheel, KioskAction::BackToSelection) => {
                Some(self.selection_screen())
            }

            (Screen::Welcome, KioskAction::IdleTimeout) => None,
            (_, KioskAction::IdleTimeout) => Some(Screen::Welcome),

            _ => None,
        }
    }

    fn selection_screen(&self) -> Screen {
        if self.skip_game_selection {
            Screen::Welcome
        } else {
            Screen::GameSelection
        }
    }
}
