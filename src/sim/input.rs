//! Touch and pointer input arbitration
//!
//! Two drivers move the paddles. Touch contacts drag the paddle on the half
//! they started in; a plain pointer (mouse/pen) places the paddle under it.
//! While any touch contact is live the pointer driver is switched off.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Side};

/// Host-assigned identifier of one touch contact
pub type TouchId = i32;

/// Which driver currently controls the paddles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// No touch contact is live; pointer movement moves paddles
    PointerEnabled,
    /// At least one touch contact is live; pointer movement is ignored
    TouchActive { contacts: usize },
}

/// A contact that owns one side's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchAssignment {
    pub id: TouchId,
    pub side: Side,
    /// Y where the contact started
    pub anchor_y: f32,
}

/// Input state machine for one engine
#[derive(Debug, Clone)]
pub struct InputArbiter {
    mode: InputMode,
    live: Vec<TouchId>,
    left: Option<TouchAssignment>,
    right: Option<TouchAssignment>,
}

impl Default for InputArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputArbiter {
    pub fn new() -> Self {
        Self {
            mode: InputMode::PointerEnabled,
            live: Vec::new(),
            left: None,
            right: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn pointer_enabled(&self) -> bool {
        self.mode == InputMode::PointerEnabled
    }

    pub fn assignment(&self, side: Side) -> Option<&TouchAssignment> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<TouchAssignment> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn find(&self, id: TouchId) -> Option<TouchAssignment> {
        [self.left, self.right]
            .into_iter()
            .flatten()
            .find(|a| a.id == id)
    }

    fn sync_mode(&mut self) {
        self.mode = if self.live.is_empty() {
            InputMode::PointerEnabled
        } else {
            InputMode::TouchActive {
                contacts: self.live.len(),
            }
        };
    }

    /// New contact. Claims the side it landed on if that side is free.
    /// Returns the claimed side.
    pub fn touch_start(&mut self, id: TouchId, x: f32, y: f32, playfield_width: f32) -> Option<Side> {
        if !self.live.contains(&id) {
            self.live.push(id);
        }
        self.sync_mode();

        if self.find(id).is_some() {
            return None;
        }

        let side = Side::of_x(x, playfield_width);
        let slot = self.slot_mut(side);
        if slot.is_some() {
            return None;
        }
        *slot = Some(TouchAssignment {
            id,
            side,
            anchor_y: y,
        });
        Some(side)
    }

    /// Contact moved. Drags its paddle: center = playfield center + (y - anchor).
    pub fn touch_move(&self, id: TouchId, y: f32, state: &mut GameState) -> bool {
        let Some(assignment) = self.find(id) else {
            return false;
        };
        let playfield = state.playfield;
        let center = playfield.center().y + (y - assignment.anchor_y);
        state.paddle_mut(assignment.side).set_center(center, &playfield);
        true
    }

    /// Contact released (or cancelled). Frees its side.
    pub fn touch_end(&mut self, id: TouchId) -> Option<Side> {
        self.live.retain(|&live| live != id);
        self.sync_mode();

        let released = self.find(id).map(|a| a.side);
        if let Some(side) = released {
            *self.slot_mut(side) = None;
        }
        released
    }

    /// Pointer moved. Places the paddle under the pointer when no touch is live.
    pub fn pointer_move(&self, x: f32, y: f32, state: &mut GameState) -> bool {
        if !self.pointer_enabled() {
            return false;
        }
        let playfield = state.playfield;
        let side = Side::of_x(x, playfield.width);
        let paddle = state.paddle_mut(side);
        let top = y - paddle.height / 2.0;
        paddle.set_top(top, &playfield);
        true
    }

    /// Drop every contact and assignment
    pub fn clear(&mut self) {
        self.live.clear();
        self.left = None;
        self.right = None;
        self.sync_mode();
    }
}
