use crate::foundation::error::{BoothError, BoothResult};

/// Seconds left before the shutter fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Countdown showing `seconds` before the first tick.
    pub fn new(seconds: u32) -> BoothResult<Self> {
        if seconds == 0 {
            return Err(BoothError::validation("countdown must be at least one second"));
        }
        Ok(Self { remaining: seconds })
    }

    /// Value currently displayed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// One second elapsed. Saturates at zero.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// What a session tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown armed.
    Idle,
    /// Still counting; `remaining` is the new displayed value.
    Counting {
        /// Seconds left.
        remaining: u32,
    },
    /// The shutter fired and a frame was appended.
    Captured {
        /// Position of the new frame.
        index: usize,
        /// Set on the one capture that filled the frame list.
        ready_to_assemble: bool,
    },
}
