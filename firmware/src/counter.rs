//! Button-driven hex counter shown on the display.

use tuxctl::{Buttons, DisplayRequest};

/// Counter state plus whether the display still has to be told about it.
pub struct HexCounter {
    value: u16,
    pending: bool,
}

impl HexCounter {
    /// Start at zero with the first display update pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: 0,
            pending: true,
        }
    }

    /// Apply the buttons pressed since the last poll.
    ///
    /// UP/DOWN step by one, RIGHT/LEFT by 0x10, START clears.
    pub fn apply(&mut self, buttons: Buttons) {
        let before = self.value;

        if buttons.contains(Buttons::START) {
            self.value = 0;
        }
        if buttons.contains(Buttons::UP) {
            self.value = self.value.wrapping_add(1);
        }
        if buttons.contains(Buttons::DOWN) {
            self.value = self.value.wrapping_sub(1);
        }
        if buttons.contains(Buttons::RIGHT) {
            self.value = self.value.wrapping_add(0x10);
        }
        if buttons.contains(Buttons::LEFT) {
            self.value = self.value.wrapping_sub(0x10);
        }

        if self.value != before {
            self.pending = true;
        }
    }

    /// The display update to send, if one is pending.
    ///
    /// Leading zero digits stay lit except the top one, which goes dark
    /// while the counter fits in three digits.
    pub fn take_update(&mut self) -> Option<DisplayRequest> {
        if !core::mem::take(&mut self.pending) {
            return None;
        }

        let request = if self.value <= 0x0FFF {
            DisplayRequest::from_packed(0x0007_0000 | u32::from(self.value))
        } else {
            DisplayRequest::hex(self.value)
        };
        Some(request)
    }

    /// The driver rejected the last update; offer it again next time.
    pub fn retry(&mut self) {
        self.pending = true;
    }

    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }
}

impl Default for HexCounter {
    fn default() -> Self {
        Self::new()
    }
}
