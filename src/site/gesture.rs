/// Footer activations needed to open the admin panel.
pub const ADMIN_TAP_THRESHOLD: u32 = 10;

pub const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GestureOutcome {
    /// Not there yet; carries the new count.
    Pending(u32),
    /// Threshold reached. The counter is back at zero.
    Navigate,
}

/// Hidden ten-tap counter. Counts never expire.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TapGesture {
    count: u32,
}

impl TapGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a count kept by the caller, e.g. in a cookie.
    pub fn from_count(count: u32) -> Self {
        Self { count }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn activate(&mut self) -> GestureOutcome {
        self.count = self.count.saturating_add(1);
        if self.count >= ADMIN_TAP_THRESHOLD {
            self.count = 0;
            GestureOutcome::Navigate
        } else {
            GestureOutcome::Pending(self.count)
        }
    }
}
