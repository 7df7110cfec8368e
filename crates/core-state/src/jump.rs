/// Digits accepted before a pending jump applies.
pub const JUMP_DIGITS: u8 = 3;

/// Pending relative jump. Outside a pending jump the state is all zeroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpState {
    pub pending: bool,
    /// `-1` (up) or `+1` (down) while pending.
    pub direction: i8,
    pub digits: u8,
    pub value: usize,
}

impl JumpState {
    pub fn begin(&mut self, direction: i8) {
        *self = JumpState {
            pending: true,
            direction: direction.signum(),
            digits: 0,
            value: 0,
        };
    }

    /// Accumulate one decimal digit. Returns the complete value once the
    /// third digit arrives, leaving the state reset.
    pub fn push_digit(&mut self, digit: u32) -> Option<usize> {
        self.value = self.value * 10 + digit as usize;
        self.digits += 1;
        if self.digits < JUMP_DIGITS {
            return None;
        }
        let value = self.value;
        self.reset();
        Some(value)
    }

    pub fn reset(&mut self) {
        *self = JumpState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_digit_completes() {
        let mut j = JumpState::default();
        j.begin(1);
        assert_eq!(j.push_digit(4), None);
        assert_eq!(j.push_digit(2), None);
        assert!(j.pending);
        assert_eq!(j.push_digit(0), Some(420));
        assert_eq!(j, JumpState::default());
    }

    #[test]
    fn begin_restarts_accumulation() {
        let mut j = JumpState::default();
        j.begin(-1);
        j.push_digit(9);
        j.begin(-5);
        assert_eq!(j.direction, -1);
        assert_eq!(j.digits, 0);
        assert_eq!(j.value, 0);
    }
}
