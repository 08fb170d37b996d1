//! Quarter-turn animation state of a single box.

/// Degrees in one turn.
pub const QUARTER_TURN: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Angle increases.
    Right,
    /// Angle decreases.
    Left,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
        }
    }
}

/// Progress through the current quarter turn.
///
/// `Idle` → `Turning` → `Settled`, then back to `Idle` only through
/// [`TurnState::reset`]. A settled box ignores further advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Turning { direction: Direction, progress: u32 },
    Settled { direction: Direction },
}

impl TurnState {
    /// Degrees of the current turn already done, in `0..=90`.
    pub fn progress(self) -> u32 {
        match self {
            TurnState::Idle => 0,
            TurnState::Turning { progress, .. } => progress,
            TurnState::Settled { .. } => QUARTER_TURN,
        }
    }

    pub fn is_settled(self) -> bool {
        matches!(self, TurnState::Settled { .. })
    }

    /// Advance by `speed` degrees, never past the end of the quarter turn.
    /// Returns the signed change in angle.
    pub fn advance(&mut self, direction: Direction, speed: u32) -> i32 {
        let done = match *self {
            TurnState::Idle => 0,
            TurnState::Turning { progress, .. } => progress,
            TurnState::Settled { .. } => return 0,
        };
        let step = speed.min(QUARTER_TURN - done);
        if step == 0 {
            return 0;
        }
        let progress = done + step;
        *self = if progress == QUARTER_TURN {
            TurnState::Settled { direction }
        } else {
            TurnState::Turning {
                direction,
                progress,
            }
        };
        direction.sign() * step as i32
    }

    pub fn reset(&mut self) {
        *self = TurnState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_speed_lands_exactly_on_ninety() {
        for speed in 1..=5 {
            for direction in [Direction::Right, Direction::Left] {
                let mut turn = TurnState::default();
                let mut angle = 0;
                for _ in 0..200 {
                    angle += turn.advance(direction, speed);
                    assert!(turn.progress() <= QUARTER_TURN);
                }
                assert_eq!(turn.progress(), QUARTER_TURN);
                assert_eq!(angle, direction.sign() * 90, "speed {speed}");
            }
        }
    }

    #[test]
    fn last_step_is_clamped() {
        let mut turn = TurnState::default();
        for _ in 0..22 {
            turn.advance(Direction::Right, 4);
        }
        assert_eq!(turn.progress(), 88);
        assert_eq!(turn.advance(Direction::Right, 4), 2);
        assert!(turn.is_settled());
        assert_eq!(turn.advance(Direction::Right, 4), 0);
    }

    #[test]
    fn reset_arms_the_next_turn() {
        let mut turn = TurnState::Settled {
            direction: Direction::Left,
        };
        turn.reset();
        assert_eq!(turn.progress(), 0);
        assert_eq!(turn.advance(Direction::Left, 3), -3);
    }
}
