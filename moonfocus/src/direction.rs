use embedded_hal::digital::PinState;
use ufmt_macros::uDebug;

/// Describes the direction of focuser travel.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Direction {
    /// Travel toward larger positions.
    Positive,
    /// Travel toward smaller positions.
    Negative,
}
impl Direction {
    /// Returns the direction which carries `from` toward `to`, or `None` if
    /// they are equal.
    pub fn between(from: i32, to: i32) -> Option<Direction> {
        use core::cmp::Ordering::*;
        match to.cmp(&from) {
            Greater => Some(Direction::Positive),
            Less => Some(Direction::Negative),
            Equal => None,
        }
    }

    /// Signed unit for this direction.
    pub fn unit(&self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }
}

/// Mapping from travel direction to the level of the direction line.
///
/// Different driver boards wire the motor the opposite way round, so the
/// mapping is configuration rather than logic.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Polarity {
    /// Positive travel drives the direction line high.
    Normal,
    /// Positive travel drives the direction line low.
    Reversed,
}
impl Polarity {
    /// Level of the direction line for `direction`.
    pub fn level(&self, direction: Direction) -> PinState {
        match (self, direction) {
            (Polarity::Normal, Direction::Positive) => PinState::High,
            (Polarity::Normal, Direction::Negative) => PinState::Low,
            (Polarity::Reversed, Direction::Positive) => PinState::Low,
            (Polarity::Reversed, Direction::Negative) => PinState::High,
        }
    }

    /// The opposite polarity.
    pub fn flipped(&self) -> Polarity {
        match self {
            Polarity::Normal => Polarity::Reversed,
            Polarity::Reversed => Polarity::Normal,
        }
    }
}
