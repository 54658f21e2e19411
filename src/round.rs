/*!
Rounding contexts: the configuration values that know how to map any
[`Real`] into a particular number format.
*/

use crate::real::Real;

/// A format's configuration, and the rounding logic that goes with it.
///
/// Every arithmetic operation in this crate factors into two steps: an
/// operation computed at unbounded (or extended) precision, and a
/// rounding step that maps the unbounded result back into a specific
/// format. A `RoundingContext` is the value carrying that format's
/// configuration (bit width, fraction width, policy flags, ...); it is a
/// runtime value, not a type parameter, so differently configured
/// contexts are simply distinct values rather than distinct types.
pub trait RoundingContext {
    /// The format this context rounds into.
    type Rounded: Real;

    /// Re-rounds an already-`Rounded` value under this context (used
    /// when, e.g., a computation changes a context's rounding mode
    /// mid-pipeline).
    fn round(&self, val: &Self::Rounded) -> Self::Rounded;

    /// Rounds any [`Real`] value into this context's format. This is the
    /// entry point used by conversions and by every `Rounded*` operator
    /// in [`crate::ops`]: compute at extended precision against any
    /// `Real`, then call this to land in `Self::Rounded`.
    fn round_from<T: Real>(&self, val: &T) -> Self::Rounded;
}

/// Rounding modes, general enough to drive both integer/fixed-point
/// last-place decisions and IEEE-754-style float rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to the nearest representable value; break ties toward the
    /// value whose least-significant retained bit is 0.
    NearestTiesToEven,
    /// Round to the nearest representable value; break ties away from
    /// zero.
    NearestTiesAwayZero,
    /// Round toward positive infinity.
    ToPositive,
    /// Round toward negative infinity.
    ToNegative,
    /// Round toward zero (truncate).
    ToZero,
    /// Round away from zero.
    AwayZero,
    /// Round to the representable value whose least-significant retained
    /// bit is 0, even off of a tie.
    ToEven,
    /// Round to the representable value whose least-significant retained
    /// bit is 1, even off of a tie.
    ToOdd,
}

/// A rounding *direction*, derived from a [`RoundingMode`] and the sign
/// of the value being rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RoundingDirection {
    ToZero,
    AwayZero,
    ToEven,
    ToOdd,
}

impl RoundingMode {
    /// Resolves a mode and a sign into a direction, plus whether that
    /// direction applies only to break an exact tie (`true`) or
    /// unconditionally (`false`).
    pub(crate) fn to_direction(self, sign: bool) -> (bool, RoundingDirection) {
        match (self, sign) {
            (RoundingMode::NearestTiesToEven, _) => (true, RoundingDirection::ToEven),
            (RoundingMode::NearestTiesAwayZero, _) => (true, RoundingDirection::AwayZero),
            (RoundingMode::ToPositive, false) => (false, RoundingDirection::AwayZero),
            (RoundingMode::ToPositive, true) => (false, RoundingDirection::ToZero),
            (RoundingMode::ToNegative, false) => (false, RoundingDirection::ToZero),
            (RoundingMode::ToNegative, true) => (false, RoundingDirection::AwayZero),
            (RoundingMode::ToZero, _) => (false, RoundingDirection::ToZero),
            (RoundingMode::AwayZero, _) => (false, RoundingDirection::AwayZero),
            (RoundingMode::ToEven, _) => (false, RoundingDirection::ToEven),
            (RoundingMode::ToOdd, _) => (false, RoundingDirection::ToOdd),
        }
    }
}

/// Resolves a [`crate::block::RoundingDecision`] (a guard/round/sticky
/// verdict) plus a tie-breaking [`RoundingDirection`] and the
/// least-significant retained bit into whether to increment the
/// truncated magnitude.
pub(crate) fn should_round_up(
    decision: crate::block::RoundingDecision,
    direction: &RoundingDirection,
    lsb_is_one: bool,
) -> bool {
    use crate::block::RoundingDecision::*;
    match decision {
        Down => false,
        Up => true,
        Tie => match direction {
            RoundingDirection::ToZero => false,
            RoundingDirection::AwayZero => true,
            RoundingDirection::ToEven => lsb_is_one,
            RoundingDirection::ToOdd => !lsb_is_one,
        },
    }
}
