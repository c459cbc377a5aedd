//! Explicit rounding direction for fixed-point division.

/// Rounding direction applied by [`mul_div`](crate::math::mul_div) and the
/// other dividing helpers.
///
/// Quantities paid out to users round [`Down`](Rounding::Down); quantities
/// the pool collects round [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use twocrypto_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.rounds_away(false) == false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Ceiling: the smallest integer not below the exact quotient.
    Up,
    /// Floor: truncate the remainder.
    #[default]
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` when a quotient with the given remainder state must be
    /// bumped by one unit.
    #[must_use]
    pub const fn rounds_away(&self, has_remainder: bool) -> bool {
        self.is_up() && has_remainder
    }
}
