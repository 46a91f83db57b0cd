pub mod intersect_2d;
pub mod solve_2d;

use rust_decimal::MathematicalOps;

pub use rust_decimal::Decimal;

use crate::error::{GeometryError, Result};

/// Global tolerance for parallelism and coincidence tests.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 10);

/// Determinant threshold under which three arc points count as collinear.
pub const DEGENERATE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Distance slack under which two roots collapse into a single tangency point.
pub const TANGENCY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// Decimal places used when coordinates are handed to the host.
pub const HOST_PRECISION: u32 = 3;

/// Square root that clamps tiny negative round-off to zero.
///
/// Returns `None` for inputs that are meaningfully negative.
#[must_use]
pub fn sqrt(value: Decimal) -> Option<Decimal> {
    if value.is_sign_negative() {
        if value.abs() <= TOLERANCE {
            return Some(Decimal::ZERO);
        }
        return None;
    }
    value.sqrt()
}

/// Euclidean length of `(dx, dy)`.
#[must_use]
pub fn hypot(dx: Decimal, dy: Decimal) -> Decimal {
    sqrt(dx * dx + dy * dy).unwrap_or(Decimal::ZERO)
}

/// `value²`, failing instead of overflowing the decimal range.
///
/// # Errors
///
/// Returns [`GeometryError::Overflow`] naming `what` when the square does
/// not fit.
pub fn checked_square(value: Decimal, what: &'static str) -> Result<Decimal> {
    value
        .checked_mul(value)
        .ok_or_else(|| GeometryError::Overflow(what).into())
}

/// [`hypot`] for inputs that may leave the decimal range.
///
/// # Errors
///
/// Returns [`GeometryError::Overflow`] when `dx² + dy²` does not fit.
pub fn checked_hypot(dx: Decimal, dy: Decimal) -> Result<Decimal> {
    let sum = checked_square(dx, "squared length")?
        .checked_add(checked_square(dy, "squared length")?)
        .ok_or(GeometryError::Overflow("squared length"))?;
    Ok(sqrt(sum).unwrap_or(Decimal::ZERO))
}
