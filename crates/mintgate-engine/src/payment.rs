//! # Payment Validation
//!
//! The attached payment must equal `price × quantity` exactly — no
//! overpayment is accepted, because there is no refund path. The multiply
//! is overflow-checked even though realistic quantities are tiny (the
//! per-phase cap is 3).

use mintgate_core::Wei;

use crate::error::MintError;

/// Validate that `attached` equals `price × quantity` exactly.
///
/// # Errors
///
/// - [`MintError::QuantityInvalid`] if `quantity` is zero or the total
///   overflows.
/// - [`MintError::PaymentMismatch`] if the attached payment differs from
///   the exact total in either direction.
pub fn require_exact_payment(attached: Wei, price: Wei, quantity: u64) -> Result<(), MintError> {
    if quantity == 0 {
        return Err(MintError::QuantityInvalid { quantity });
    }
    let expected = price
        .checked_mul(quantity)
        .ok_or(MintError::QuantityInvalid { quantity })?;
    if attached != expected {
        return Err(MintError::PaymentMismatch { attached, expected });
    }
    Ok(())
}
