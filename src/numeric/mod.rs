// ============================================================================
// Numeric Module
// Arbitrary-precision fixed-point arithmetic for in-game amounts
// ============================================================================
//
// This module provides:
// - Decimal<S>: Fixed-point decimal over a BigInt with compile-time scale
// - NumericError: Error types for arithmetic and parsing
// - Currency: the scale every balance, price and rate uses
//
// Design principles:
// - No floating-point arithmetic on balances (floats only enter via from_f64)
// - Never wraps: the raw value is unbounded
// - Multiply/divide truncate toward zero
// - Scale mismatches are type errors via const generics

mod decimal;
mod errors;

pub use decimal::{Currency, Decimal, CURRENCY_SCALE};
pub use errors::{NumericError, NumericResult};
