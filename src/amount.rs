use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{BridgeError, Result};

pub const EXPENSE: &str = "expense";
pub const INCOME: &str = "income";

/// Fraction digits written for every amount.
const SCALE: u32 = 2;

pub fn is_expense(kind: &str) -> bool {
    kind.to_lowercase() == EXPENSE
}

pub fn is_income(kind: &str) -> bool {
    kind.to_lowercase() == INCOME
}

/// Parse a decimal literal exactly. Accepts plain (`45.50`) and scientific
/// (`4.55e1`) notation.
pub fn parse_decimal(raw: &str) -> Result<Decimal> {
    let s = raw.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| BridgeError::AmountFormat(raw.to_string()))
}

/// Render with exactly two fraction digits, rounding half to even. Values
/// too large to carry two fraction digits are rejected.
pub fn format_two_places(value: Decimal) -> Result<String> {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(SCALE);
    if rounded.scale() != SCALE {
        return Err(BridgeError::AmountFormat(value.to_string()));
    }
    Ok(rounded.to_string())
}

/// Signed target amount. Only an `expense` kind (any case) is negated; every
/// other kind, recognised or not, stays unsigned.
pub fn sign_amount(raw: &str, kind: &str) -> Result<String> {
    let formatted = format_two_places(parse_decimal(raw)?)
        .map_err(|_| BridgeError::AmountFormat(raw.to_string()))?;
    if is_expense(kind) {
        Ok(format!("-{formatted}"))
    } else {
        Ok(formatted)
    }
}
