// raffbot-core/src/currency.rs
//
// Fiat <-> token conversion. The ledger only ever compares smallest-unit
// token integers; floats exist at the fiat boundary and for display.

use raffbot_common::Error;

/// Decimal places of the token's smallest unit.
pub const TOKEN_DECIMALS: u32 = 18;

/// Smallest units per whole token (10^18).
pub const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Converts a fiat amount into smallest token units at the given rate
/// (fiat units per whole token).
pub fn fiat_to_token(fiat_amount: f64, fiat_per_token: f64) -> Result<u128, Error> {
    if !fiat_amount.is_finite() || fiat_amount <= 0.0 {
        return Err(Error::InvalidAmount(format!(
            "fiat amount must be positive, got {}",
            fiat_amount
        )));
    }
    if !fiat_per_token.is_finite() || fiat_per_token <= 0.0 {
        return Err(Error::InvalidAmount(format!(
            "exchange rate must be positive, got {}",
            fiat_per_token
        )));
    }
    let wei = (fiat_amount / fiat_per_token) * WEI_PER_TOKEN as f64;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        return Err(Error::Unrepresentable(format!(
            "{} fiat at rate {}",
            fiat_amount, fiat_per_token
        )));
    }
    Ok(wei.round() as u128)
}

/// Converts smallest token units back to fiat. Display only; ledger
/// decisions never go through this path.
pub fn token_to_fiat(token_amount: u128, fiat_per_token: f64) -> Result<f64, Error> {
    if !fiat_per_token.is_finite() || fiat_per_token <= 0.0 {
        return Err(Error::InvalidAmount(format!(
            "exchange rate must be positive, got {}",
            fiat_per_token
        )));
    }
    let fiat = (token_amount as f64 / WEI_PER_TOKEN as f64) * fiat_per_token;
    if !fiat.is_finite() {
        return Err(Error::Unrepresentable(format!(
            "{} smallest units at rate {}",
            token_amount, fiat_per_token
        )));
    }
    Ok(fiat)
}

/// Two-decimal presentation rounding for fiat values.
pub fn format_fiat(amount: f64) -> String {
    format!("{:.2}", amount)
}
