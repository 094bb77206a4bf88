// raffbot-core/src/services/pricing.rs

use parking_lot::Mutex;
use tracing::info;

use raffbot_common::Error;

/// Default exchange rate: fiat units per one whole token.
pub const DEFAULT_FIAT_PER_TOKEN: f64 = 3000.0;

/// Default price of one paid entry, in fiat units.
pub const DEFAULT_ENTRY_FEE_FIAT: f64 = 0.50;

#[derive(Debug)]
struct PricingState {
    fiat_per_token: f64,
    default_entry_fee_fiat: f64,
}

/// Process-wide pricing knobs, threaded into giveaway creation as an
/// explicit dependency rather than ambient globals. Values are read at
/// creation time and frozen into the record; later changes only affect
/// future giveaways.
#[derive(Debug)]
pub struct PricingConfig {
    state: Mutex<PricingState>,
}

impl PricingConfig {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PricingState {
                fiat_per_token: DEFAULT_FIAT_PER_TOKEN,
                default_entry_fee_fiat: DEFAULT_ENTRY_FEE_FIAT,
            }),
        }
    }

    pub fn fiat_per_token(&self) -> f64 {
        self.state.lock().fiat_per_token
    }

    pub fn default_entry_fee_fiat(&self) -> f64 {
        self.state.lock().default_entry_fee_fiat
    }

    pub fn set_fiat_per_token(&self, rate: f64) -> Result<(), Error> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::InvalidAmount(format!(
                "exchange rate must be positive, got {}",
                rate
            )));
        }
        self.state.lock().fiat_per_token = rate;
        info!("Exchange rate updated to {} fiat per token", rate);
        Ok(())
    }

    pub fn set_default_entry_fee(&self, fiat_amount: f64) -> Result<(), Error> {
        if !fiat_amount.is_finite() || fiat_amount <= 0.0 {
            return Err(Error::InvalidAmount(format!(
                "entry fee must be positive, got {}",
                fiat_amount
            )));
        }
        self.state.lock().default_entry_fee_fiat = fiat_amount;
        info!("Default entry fee updated to {} fiat", fiat_amount);
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new()
    }
}
