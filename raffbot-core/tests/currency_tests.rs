// File: raffbot-core/tests/currency_tests.rs

use raffbot_core::currency::{fiat_to_token, format_fiat, token_to_fiat, WEI_PER_TOKEN};
use raffbot_core::Error;

#[test]
fn whole_token_round_trips() {
    // 3000 fiat at 3000 fiat/token is exactly one token.
    let wei = fiat_to_token(3000.0, 3000.0).unwrap();
    assert_eq!(wei, WEI_PER_TOKEN);

    let fiat = token_to_fiat(wei, 3000.0).unwrap();
    assert!((fiat - 3000.0).abs() < 1e-6);
}

#[test]
fn fractional_fiat_converts_to_smallest_units() {
    let wei = fiat_to_token(1.0, 2000.0).unwrap();
    assert_eq!(wei, 500_000_000_000_000);
}

#[test]
fn default_fee_is_a_positive_wei_amount() {
    // $0.50 at $3000/token: the frozen per-entry fee every giveaway starts
    // with must be a nonzero integer so floor division can never grant
    // unlimited entries.
    let fee = fiat_to_token(0.50, 3000.0).unwrap();
    assert!(fee > 0);
    assert!(fee < WEI_PER_TOKEN);
}

#[test]
fn rejects_non_positive_amounts() {
    for (fiat, rate) in [(0.0, 3000.0), (-1.0, 3000.0), (1.0, 0.0), (1.0, -5.0)] {
        let err = fiat_to_token(fiat, rate).unwrap_err();
        assert!(
            matches!(err, Error::InvalidAmount(_)),
            "expected InvalidAmount for fiat={} rate={}",
            fiat,
            rate
        );
    }
    assert!(matches!(
        token_to_fiat(1, 0.0),
        Err(Error::InvalidAmount(_))
    ));
}

#[test]
fn rejects_nan_and_infinity() {
    assert!(matches!(
        fiat_to_token(f64::NAN, 3000.0),
        Err(Error::InvalidAmount(_))
    ));
    assert!(matches!(
        fiat_to_token(f64::INFINITY, 3000.0),
        Err(Error::InvalidAmount(_))
    ));
}

#[test]
fn overflow_is_unrepresentable_not_a_panic() {
    let err = fiat_to_token(1e300, 1e-300).unwrap_err();
    assert!(matches!(err, Error::Unrepresentable(_)));
}

#[test]
fn fiat_display_rounds_to_two_decimals() {
    assert_eq!(format_fiat(0.5), "0.50");
    assert_eq!(format_fiat(3000.0), "3000.00");
    assert_eq!(format_fiat(0.499), "0.50");
    assert_eq!(format_fiat(1.005001), "1.01");
}
