use common_test_utils::*;

use trend_analyzer::analyze_stock;
use trend_analyzer::analyzer::MACDStatus;
use trend_analyzer::analyzer::macd_analyzer::{MACDPoint, classify_macd};

fn point(dif: f64, dea: f64) -> MACDPoint {
    MACDPoint { dif, dea }
}

#[test]
fn test_uptrend_is_bullish() {
    let result = analyze_stock("000001", &create_uptrend_bars(60, 100.0, 1.0));

    assert_eq!(result.macd_status, MACDStatus::Bullish);
    assert!(result.macd_dif > 0.0 && result.macd_dea > 0.0);
    assert!(approx_eq(
        result.macd_bar,
        2.0 * (result.macd_dif - result.macd_dea)
    ));
    assert_eq!(result.macd_signal, "bullish alignment, uptrend continues");
    assert!(result.signal_reasons.contains(&result.macd_signal));
}

#[test]
fn test_downtrend_is_bearish() {
    let result = analyze_stock("000001", &create_downtrend_bars(60, 200.0, 1.0));

    assert_eq!(result.macd_status, MACDStatus::Bearish);
    assert!(result.macd_dif < 0.0 && result.macd_dea < 0.0);
}

#[test]
fn test_flat_series_has_no_histogram() {
    let result = analyze_stock("000001", &create_flat_bars(40, 100.0));
    assert!(result.macd_bar.abs() < 1e-9);
    assert!(result.macd_dif.abs() < 1e-9);
}

#[test]
fn test_needs_slow_period_bars() {
    let result = analyze_stock("000001", &create_uptrend_bars(25, 100.0, 1.0));
    assert_eq!(result.macd_status, MACDStatus::Neutral);
    assert_eq!(result.macd_dea, 0.0);
    assert_eq!(result.macd_bar, 0.0);
}

#[test]
fn test_cross_priorities() {
    assert_eq!(
        classify_macd(point(0.5, 0.6), point(0.8, 0.7)),
        MACDStatus::GoldenCrossZero
    );
    assert_eq!(
        classify_macd(point(-0.1, -0.3), point(0.1, -0.2)),
        MACDStatus::CrossingUp
    );
    assert_eq!(
        classify_macd(point(-0.5, -0.4), point(-0.3, -0.35)),
        MACDStatus::GoldenCross
    );
    assert_eq!(
        classify_macd(point(0.5, 0.4), point(0.3, 0.35)),
        MACDStatus::DeathCross
    );
    assert_eq!(
        classify_macd(point(0.1, 0.3), point(-0.1, 0.2)),
        MACDStatus::CrossingDown
    );
    assert_eq!(
        classify_macd(point(0.0, 0.0), point(0.0, 0.0)),
        MACDStatus::Neutral
    );
}

#[test]
fn test_scores_and_warnings() {
    assert_eq!(MACDStatus::GoldenCrossZero.score(), 15);
    assert_eq!(MACDStatus::Neutral.score(), 5);
    assert!(MACDStatus::DeathCross.is_warning());
    assert!(MACDStatus::CrossingDown.is_warning());
    assert!(!MACDStatus::Bearish.is_warning());
    assert!(MACDStatus::GoldenCross.is_golden());
}
