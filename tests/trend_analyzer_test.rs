use common_test_utils::*;

use std::sync::Arc;
use std::thread;
use trend_analyzer::analyzer::{BuySignal, TrendStatus};
use trend_analyzer::config::RSIParams;
use trend_analyzer::{AnalysisError, AnalyzerConfig, RawBar, TrendAnalyzer, analyze_stock};

#[test]
fn test_insufficient_history_returns_single_risk() {
    let bars = create_uptrend_bars(19, 100.0, 1.0);
    let result = TrendAnalyzer::default().analyze("600519", &bars);

    assert_eq!(result.code, "600519");
    assert_eq!(result.risk_factors, vec!["insufficient data".to_string()]);
    assert_eq!(result.signal_score, 0);
    assert_eq!(result.buy_signal, BuySignal::Wait);
    assert_eq!(result.trend_status, TrendStatus::Consolidation);
    assert_eq!(result.current_price, 0.0);
    assert!(result.signal_reasons.is_empty());
}

#[test]
fn test_empty_input() {
    let result = analyze_stock::<trend_analyzer::PriceBar>("000001", &[]);
    assert_eq!(result.risk_factors, vec!["insufficient data".to_string()]);
}

#[test]
fn test_uptrend_is_bullish() {
    let bars = create_uptrend_bars(60, 100.0, 1.0);
    let result = analyze_stock("000001", &bars);

    assert!(result.trend_status.is_bullish());
    assert!(result.ma5 > result.ma10 && result.ma10 > result.ma20);
    assert_eq!(result.current_price, 159.5);
    assert!(approx_eq(result.ma5, 157.5));
    assert!(approx_eq(result.ma20, 150.0));
    assert!(result.bias_ma5 > 0.0);
}

#[test]
fn test_downtrend_is_bearish() {
    let bars = create_downtrend_bars(60, 200.0, 1.0);
    let result = analyze_stock("000001", &bars);

    assert!(result.trend_status.is_bearish());
    assert!(result.ma5 < result.ma10 && result.ma10 < result.ma20);
    assert!(result.bias_ma5 < 0.0);
}

#[test]
fn test_analysis_is_idempotent() {
    let bars = create_sideways_bars(80, 50.0, 4.0);
    let analyzer = TrendAnalyzer::default();

    let first = analyzer.analyze("000002", &bars);
    let second = analyzer.analyze("000002", &bars);
    assert_eq!(first, second);
}

#[test]
fn test_input_order_does_not_matter() {
    let bars = create_uptrend_bars(40, 100.0, 0.5);
    let mut reversed = bars.clone();
    reversed.reverse();

    assert_eq!(analyze_stock("a", &bars), analyze_stock("a", &reversed));
}

#[test]
fn test_generic_candle_input() {
    let candles: Vec<TestCandle> = (0..30)
        .map(|i| {
            let price = 10.0 + i as f64 * 0.1;
            TestCandle::new(i, price, price + 0.2, price - 0.2, price, 500.0)
        })
        .collect();

    let result = analyze_stock("generic", &candles);
    assert!(approx_eq(result.current_price, 12.9));
    assert!(result.trend_status.is_bullish());
}

#[test]
fn test_short_history_uses_fallback_averages() {
    let bars = create_uptrend_bars(25, 100.0, 1.0);
    let result = analyze_stock("000003", &bars);

    assert_eq!(result.ma60, result.ma20);
    assert_eq!(result.ma250, result.ma60);
    assert_eq!(result.bias_ma60, result.bias_ma20);

    // MACD는 26개 봉부터 계산
    assert_eq!(result.macd_dif, 0.0);
    assert_eq!(result.macd_signal, "insufficient data");
    // RSI(24)는 계산됨
    assert!(result.rsi_24 > 0.0);
}

#[test]
fn test_flat_map_contains_all_fields() {
    let result = analyze_stock("000004", &create_uptrend_bars(30, 10.0, 0.1));
    let map = result.to_flat_map();

    for key in [
        "code",
        "trend_status",
        "ma_alignment",
        "trend_strength",
        "ma5",
        "ma10",
        "ma20",
        "ma60",
        "ma250",
        "current_price",
        "bias_ma5",
        "bias_ma10",
        "bias_ma20",
        "bias_ma60",
        "bias_ma250",
        "volume_status",
        "volume_ratio_5d",
        "volume_trend",
        "support_ma5",
        "support_ma10",
        "resistance_levels",
        "support_levels",
        "macd_dif",
        "macd_dea",
        "macd_bar",
        "macd_status",
        "macd_signal",
        "rsi_6",
        "rsi_12",
        "rsi_24",
        "rsi_status",
        "rsi_signal",
        "kdj_k",
        "kdj_d",
        "kdj_j",
        "kdj_status",
        "kdj_signal",
        "bb_upper",
        "bb_middle",
        "bb_lower",
        "bb_width",
        "bb_status",
        "bb_position",
        "momentum_5d",
        "momentum_10d",
        "momentum_status",
        "momentum_signal",
        "vol_ma5",
        "vol_ma10",
        "vol_ma20",
        "vol_ratio_ma5",
        "vol_ma_status",
        "vol_trend",
        "buy_signal",
        "signal_score",
        "signal_reasons",
        "risk_factors",
    ] {
        assert!(map.contains_key(key), "missing key {}", key);
    }

    let action = map["buy_signal"].as_str().unwrap();
    assert!(
        ["strong_buy", "buy", "hold", "wait", "sell", "strong_sell"].contains(&action),
        "unexpected action {}",
        action
    );
    assert_eq!(map["code"], "000004");
}

#[test]
fn test_analyze_records_validates_input() {
    let mut records: Vec<RawBar> = create_uptrend_bars(25, 100.0, 1.0)
        .into_iter()
        .map(|bar| RawBar {
            date: Some(bar.date),
            open: Some(bar.open),
            high: Some(bar.high),
            low: Some(bar.low),
            close: Some(bar.close),
            volume: Some(bar.volume),
        })
        .collect();

    let analyzer = TrendAnalyzer::default();
    let ok = analyzer.analyze_records("000005", records.clone()).unwrap();
    assert_eq!(ok, analyzer.analyze("000005", &create_uptrend_bars(25, 100.0, 1.0)));

    records[3].close = None;
    let err = analyzer.analyze_records("000005", records).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::MissingField {
            index: 3,
            field: "close"
        }
    ));
}

#[test]
fn test_custom_min_bars() {
    let config = AnalyzerConfig {
        min_bars: 30,
        ..AnalyzerConfig::default()
    };
    let analyzer = TrendAnalyzer::new(config);
    assert_eq!(analyzer.config().min_bars, 30);

    let result = analyzer.analyze("000006", &create_uptrend_bars(25, 100.0, 1.0));
    assert_eq!(result.risk_factors, vec!["insufficient data".to_string()]);
}

#[test]
fn test_zero_rsi_period_is_rejected() {
    let config = AnalyzerConfig {
        rsi: RSIParams {
            short: 0,
            ..RSIParams::default()
        },
        ..AnalyzerConfig::default()
    };

    let err = TrendAnalyzer::try_new(config).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
}

#[test]
fn test_long_uptrend_uses_full_averages() {
    let bars = create_uptrend_bars(320, 100.0, 1.0);
    let result = analyze_stock("000009", &bars);

    assert!(result.ma5 > result.ma10 && result.ma10 > result.ma20);
    assert!(matches!(
        result.trend_status,
        TrendStatus::Bull | TrendStatus::StrongBull
    ));
    assert!(result.bias_ma5 > 0.0 && result.bias_ma5 < 5.0);

    let expected_ma250 = bars[70..].iter().map(|bar| bar.close).sum::<f64>() / 250.0;
    assert!((result.ma250 - expected_ma250).abs() < 1e-6);
    assert!(result.ma250 < result.ma60);
}

#[test]
fn test_shared_across_threads() {
    let analyzer = Arc::new(TrendAnalyzer::default());
    let bars = Arc::new(create_uptrend_bars(60, 100.0, 1.0));
    let expected = analyzer.analyze("000007", &bars);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            let bars = Arc::clone(&bars);
            thread::spawn(move || analyzer.analyze("000007", &bars))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_report_text() {
    let result = analyze_stock("000008", &create_uptrend_bars(60, 100.0, 1.0));
    let report = trend_analyzer::format_analysis(&result);

    assert!(report.starts_with("=== 000008 trend analysis ==="));
    assert!(report.contains("Trend: bull"));
    assert!(report.contains("Action: buy"));
    assert!(report.contains("Reasons:"));
}
