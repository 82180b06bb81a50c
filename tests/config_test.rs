use common_test_utils::*;

use std::io::Write;
use tempfile::Builder;
use trend_analyzer::{AnalyzerConfig, ConfigError, ConfigFormat, ConfigLoader, TrendAnalyzer};

#[test]
fn test_partial_toml_overrides_defaults() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "min_bars = 30\nbias_threshold = 8.0\n\n[rsi]\noverbought = 75.0").unwrap();

    let config: AnalyzerConfig =
        ConfigLoader::load_from_file(file.path(), ConfigFormat::Auto).unwrap();

    assert_eq!(config.min_bars, 30);
    assert_eq!(config.bias_threshold, 8.0);
    assert_eq!(config.rsi.overbought, 75.0);
    assert_eq!(config.rsi.mid, 12);
    assert_eq!(config.macd, AnalyzerConfig::default().macd);
}

#[test]
fn test_json_config_drives_analysis() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{ "min_bars": 40 }}"#).unwrap();

    let config: AnalyzerConfig =
        ConfigLoader::load_from_file(file.path(), ConfigFormat::Auto).unwrap();
    let analyzer = TrendAnalyzer::new(config);

    let result = analyzer.analyze("000001", &create_uptrend_bars(35, 100.0, 1.0));
    assert_eq!(result.risk_factors, vec!["insufficient data".to_string()]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = ConfigLoader::load_from_string::<AnalyzerConfig>(
        "[macd]\nfast = 30\nslow = 26",
        ConfigFormat::Toml,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn test_save_and_reload() {
    let file = Builder::new().suffix(".toml").tempfile().unwrap();
    let config = AnalyzerConfig {
        trend_lookback: 7,
        ..AnalyzerConfig::default()
    };

    ConfigLoader::save_to_file(&config, file.path(), ConfigFormat::Auto).unwrap();
    let loaded: AnalyzerConfig =
        ConfigLoader::load_from_file(file.path(), ConfigFormat::Auto).unwrap();
    assert_eq!(loaded, config);
}
