use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// 기본 분석 설정 (프로세스 전역, 불변)
pub static DEFAULT_CONFIG: Lazy<AnalyzerConfig> = Lazy::new(AnalyzerConfig::default);

/// MACD 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MACDParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MACDParams {
    fn default() -> Self {
        MACDParams {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// RSI 매개변수
///
/// 상태 판정은 중기(mid) RSI를 기준으로 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RSIParams {
    pub short: usize,
    pub mid: usize,
    pub long: usize,
    pub overbought: f64,
    pub oversold: f64,
    /// 강세 구간 하한
    pub strong: f64,
    /// 중립 구간 하한
    pub weak: f64,
}

impl Default for RSIParams {
    fn default() -> Self {
        RSIParams {
            short: 6,
            mid: 12,
            long: 24,
            overbought: 70.0,
            oversold: 30.0,
            strong: 60.0,
            weak: 40.0,
        }
    }
}

/// KDJ 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KDJParams {
    /// RSV 계산 기간
    pub period: usize,
    /// K 지수평활 span
    pub k_span: usize,
    /// D 지수평활 span
    pub d_span: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for KDJParams {
    fn default() -> Self {
        KDJParams {
            period: 9,
            k_span: 3,
            d_span: 3,
            overbought: 80.0,
            oversold: 20.0,
        }
    }
}

/// 볼린저 밴드 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BBandParams {
    pub period: usize,
    pub multiplier: f64,
}

impl Default for BBandParams {
    fn default() -> Self {
        BBandParams {
            period: 20,
            multiplier: 2.0,
        }
    }
}

/// 모멘텀 매개변수
///
/// 임계값은 (단기, 장기) 모멘텀 쌍에 동시에 적용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumParams {
    pub short: usize,
    pub long: usize,
    pub strong_short: f64,
    pub strong_long: f64,
    pub mild_short: f64,
    pub mild_long: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        MomentumParams {
            short: 5,
            long: 10,
            strong_short: 3.0,
            strong_long: 5.0,
            mild_short: 1.0,
            mild_long: 2.0,
        }
    }
}

/// 추세 분석기 설정
///
/// 분석기 생성 시 한 번 전달되며 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// 분석에 필요한 최소 봉 수
    pub min_bars: usize,
    /// 이격도 추격 금지 임계값 (%)
    pub bias_threshold: f64,
    /// 축소 거래량 비율 (당일/직전 5일 평균)
    pub volume_shrink_ratio: f64,
    /// 증가 거래량 비율
    pub volume_heavy_ratio: f64,
    /// 이동평균 지지 허용 오차 (비율)
    pub ma_support_tolerance: f64,
    /// 이평선 간격 비교 시점 (최신 봉 포함, 끝에서부터의 위치)
    pub trend_lookback: usize,
    /// 강한 추세로 승격되는 MA5-MA20 간격 (%)
    pub strong_trend_spread: f64,
    /// 저항선 계산에 쓰는 최근 고점 기간
    pub resistance_lookback: usize,
    /// 거래량 비율 계산에 쓰는 직전 봉 수
    pub volume_ratio_lookback: usize,
    pub macd: MACDParams,
    pub rsi: RSIParams,
    pub kdj: KDJParams,
    pub bband: BBandParams,
    pub momentum: MomentumParams,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            min_bars: 20,
            bias_threshold: 5.0,
            volume_shrink_ratio: 0.7,
            volume_heavy_ratio: 1.5,
            ma_support_tolerance: 0.02,
            trend_lookback: 5,
            strong_trend_spread: 5.0,
            resistance_lookback: 20,
            volume_ratio_lookback: 5,
            macd: MACDParams::default(),
            rsi: RSIParams::default(),
            kdj: KDJParams::default(),
            bband: BBandParams::default(),
            momentum: MomentumParams::default(),
        }
    }
}

fn positive(name: &str, value: usize) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{}은(는) 0보다 커야 합니다",
            name
        )));
    }
    Ok(())
}

fn ordered(name: &str, lower: f64, upper: f64) -> ConfigResult<()> {
    if !(lower < upper) {
        return Err(ConfigError::ValidationError(format!(
            "{}: {} < {} 이어야 합니다",
            name, lower, upper
        )));
    }
    Ok(())
}

impl ConfigValidation for AnalyzerConfig {
    fn validate(&self) -> ConfigResult<()> {
        positive("min_bars", self.min_bars)?;
        positive("trend_lookback", self.trend_lookback)?;
        positive("resistance_lookback", self.resistance_lookback)?;
        positive("volume_ratio_lookback", self.volume_ratio_lookback)?;
        positive("macd.fast", self.macd.fast)?;
        positive("macd.signal", self.macd.signal)?;
        positive("rsi.short", self.rsi.short)?;
        positive("kdj.period", self.kdj.period)?;
        positive("kdj.k_span", self.kdj.k_span)?;
        positive("kdj.d_span", self.kdj.d_span)?;
        positive("bband.period", self.bband.period)?;
        positive("momentum.short", self.momentum.short)?;

        ordered("macd 기간", self.macd.fast as f64, self.macd.slow as f64)?;
        ordered("rsi 단기/중기", self.rsi.short as f64, self.rsi.mid as f64)?;
        ordered("rsi 중기/장기", self.rsi.mid as f64, self.rsi.long as f64)?;
        ordered("rsi 과매도/약세", self.rsi.oversold, self.rsi.weak)?;
        ordered("rsi 약세/강세", self.rsi.weak, self.rsi.strong)?;
        ordered("rsi 강세/과매수", self.rsi.strong, self.rsi.overbought)?;
        ordered("kdj 과매도/과매수", self.kdj.oversold, self.kdj.overbought)?;
        ordered(
            "momentum 기간",
            self.momentum.short as f64,
            self.momentum.long as f64,
        )?;
        ordered(
            "거래량 축소/증가 비율",
            self.volume_shrink_ratio,
            self.volume_heavy_ratio,
        )?;

        if self.bias_threshold <= 0.0 || self.ma_support_tolerance < 0.0 {
            return Err(ConfigError::ValidationError(
                "이격도 임계값은 양수, 지지 허용 오차는 0 이상이어야 합니다".to_string(),
            ));
        }
        if self.bband.multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(
                "볼린저 밴드 승수는 양수여야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}
