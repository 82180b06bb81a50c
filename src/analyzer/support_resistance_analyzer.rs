use crate::analyzer::base::{AnalysisContext, AnalysisStage};
use crate::result::TrendAnalysisResult;

/// 지지/저항 분석 결과
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupportResistance {
    pub support_ma5: bool,
    pub support_ma10: bool,
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
}

/// 현재가가 이동평균 바로 위(허용 오차 이내)에 있는지 확인
pub fn is_ma_support(price: f64, ma: f64, tolerance: f64) -> bool {
    ma > 0.0 && price >= ma && (price - ma).abs() / ma <= tolerance
}

/// 지지선/저항선 탐지
///
/// # Arguments
/// * `price` - 현재가
/// * `ma5`, `ma10`, `ma20` - 최신 이동평균
/// * `recent_highs` - 최근 고가 (기간이 채워지지 않았으면 None)
/// * `tolerance` - 이동평균 지지 허용 오차 (비율)
pub fn detect_support_resistance(
    price: f64,
    ma5: f64,
    ma10: f64,
    ma20: f64,
    recent_highs: Option<&[f64]>,
    tolerance: f64,
) -> SupportResistance {
    let mut levels = SupportResistance::default();

    if is_ma_support(price, ma5, tolerance) {
        levels.support_ma5 = true;
        levels.support_levels.push(ma5);
    }

    if is_ma_support(price, ma10, tolerance) {
        levels.support_ma10 = true;
        if !levels.support_levels.contains(&ma10) {
            levels.support_levels.push(ma10);
        }
    }

    if ma20 > 0.0 && price >= ma20 {
        levels.support_levels.push(ma20);
    }

    if let Some(highs) = recent_highs {
        let recent_high = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if recent_high > price {
            levels.resistance_levels.push(recent_high);
        }
    }

    levels
}

/// 지지/저항 분석 단계
#[derive(Debug, Default)]
pub struct SupportResistanceAnalyzer;

impl AnalysisStage for SupportResistanceAnalyzer {
    type Output = SupportResistance;

    fn name(&self) -> &'static str {
        "support_resistance"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, current: &TrendAnalysisResult) -> Self::Output {
        let lookback = ctx.config.resistance_lookback;
        let highs = &ctx.series.high;
        let recent_highs = (highs.len() >= lookback).then(|| &highs[highs.len() - lookback..]);

        detect_support_resistance(
            current.current_price,
            current.ma5,
            current.ma10,
            current.ma20,
            recent_highs,
            ctx.config.ma_support_tolerance,
        )
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.support_ma5 = output.support_ma5;
        result.support_ma10 = output.support_ma10;
        result.support_levels = output.support_levels;
        result.resistance_levels = output.resistance_levels;
    }
}
