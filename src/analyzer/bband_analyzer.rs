use crate::analyzer::base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA};
use crate::indicator::IndicatorKey;
use crate::indicator::bband::bandwidth;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 볼린저 밴드 내 현재가 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerPosition {
    /// 상단 밴드 이상 (과매수 구간)
    AboveUpper,
    /// 중간 ~ 상단
    UpperHalf,
    /// 하단 ~ 중간
    LowerHalf,
    /// 하단 밴드 아래 (과매도 구간)
    BelowLower,
}

impl BollingerPosition {
    pub fn label(&self) -> &'static str {
        match self {
            BollingerPosition::AboveUpper => "above upper band (overbought zone)",
            BollingerPosition::UpperHalf => "above middle band (bullish zone)",
            BollingerPosition::LowerHalf => "below middle band (bearish zone)",
            BollingerPosition::BelowLower => "below lower band (oversold zone)",
        }
    }
}

impl Display for BollingerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub fn classify_position(price: f64, upper: f64, middle: f64, lower: f64) -> BollingerPosition {
    if price >= upper {
        BollingerPosition::AboveUpper
    } else if price >= middle {
        BollingerPosition::UpperHalf
    } else if price >= lower {
        BollingerPosition::LowerHalf
    } else {
        BollingerPosition::BelowLower
    }
}

/// 볼린저 밴드 분석 결과 (데이터 부족 시 status가 None)
#[derive(Debug, Clone, PartialEq)]
pub struct BBandAnalysis {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub width: f64,
    pub status: Option<BollingerPosition>,
    pub position: String,
}

/// 볼린저 밴드 분석 단계
#[derive(Debug, Default)]
pub struct BBandAnalyzer;

impl AnalysisStage for BBandAnalyzer {
    type Output = BBandAnalysis;

    fn name(&self) -> &'static str {
        "bollinger_bands"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, current: &TrendAnalysisResult) -> Self::Output {
        if ctx.bars() < ctx.config.bband.period {
            return BBandAnalysis {
                upper: 0.0,
                middle: 0.0,
                lower: 0.0,
                width: 0.0,
                status: None,
                position: INSUFFICIENT_DATA.to_string(),
            };
        }

        let upper = ctx.latest_or_zero(IndicatorKey::BBUpper);
        let middle = ctx.latest_or_zero(IndicatorKey::BBMiddle);
        let lower = ctx.latest_or_zero(IndicatorKey::BBLower);
        let status = classify_position(current.current_price, upper, middle, lower);

        BBandAnalysis {
            upper,
            middle,
            lower,
            width: bandwidth(upper, middle, lower),
            status: Some(status),
            position: status.label().to_string(),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.bb_upper = output.upper;
        result.bb_middle = output.middle;
        result.bb_lower = output.lower;
        result.bb_width = output.width;
        result.bb_status = output.status;
        result.bb_position = output.position;
    }
}
