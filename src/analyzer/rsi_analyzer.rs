use crate::analyzer::base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA};
use crate::config::RSIParams;
use crate::indicator::IndicatorKey;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// RSI 구간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RSIStatus {
    Overbought,
    Strong,
    #[default]
    Neutral,
    Weak,
    Oversold,
}

impl RSIStatus {
    /// 신호 점수 기여분 (0~10)
    pub fn score(&self) -> u32 {
        match self {
            RSIStatus::Oversold => 10,
            RSIStatus::Strong => 8,
            RSIStatus::Neutral => 5,
            RSIStatus::Weak => 3,
            RSIStatus::Overbought => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RSIStatus::Overbought => "overbought",
            RSIStatus::Strong => "strong",
            RSIStatus::Neutral => "neutral",
            RSIStatus::Weak => "weak",
            RSIStatus::Oversold => "oversold",
        }
    }
}

impl Display for RSIStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 중기 RSI 값으로 구간 분류
pub fn classify_rsi(rsi: f64, params: &RSIParams) -> RSIStatus {
    if rsi > params.overbought {
        RSIStatus::Overbought
    } else if rsi > params.strong {
        RSIStatus::Strong
    } else if rsi >= params.weak {
        RSIStatus::Neutral
    } else if rsi >= params.oversold {
        RSIStatus::Weak
    } else {
        RSIStatus::Oversold
    }
}

fn describe(status: RSIStatus, rsi: f64, params: &RSIParams) -> String {
    match status {
        RSIStatus::Overbought => format!(
            "RSI overbought ({:.1}>{}), high pullback risk",
            rsi, params.overbought
        ),
        RSIStatus::Strong => format!("RSI strong ({:.1}), buyers in control", rsi),
        RSIStatus::Neutral => format!("RSI neutral ({:.1}), range-bound", rsi),
        RSIStatus::Weak => format!("RSI weak ({:.1}), watch for a rebound", rsi),
        RSIStatus::Oversold => format!(
            "RSI oversold ({:.1}<{}), rebound likely",
            rsi, params.oversold
        ),
    }
}

/// RSI 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct RSIAnalysis {
    pub rsi_short: f64,
    pub rsi_mid: f64,
    pub rsi_long: f64,
    pub status: RSIStatus,
    pub signal: String,
}

/// RSI 분석 단계
///
/// 장기 RSI 기간만큼 봉이 있어야 하며, 상태는 중기 RSI로 판정합니다.
#[derive(Debug, Default)]
pub struct RSIAnalyzer;

impl AnalysisStage for RSIAnalyzer {
    type Output = RSIAnalysis;

    fn name(&self) -> &'static str {
        "rsi"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        let params = &ctx.config.rsi;
        if ctx.bars() < params.long {
            return RSIAnalysis {
                rsi_short: 0.0,
                rsi_mid: 0.0,
                rsi_long: 0.0,
                status: RSIStatus::Neutral,
                signal: INSUFFICIENT_DATA.to_string(),
            };
        }

        let rsi_mid = ctx.latest_or_zero(IndicatorKey::RSI(params.mid));
        let status = classify_rsi(rsi_mid, params);

        RSIAnalysis {
            rsi_short: ctx.latest_or_zero(IndicatorKey::RSI(params.short)),
            rsi_mid,
            rsi_long: ctx.latest_or_zero(IndicatorKey::RSI(params.long)),
            status,
            signal: describe(status, rsi_mid, params),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.rsi_6 = output.rsi_short;
        result.rsi_12 = output.rsi_mid;
        result.rsi_24 = output.rsi_long;
        result.rsi_status = output.status;
        result.rsi_signal = output.signal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rsi_boundaries() {
        let params = RSIParams::default();
        assert_eq!(classify_rsi(70.1, &params), RSIStatus::Overbought);
        assert_eq!(classify_rsi(70.0, &params), RSIStatus::Strong);
        assert_eq!(classify_rsi(60.0, &params), RSIStatus::Neutral);
        assert_eq!(classify_rsi(40.0, &params), RSIStatus::Neutral);
        assert_eq!(classify_rsi(39.9, &params), RSIStatus::Weak);
        assert_eq!(classify_rsi(30.0, &params), RSIStatus::Weak);
        assert_eq!(classify_rsi(29.9, &params), RSIStatus::Oversold);
    }

    #[test]
    fn test_signal_text_carries_value() {
        let params = RSIParams::default();
        assert!(describe(RSIStatus::Overbought, 75.31, &params).contains("75.3"));
    }
}
