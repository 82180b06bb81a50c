use crate::analyzer::base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA};
use crate::indicator::IndicatorKey;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// MACD 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MACDStatus {
    /// 0선 위 골든크로스
    GoldenCrossZero,
    /// DIF가 DEA 상향 돌파
    GoldenCross,
    /// DIF가 0선 상향 돌파
    CrossingUp,
    /// DIF, DEA 모두 양수
    Bullish,
    /// 교차 없음, 부호 혼재 (또는 데이터 부족)
    #[default]
    Neutral,
    /// DIF, DEA 모두 음수
    Bearish,
    /// DIF가 0선 하향 돌파
    CrossingDown,
    /// DIF가 DEA 하향 돌파
    DeathCross,
}

impl MACDStatus {
    /// 신호 점수 기여분 (0~15)
    pub fn score(&self) -> u32 {
        match self {
            MACDStatus::GoldenCrossZero => 15,
            MACDStatus::GoldenCross => 12,
            MACDStatus::CrossingUp => 10,
            MACDStatus::Bullish => 8,
            MACDStatus::Neutral => 5,
            MACDStatus::Bearish => 2,
            MACDStatus::CrossingDown => 0,
            MACDStatus::DeathCross => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MACDStatus::GoldenCrossZero => "golden cross above zero",
            MACDStatus::GoldenCross => "golden cross",
            MACDStatus::CrossingUp => "crossing above zero",
            MACDStatus::Bullish => "bullish",
            MACDStatus::Neutral => "neutral",
            MACDStatus::Bearish => "bearish",
            MACDStatus::CrossingDown => "crossing below zero",
            MACDStatus::DeathCross => "death cross",
        }
    }

    /// 상태 설명
    pub fn signal(&self) -> &'static str {
        match self {
            MACDStatus::GoldenCrossZero => "golden cross above the zero axis, strong buy signal",
            MACDStatus::GoldenCross => "golden cross, trend turning up",
            MACDStatus::CrossingUp => "DIF crossed above zero, trend strengthening",
            MACDStatus::Bullish => "bullish alignment, uptrend continues",
            MACDStatus::Neutral => "MACD in neutral zone",
            MACDStatus::Bearish => "bearish alignment, downtrend continues",
            MACDStatus::CrossingDown => "DIF crossed below zero, trend weakening",
            MACDStatus::DeathCross => "death cross, trend turning down",
        }
    }

    pub fn is_golden(&self) -> bool {
        matches!(self, MACDStatus::GoldenCrossZero | MACDStatus::GoldenCross)
    }

    /// 위험 요인으로 분류되는 상태
    pub fn is_warning(&self) -> bool {
        matches!(self, MACDStatus::DeathCross | MACDStatus::CrossingDown)
    }
}

impl Display for MACDStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 최근 두 봉의 MACD 값
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MACDPoint {
    pub dif: f64,
    pub dea: f64,
}

/// MACD 상태 분류
///
/// 우선순위: 0선 위 골든크로스 > 0선 상향 돌파 > 골든크로스 > 데드크로스 >
/// 0선 하향 돌파 > 양수 구간 > 음수 구간 > 중립
pub fn classify_macd(prev: MACDPoint, curr: MACDPoint) -> MACDStatus {
    let prev_gap = prev.dif - prev.dea;
    let curr_gap = curr.dif - curr.dea;

    let is_golden_cross = prev_gap <= 0.0 && curr_gap > 0.0;
    let is_death_cross = prev_gap >= 0.0 && curr_gap < 0.0;
    let is_crossing_up = prev.dif <= 0.0 && curr.dif > 0.0;
    let is_crossing_down = prev.dif >= 0.0 && curr.dif < 0.0;

    if is_golden_cross && curr.dif > 0.0 {
        MACDStatus::GoldenCrossZero
    } else if is_crossing_up {
        MACDStatus::CrossingUp
    } else if is_golden_cross {
        MACDStatus::GoldenCross
    } else if is_death_cross {
        MACDStatus::DeathCross
    } else if is_crossing_down {
        MACDStatus::CrossingDown
    } else if curr.dif > 0.0 && curr.dea > 0.0 {
        MACDStatus::Bullish
    } else if curr.dif < 0.0 && curr.dea < 0.0 {
        MACDStatus::Bearish
    } else {
        MACDStatus::Neutral
    }
}

/// MACD 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct MACDAnalysis {
    pub dif: f64,
    pub dea: f64,
    pub bar: f64,
    pub status: MACDStatus,
    pub signal: String,
}

/// MACD 분석 단계
///
/// 봉이 느린 EMA 기간보다 적으면 수치는 0, 상태는 중립으로 둡니다.
#[derive(Debug, Default)]
pub struct MACDAnalyzer;

impl AnalysisStage for MACDAnalyzer {
    type Output = MACDAnalysis;

    fn name(&self) -> &'static str {
        "macd"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        if ctx.bars() < ctx.config.macd.slow {
            return MACDAnalysis {
                dif: 0.0,
                dea: 0.0,
                bar: 0.0,
                status: MACDStatus::Neutral,
                signal: INSUFFICIENT_DATA.to_string(),
            };
        }

        let point = |offset| MACDPoint {
            dif: ctx.value_or_zero(IndicatorKey::MacdDif, offset),
            dea: ctx.value_or_zero(IndicatorKey::MacdDea, offset),
        };
        let curr = point(0);
        let status = classify_macd(point(1), curr);

        MACDAnalysis {
            dif: curr.dif,
            dea: curr.dea,
            bar: ctx.latest_or_zero(IndicatorKey::MacdBar),
            status,
            signal: status.signal().to_string(),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.macd_dif = output.dif;
        result.macd_dea = output.dea;
        result.macd_bar = output.bar;
        result.macd_status = output.status;
        result.macd_signal = output.signal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(dif: f64, dea: f64) -> MACDPoint {
        MACDPoint { dif, dea }
    }

    #[test]
    fn test_golden_cross_above_zero_has_priority() {
        assert_eq!(classify_macd(p(0.5, 0.6), p(0.8, 0.7)), MACDStatus::GoldenCrossZero);
    }

    #[test]
    fn test_crossing_up_beats_plain_golden_cross() {
        // 골든크로스 + DIF 0선 돌파 → DIF > 0 이므로 0선 위 골든크로스
        assert_eq!(classify_macd(p(-0.1, 0.0), p(0.1, 0.0)), MACDStatus::GoldenCrossZero);
        // DIF 0선 돌파, DEA보다 여전히 아래 → 상향 돌파
        assert_eq!(classify_macd(p(-0.1, 0.5), p(0.1, 0.5)), MACDStatus::CrossingUp);
    }

    #[test]
    fn test_golden_cross_below_zero() {
        assert_eq!(classify_macd(p(-0.8, -0.7), p(-0.5, -0.6)), MACDStatus::GoldenCross);
    }

    #[test]
    fn test_death_cross_and_crossing_down() {
        assert_eq!(classify_macd(p(0.8, 0.7), p(0.5, 0.6)), MACDStatus::DeathCross);
        assert_eq!(classify_macd(p(0.1, -0.5), p(-0.1, -0.5)), MACDStatus::CrossingDown);
    }

    #[test]
    fn test_steady_states() {
        assert_eq!(classify_macd(p(0.8, 0.5), p(0.9, 0.6)), MACDStatus::Bullish);
        assert_eq!(classify_macd(p(-0.8, -0.5), p(-0.9, -0.6)), MACDStatus::Bearish);
        assert_eq!(classify_macd(p(-0.2, 0.3), p(-0.3, 0.3)), MACDStatus::Neutral);
    }

    #[test]
    fn test_scores() {
        assert_eq!(MACDStatus::GoldenCrossZero.score(), 15);
        assert_eq!(MACDStatus::Neutral.score(), 5);
        assert_eq!(MACDStatus::DeathCross.score(), 0);
    }
}
