use crate::analyzer::base::{AnalysisContext, AnalysisStage};
use crate::indicator::IndicatorKey;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 이동평균 배열 기반 추세 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    /// MA5 > MA10 > MA20, 간격 확대
    StrongBull,
    /// MA5 > MA10 > MA20
    Bull,
    /// MA5 > MA10, MA10 <= MA20
    WeakBull,
    /// 이동평균 얽힘
    #[default]
    Consolidation,
    /// MA5 < MA10, MA10 >= MA20
    WeakBear,
    /// MA5 < MA10 < MA20
    Bear,
    /// MA5 < MA10 < MA20, 간격 확대
    StrongBear,
}

impl TrendStatus {
    /// 추세 강도 (0~100)
    pub fn strength(&self) -> f64 {
        match self {
            TrendStatus::StrongBull => 90.0,
            TrendStatus::Bull => 75.0,
            TrendStatus::WeakBull => 55.0,
            TrendStatus::Consolidation => 50.0,
            TrendStatus::WeakBear => 40.0,
            TrendStatus::Bear => 25.0,
            TrendStatus::StrongBear => 10.0,
        }
    }

    /// 신호 점수 기여분 (0~30)
    pub fn score(&self) -> u32 {
        match self {
            TrendStatus::StrongBull => 30,
            TrendStatus::Bull => 26,
            TrendStatus::WeakBull => 18,
            TrendStatus::Consolidation => 12,
            TrendStatus::WeakBear => 8,
            TrendStatus::Bear => 4,
            TrendStatus::StrongBear => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendStatus::StrongBull => "strong bull",
            TrendStatus::Bull => "bull",
            TrendStatus::WeakBull => "weak bull",
            TrendStatus::Consolidation => "consolidation",
            TrendStatus::WeakBear => "weak bear",
            TrendStatus::Bear => "bear",
            TrendStatus::StrongBear => "strong bear",
        }
    }

    /// 이동평균 배열 설명
    pub fn alignment(&self) -> &'static str {
        match self {
            TrendStatus::StrongBull => "strong bull alignment, moving averages diverging upward",
            TrendStatus::Bull => "bull alignment MA5>MA10>MA20",
            TrendStatus::WeakBull => "weak bull, MA5>MA10 but MA10<=MA20",
            TrendStatus::Consolidation => "moving averages intertwined, no clear trend",
            TrendStatus::WeakBear => "weak bear, MA5<MA10 but MA10>=MA20",
            TrendStatus::Bear => "bear alignment MA5<MA10<MA20",
            TrendStatus::StrongBear => "strong bear alignment, moving averages diverging downward",
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, TrendStatus::StrongBull | TrendStatus::Bull)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, TrendStatus::Bear | TrendStatus::StrongBear)
    }
}

impl Display for TrendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 이동평균 간격 (%)
///
/// 기준 이동평균이 0 이하이거나 정의되지 않았으면 0, 비교 대상이 정의되지 않았으면 None
fn spread(numerator: Option<f64>, base: Option<f64>) -> Option<f64> {
    match base {
        Some(base) if base > 0.0 => numerator.map(|value| (value - base) / base * 100.0),
        _ => Some(0.0),
    }
}

/// 간격이 이전보다 넓고 임계값을 넘으면 강한 추세
fn is_expanding(current: f64, previous: Option<f64>, threshold: f64) -> bool {
    previous.is_some_and(|previous| current > previous) && current > threshold
}

/// 추세 분류
///
/// # Arguments
/// * `ma5`, `ma10`, `ma20` - 최신 봉의 이동평균
/// * `bull_spread_expanding` - 상승 간격 (MA5-MA20)/MA20 확대 여부를 계산하는 함수
/// * `bear_spread_expanding` - 하락 간격 (MA20-MA5)/MA5 확대 여부를 계산하는 함수
pub fn classify_trend(
    ma5: f64,
    ma10: f64,
    ma20: f64,
    bull_spread_expanding: impl FnOnce() -> bool,
    bear_spread_expanding: impl FnOnce() -> bool,
) -> TrendStatus {
    if ma5 > ma10 && ma10 > ma20 {
        if bull_spread_expanding() {
            TrendStatus::StrongBull
        } else {
            TrendStatus::Bull
        }
    } else if ma5 > ma10 && ma10 <= ma20 {
        TrendStatus::WeakBull
    } else if ma5 < ma10 && ma10 < ma20 {
        if bear_spread_expanding() {
            TrendStatus::StrongBear
        } else {
            TrendStatus::Bear
        }
    } else if ma5 < ma10 && ma10 >= ma20 {
        TrendStatus::WeakBear
    } else {
        TrendStatus::Consolidation
    }
}

/// 추세 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub status: TrendStatus,
    pub alignment: String,
    pub strength: f64,
}

/// 추세 분류 단계
///
/// 간격 비교 시점은 최신 봉을 포함해 끝에서 `trend_lookback`번째 봉입니다.
/// 시계열이 그보다 짧으면 최신 봉과 비교합니다.
#[derive(Debug, Default)]
pub struct TrendStatusAnalyzer;

impl AnalysisStage for TrendStatusAnalyzer {
    type Output = TrendAnalysis;

    fn name(&self) -> &'static str {
        "trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, current: &TrendAnalysisResult) -> Self::Output {
        let lookback = ctx.config.trend_lookback;
        let offset = if ctx.bars() >= lookback {
            lookback.saturating_sub(1)
        } else {
            0
        };
        let threshold = ctx.config.strong_trend_spread;
        let prev = |key| ctx.frame.value_from_end(key, offset);

        let (ma5, ma10, ma20) = (current.ma5, current.ma10, current.ma20);

        let status = classify_trend(
            ma5,
            ma10,
            ma20,
            || {
                let curr_spread = spread(Some(ma5), Some(ma20)).unwrap_or(0.0);
                let prev_spread = spread(prev(IndicatorKey::MA(5)), prev(IndicatorKey::MA(20)));
                is_expanding(curr_spread, prev_spread, threshold)
            },
            || {
                let curr_spread = spread(Some(ma20), Some(ma5)).unwrap_or(0.0);
                let prev_spread = spread(prev(IndicatorKey::MA(20)), prev(IndicatorKey::MA(5)));
                is_expanding(curr_spread, prev_spread, threshold)
            },
        );

        TrendAnalysis {
            status,
            alignment: status.alignment().to_string(),
            strength: status.strength(),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.trend_status = output.status;
        result.ma_alignment = output.alignment;
        result.trend_strength = output.strength;
    }
}
