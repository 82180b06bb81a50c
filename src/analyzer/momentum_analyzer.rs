use crate::analyzer::base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA};
use crate::config::MomentumParams;
use crate::indicator::IndicatorKey;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 단기/장기 모멘텀 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumStatus {
    StrongUp,
    MildUp,
    #[default]
    Consolidating,
    MildDown,
    StrongDown,
}

impl MomentumStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MomentumStatus::StrongUp => "strong rally",
            MomentumStatus::MildUp => "mild rise",
            MomentumStatus::Consolidating => "consolidating",
            MomentumStatus::MildDown => "mild decline",
            MomentumStatus::StrongDown => "accelerating decline",
        }
    }
}

impl Display for MomentumStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 두 구간 모멘텀이 모두 임계값을 넘는지로 분류
///
/// 강한 하락은 완만한 하락보다 먼저 검사합니다.
pub fn classify_momentum(short: f64, long: f64, params: &MomentumParams) -> MomentumStatus {
    if short > params.strong_short && long > params.strong_long {
        MomentumStatus::StrongUp
    } else if short > params.mild_short && long > params.mild_long {
        MomentumStatus::MildUp
    } else if short < -params.strong_short && long < -params.strong_long {
        MomentumStatus::StrongDown
    } else if short < -params.mild_short && long < -params.mild_long {
        MomentumStatus::MildDown
    } else {
        MomentumStatus::Consolidating
    }
}

/// 모멘텀 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumAnalysis {
    pub short: f64,
    pub long: f64,
    pub status: MomentumStatus,
    pub signal: String,
}

/// 모멘텀 분석 단계
#[derive(Debug, Default)]
pub struct MomentumAnalyzer;

impl AnalysisStage for MomentumAnalyzer {
    type Output = MomentumAnalysis;

    fn name(&self) -> &'static str {
        "momentum"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        let params = &ctx.config.momentum;
        if ctx.bars() < params.long {
            return MomentumAnalysis {
                short: 0.0,
                long: 0.0,
                status: MomentumStatus::Consolidating,
                signal: INSUFFICIENT_DATA.to_string(),
            };
        }

        let short = ctx.latest_or_zero(IndicatorKey::Momentum(params.short));
        let long = ctx.latest_or_zero(IndicatorKey::Momentum(params.long));
        let status = classify_momentum(short, long, params);

        MomentumAnalysis {
            short,
            long,
            status,
            signal: format!(
                "{} ({}d: {:+.1}%, {}d: {:+.1}%)",
                status.label(),
                params.short,
                short,
                params.long,
                long
            ),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.momentum_5d = output.short;
        result.momentum_10d = output.long;
        result.momentum_status = output.status;
        result.momentum_signal = output.signal;
    }
}
