use crate::analyzer::base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA};
use crate::config::KDJParams;
use crate::indicator::IndicatorKey;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// KDJ 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KDJStatus {
    Overbought,
    Oversold,
    /// K > D, J > K
    GoldenCross,
    /// K < D, J < K
    DeathCross,
    #[default]
    Neutral,
}

impl KDJStatus {
    pub fn label(&self) -> &'static str {
        match self {
            KDJStatus::Overbought => "overbought",
            KDJStatus::Oversold => "oversold",
            KDJStatus::GoldenCross => "golden cross",
            KDJStatus::DeathCross => "death cross",
            KDJStatus::Neutral => "neutral",
        }
    }
}

impl Display for KDJStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub fn classify_kdj(k: f64, d: f64, j: f64, params: &KDJParams) -> KDJStatus {
    if k > params.overbought && d > params.overbought {
        KDJStatus::Overbought
    } else if k < params.oversold && d < params.oversold {
        KDJStatus::Oversold
    } else if k > d && j > k {
        KDJStatus::GoldenCross
    } else if k < d && j < k {
        KDJStatus::DeathCross
    } else {
        KDJStatus::Neutral
    }
}

fn describe(status: KDJStatus, k: f64, d: f64) -> String {
    match status {
        KDJStatus::Overbought => format!("KDJ overbought (K:{:.1}, D:{:.1}), pullback risk", k, d),
        KDJStatus::Oversold => format!("KDJ oversold (K:{:.1}, D:{:.1}), rebound chance", k, d),
        KDJStatus::GoldenCross => {
            format!("KDJ golden cross (K:{:.1}>D:{:.1}), trend strengthening", k, d)
        }
        KDJStatus::DeathCross => {
            format!("KDJ death cross (K:{:.1}<D:{:.1}), trend weakening", k, d)
        }
        KDJStatus::Neutral => format!("KDJ neutral (K:{:.1}, D:{:.1})", k, d),
    }
}

/// KDJ 분석 결과 (데이터 부족 시 None)
#[derive(Debug, Clone, PartialEq)]
pub struct KDJAnalysis {
    pub values: Option<(f64, f64, f64)>,
    pub status: KDJStatus,
    pub signal: String,
}

/// KDJ 분석 단계
#[derive(Debug, Default)]
pub struct KDJAnalyzer;

impl AnalysisStage for KDJAnalyzer {
    type Output = KDJAnalysis;

    fn name(&self) -> &'static str {
        "kdj"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        let params = &ctx.config.kdj;
        if ctx.bars() < params.period {
            return KDJAnalysis {
                values: None,
                status: KDJStatus::Neutral,
                signal: INSUFFICIENT_DATA.to_string(),
            };
        }

        let k = ctx.latest_or_zero(IndicatorKey::KdjK);
        let d = ctx.latest_or_zero(IndicatorKey::KdjD);
        let j = ctx.latest_or_zero(IndicatorKey::KdjJ);
        let status = classify_kdj(k, d, j, params);

        KDJAnalysis {
            values: Some((k, d, j)),
            status,
            signal: describe(status, k, d),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        if let Some((k, d, j)) = output.values {
            result.kdj_k = k;
            result.kdj_d = d;
            result.kdj_j = j;
        }
        result.kdj_status = output.status;
        result.kdj_signal = output.signal;
    }
}
