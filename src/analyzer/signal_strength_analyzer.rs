use crate::analyzer::base::{AnalysisContext, AnalysisStage};
use crate::analyzer::rsi_analyzer::RSIStatus;
use crate::analyzer::trend_analyzer::TrendStatus;
use crate::analyzer::volume_analyzer::VolumeStatus;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 최대 점수
pub const MAX_SCORE: u32 = 100;

/// 이동평균 지지 1건당 점수
const SUPPORT_SCORE: u32 = 5;

/// 최종 매매 판단
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuySignal {
    StrongBuy,
    Buy,
    Hold,
    #[default]
    Wait,
    Sell,
    StrongSell,
}

impl BuySignal {
    pub fn label(&self) -> &'static str {
        match self {
            BuySignal::StrongBuy => "strong buy",
            BuySignal::Buy => "buy",
            BuySignal::Hold => "hold",
            BuySignal::Wait => "wait",
            BuySignal::Sell => "sell",
            BuySignal::StrongSell => "strong sell",
        }
    }

    /// 점수와 추세를 함께 보고 판단
    pub fn from_score(score: u32, trend: TrendStatus) -> BuySignal {
        if score >= 75 && trend.is_bullish() {
            BuySignal::StrongBuy
        } else if score >= 60 && (trend.is_bullish() || trend == TrendStatus::WeakBull) {
            BuySignal::Buy
        } else if score >= 45 {
            BuySignal::Hold
        } else if score >= 30 {
            BuySignal::Wait
        } else if trend.is_bearish() {
            BuySignal::StrongSell
        } else {
            BuySignal::Sell
        }
    }
}

impl Display for BuySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 가중 점수 평가 결과
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalAssessment {
    pub score: u32,
    pub action: BuySignal,
    pub reasons: Vec<String>,
    pub risks: Vec<String>,
}

impl SignalAssessment {
    fn add(&mut self, score: u32) {
        self.score += score;
    }

    fn reason(&mut self, text: impl Into<String>) {
        self.reasons.push(text.into());
    }

    fn risk(&mut self, text: impl Into<String>) {
        self.risks.push(text.into());
    }
}

/// MA5 이격도 점수 (0~20)
///
/// # Returns
/// * `(u32, Result<String, String>)` - 점수와 설명 (Ok는 매수 근거, Err는 위험 요인)
pub fn score_bias(bias: f64, threshold: f64) -> (u32, Result<String, String>) {
    if bias < 0.0 {
        if bias > -3.0 {
            (
                20,
                Ok(format!("price slightly below MA5 ({:.1}%), pullback entry", bias)),
            )
        } else if bias > -5.0 {
            (
                16,
                Ok(format!("price pulled back to MA5 ({:.1}%), watch support", bias)),
            )
        } else {
            (
                8,
                Err(format!("bias too deep ({:.1}%), support may break", bias)),
            )
        }
    } else if bias < 2.0 {
        (18, Ok(format!("price close to MA5 ({:.1}%), good entry", bias)))
    } else if bias < threshold {
        (
            14,
            Ok(format!(
                "price slightly above MA5 ({:.1}%), small position only",
                bias
            )),
        )
    } else {
        (
            4,
            Err(format!(
                "bias too high ({:.1}% >= {}%), forbidden: do not chase strength",
                bias, threshold
            )),
        )
    }
}

/// 누적된 분류 결과로 점수, 근거, 위험 요인, 매매 판단을 계산
///
/// 반영 순서: 추세, 이격도, 거래량, 지지, MACD, RSI
pub fn assess_signal(result: &TrendAnalysisResult, bias_threshold: f64) -> SignalAssessment {
    let mut assessment = SignalAssessment::default();

    // 추세
    let trend = result.trend_status;
    assessment.add(trend.score());
    if trend.is_bullish() {
        assessment.reason(format!("{}, trade with the trend", trend.label()));
    } else if trend.is_bearish() {
        assessment.risk(format!("{}, avoid long positions", trend.label()));
    }

    // 이격도
    let (bias_score, bias_text) = score_bias(result.bias_ma5, bias_threshold);
    assessment.add(bias_score);
    match bias_text {
        Ok(reason) => assessment.reason(reason),
        Err(risk) => assessment.risk(risk),
    }

    // 거래량
    assessment.add(result.volume_status.score());
    match result.volume_status {
        VolumeStatus::ShrinkVolumeDown => {
            assessment.reason("pullback on shrinking volume, shakeout by main players")
        }
        VolumeStatus::HeavyVolumeDown => assessment.risk("heavy volume decline, watch the risk"),
        _ => {}
    }

    // 지지
    if result.support_ma5 {
        assessment.add(SUPPORT_SCORE);
        assessment.reason("MA5 support holds");
    }
    if result.support_ma10 {
        assessment.add(SUPPORT_SCORE);
        assessment.reason("MA10 support holds");
    }

    // MACD
    let macd = result.macd_status;
    assessment.add(macd.score());
    if macd.is_warning() {
        assessment.risk(result.macd_signal.clone());
    } else {
        assessment.reason(result.macd_signal.clone());
    }

    // RSI
    let rsi = result.rsi_status;
    assessment.add(rsi.score());
    if rsi == RSIStatus::Overbought {
        assessment.risk(result.rsi_signal.clone());
    } else {
        assessment.reason(result.rsi_signal.clone());
    }

    assessment.score = assessment.score.min(MAX_SCORE);
    assessment.action = BuySignal::from_score(assessment.score, trend);
    assessment
}

/// 신호 점수 단계 (항상 마지막에 실행)
#[derive(Debug, Default)]
pub struct SignalStrengthAnalyzer;

impl AnalysisStage for SignalStrengthAnalyzer {
    type Output = SignalAssessment;

    fn name(&self) -> &'static str {
        "signal_strength"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, current: &TrendAnalysisResult) -> Self::Output {
        assess_signal(current, ctx.config.bias_threshold)
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.signal_score = output.score;
        result.buy_signal = output.action;
        result.signal_reasons = output.reasons;
        result.risk_factors = output.risks;
    }
}
