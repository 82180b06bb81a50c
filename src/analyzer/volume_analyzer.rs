use crate::analyzer::base::{AnalysisContext, AnalysisStage};
use crate::indicator::volume::volume_ratio;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 거래량-가격 국면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    /// 거래량 증가 + 상승
    HeavyVolumeUp,
    /// 거래량 증가 + 하락
    HeavyVolumeDown,
    /// 거래량 감소 + 상승
    ShrinkVolumeUp,
    /// 거래량 감소 + 하락 (눌림목)
    ShrinkVolumeDown,
    #[default]
    Normal,
}

impl VolumeStatus {
    /// 신호 점수 기여분 (0~15)
    pub fn score(&self) -> u32 {
        match self {
            VolumeStatus::ShrinkVolumeDown => 15,
            VolumeStatus::HeavyVolumeUp => 12,
            VolumeStatus::Normal => 10,
            VolumeStatus::ShrinkVolumeUp => 6,
            VolumeStatus::HeavyVolumeDown => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolumeStatus::HeavyVolumeUp => "heavy volume up",
            VolumeStatus::HeavyVolumeDown => "heavy volume down",
            VolumeStatus::ShrinkVolumeUp => "shrinking volume up",
            VolumeStatus::ShrinkVolumeDown => "shrinking volume pullback",
            VolumeStatus::Normal => "normal volume",
        }
    }

    /// 국면 설명
    pub fn description(&self) -> &'static str {
        match self {
            VolumeStatus::HeavyVolumeUp => "heavy volume rally, buyers in control",
            VolumeStatus::HeavyVolumeDown => "heavy volume decline, watch the risk",
            VolumeStatus::ShrinkVolumeUp => "rising on shrinking volume, weak momentum",
            VolumeStatus::ShrinkVolumeDown => "pullback on shrinking volume, shakeout pattern",
            VolumeStatus::Normal => "volume is normal",
        }
    }
}

impl Display for VolumeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 거래량 비율과 당일 등락으로 국면 분류
///
/// 등락률이 0이면 하락으로 취급합니다.
pub fn classify_volume(ratio: f64, price_change: f64, shrink: f64, heavy: f64) -> VolumeStatus {
    let is_up = price_change > 0.0;
    if ratio >= heavy {
        if is_up {
            VolumeStatus::HeavyVolumeUp
        } else {
            VolumeStatus::HeavyVolumeDown
        }
    } else if ratio <= shrink {
        if is_up {
            VolumeStatus::ShrinkVolumeUp
        } else {
            VolumeStatus::ShrinkVolumeDown
        }
    } else {
        VolumeStatus::Normal
    }
}

/// 거래량 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeAnalysis {
    pub status: VolumeStatus,
    pub ratio_5d: f64,
    pub trend: String,
}

/// 거래량 국면 분석 단계
///
/// 봉이 5개 미만이면 결과를 변경하지 않습니다.
#[derive(Debug, Default)]
pub struct VolumeAnalyzer;

impl AnalysisStage for VolumeAnalyzer {
    type Output = Option<VolumeAnalysis>;

    fn name(&self) -> &'static str {
        "volume"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        let closes = &ctx.series.close;
        if closes.len() < 5 {
            return None;
        }

        let ratio = volume_ratio(&ctx.series.volume, ctx.config.volume_ratio_lookback);
        let prev_close = closes[closes.len() - 2];
        let price_change = if prev_close != 0.0 {
            (ctx.latest_close() - prev_close) / prev_close * 100.0
        } else {
            0.0
        };

        let status = classify_volume(
            ratio,
            price_change,
            ctx.config.volume_shrink_ratio,
            ctx.config.volume_heavy_ratio,
        );

        Some(VolumeAnalysis {
            status,
            ratio_5d: ratio,
            trend: status.description().to_string(),
        })
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        if let Some(output) = output {
            result.volume_status = output.status;
            result.volume_ratio_5d = output.ratio_5d;
            result.volume_trend = output.trend;
        }
    }
}
