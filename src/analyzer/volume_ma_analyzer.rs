use crate::analyzer::base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA};
use crate::indicator::IndicatorKey;
use crate::indicator::volume::VOLUME_MA_PERIODS;
use crate::result::TrendAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 거래량 이동평균 배열 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMAStatus {
    /// 5 > 10 > 20
    BullishAligned,
    /// 5 < 10 < 20
    BearishAligned,
    /// 5 > 10
    Strengthening,
    #[default]
    Balanced,
}

impl VolumeMAStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeMAStatus::BullishAligned => "volume MAs in bullish alignment, active capital",
            VolumeMAStatus::BearishAligned => "volume MAs in bearish alignment, capital shrinking",
            VolumeMAStatus::Strengthening => "short-term volume strengthening",
            VolumeMAStatus::Balanced => "volume MAs balanced",
        }
    }
}

impl Display for VolumeMAStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 거래량 이동평균 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMAAnalysis {
    pub values: Option<(f64, f64, f64)>,
    pub ratio_ma5: f64,
    pub status: VolumeMAStatus,
    pub trend: String,
}

/// 거래량 이동평균 분석 단계
///
/// 가장 긴 거래량 이동평균 기간만큼 봉이 있어야 합니다.
#[derive(Debug, Default)]
pub struct VolumeMAAnalyzer;

impl AnalysisStage for VolumeMAAnalyzer {
    type Output = VolumeMAAnalysis;

    fn name(&self) -> &'static str {
        "volume_ma"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        let [short, mid, long] = VOLUME_MA_PERIODS;
        if ctx.bars() < long {
            return VolumeMAAnalysis {
                values: None,
                ratio_ma5: 0.0,
                status: VolumeMAStatus::Balanced,
                trend: INSUFFICIENT_DATA.to_string(),
            };
        }

        let keys = [
            IndicatorKey::VolMA(short),
            IndicatorKey::VolMA(mid),
            IndicatorKey::VolMA(long),
        ];
        let latest = ctx.frame.latest_set("volume_ma", &keys);
        let vol_ma5 = ctx.latest_or_zero(keys[0]);
        let vol_ma10 = ctx.latest_or_zero(keys[1]);
        let vol_ma20 = ctx.latest_or_zero(keys[2]);

        // 세 값이 모두 정의되어야 배열 판정
        let complete = latest.len() == keys.len();
        let status = if complete && latest.is_regular_arrangement(|v| *v) {
            VolumeMAStatus::BullishAligned
        } else if complete && latest.is_reverse_arrangement(|v| *v) {
            VolumeMAStatus::BearishAligned
        } else if vol_ma5 > vol_ma10 {
            VolumeMAStatus::Strengthening
        } else {
            VolumeMAStatus::Balanced
        };

        let ratio_ma5 = if vol_ma5 > 0.0 {
            ctx.latest_volume() / vol_ma5
        } else {
            0.0
        };

        VolumeMAAnalysis {
            values: Some((vol_ma5, vol_ma10, vol_ma20)),
            ratio_ma5,
            status,
            trend: status.label().to_string(),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        if let Some((vol_ma5, vol_ma10, vol_ma20)) = output.values {
            result.vol_ma5 = vol_ma5;
            result.vol_ma10 = vol_ma10;
            result.vol_ma20 = vol_ma20;
        }
        result.vol_ratio_ma5 = output.ratio_ma5;
        result.vol_ma_status = output.status;
        result.vol_trend = output.trend;
    }
}
