use crate::analyzer::base::{AnalysisContext, AnalysisStage};
use crate::indicator::IndicatorKey;
use crate::result::TrendAnalysisResult;

/// 최신 봉의 종가와 종가 이동평균
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovingAverageSnapshot {
    pub current_price: f64,
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub ma250: f64,
}

/// 이동평균 값 추출 단계
///
/// 이후 단계(추세, 이격도, 지지선)가 결과에 기록된 이동평균을 사용합니다.
#[derive(Debug, Default)]
pub struct MAAnalyzer;

impl AnalysisStage for MAAnalyzer {
    type Output = MovingAverageSnapshot;

    fn name(&self) -> &'static str {
        "moving_average"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, _current: &TrendAnalysisResult) -> Self::Output {
        MovingAverageSnapshot {
            current_price: ctx.latest_close(),
            ma5: ctx.latest_or_zero(IndicatorKey::MA(5)),
            ma10: ctx.latest_or_zero(IndicatorKey::MA(10)),
            ma20: ctx.latest_or_zero(IndicatorKey::MA(20)),
            ma60: ctx.latest_or_zero(IndicatorKey::MA(60)),
            ma250: ctx.latest_or_zero(IndicatorKey::MA(250)),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.current_price = output.current_price;
        result.ma5 = output.ma5;
        result.ma10 = output.ma10;
        result.ma20 = output.ma20;
        result.ma60 = output.ma60;
        result.ma250 = output.ma250;
    }
}
