use crate::indicator::utils::percent_change;
use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};

/// n일 모멘텀 열 빌더
///
/// 모멘텀 = (종가 / n봉 전 종가 - 1) × 100, n번째 봉부터 정의됩니다.
#[derive(Debug)]
pub struct MomentumBuilder {
    periods: Vec<usize>,
}

impl MomentumBuilder {
    pub fn new(periods: &[usize]) -> MomentumBuilder {
        MomentumBuilder {
            periods: periods.to_vec(),
        }
    }
}

impl ColumnBuilder for MomentumBuilder {
    fn name(&self) -> &'static str {
        "momentum"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        self.periods
            .iter()
            .map(|period| {
                (
                    IndicatorKey::Momentum(*period),
                    percent_change(&series.close, *period),
                )
            })
            .collect()
    }
}
