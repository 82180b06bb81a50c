use crate::indicator::utils::moving_average;
use crate::indicator::{Column, PriceSeries};
use std::fmt::Display;

/// 이동평균 계산 대상 값
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Close,
    Volume,
}

/// 단순이동평균(SMA) 열 빌더
#[derive(Debug, Clone, Copy)]
pub struct SMABuilder {
    period: usize,
    source: PriceSource,
}

impl Display for SMABuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({:?}: {})", self.source, self.period)
    }
}

impl SMABuilder {
    pub fn new(period: usize, source: PriceSource) -> SMABuilder {
        SMABuilder { period, source }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// 시계열 길이가 기간 이상인지
    pub fn is_defined_for(&self, series: &PriceSeries) -> bool {
        series.len() >= self.period
    }

    pub fn column(&self, series: &PriceSeries) -> Column {
        let values = match self.source {
            PriceSource::Close => &series.close,
            PriceSource::Volume => &series.volume,
        };
        moving_average::rolling_mean(values, self.period)
    }
}
