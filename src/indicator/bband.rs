use crate::config::BBandParams;
use crate::indicator::utils::{moving_average, rolling};
use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};

/// 볼린저 밴드 계산 빌더
///
/// 중간 밴드 = 종가 이동평균, 상/하단 = 중간 ± 승수 × 표본 표준편차.
/// `period - 1`번째 봉부터 정의됩니다.
#[derive(Debug, Clone, Copy)]
pub struct BollingerBandsBuilder {
    params: BBandParams,
}

/// 봉 단위 볼린저 밴드
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBandsSeries {
    pub upper: Column,
    pub middle: Column,
    pub lower: Column,
}

pub fn calculate_bollinger_bands(values: &[f64], params: &BBandParams) -> BollingerBandsSeries {
    let middle = moving_average::rolling_mean(values, params.period);
    let std_dev = rolling::rolling_std(values, params.period);

    let band = |sign: f64| -> Column {
        middle
            .iter()
            .copied()
            .zip(std_dev.iter().copied())
            .map(|(mean, std)| Some(mean? + sign * params.multiplier * std?))
            .collect()
    };

    BollingerBandsSeries {
        upper: band(1.0),
        lower: band(-1.0),
        middle,
    }
}

/// 현재 밴드폭 (%)
///
/// 상/하단 밴드가 모두 양수일 때만 계산하며 그 외에는 0입니다.
pub fn bandwidth(upper: f64, middle: f64, lower: f64) -> f64 {
    if upper > 0.0 && lower > 0.0 && middle != 0.0 {
        (upper - lower) / middle * 100.0
    } else {
        0.0
    }
}

impl BollingerBandsBuilder {
    pub fn new(params: BBandParams) -> BollingerBandsBuilder {
        BollingerBandsBuilder { params }
    }
}

impl ColumnBuilder for BollingerBandsBuilder {
    fn name(&self) -> &'static str {
        "bband"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        let bands = calculate_bollinger_bands(&series.close, &self.params);
        vec![
            (IndicatorKey::BBUpper, bands.upper),
            (IndicatorKey::BBMiddle, bands.middle),
            (IndicatorKey::BBLower, bands.lower),
        ]
    }
}
