use crate::indicator::ma::sma::{PriceSource, SMABuilder};
use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};

/// 거래량 이동평균 기간
pub const VOLUME_MA_PERIODS: [usize; 3] = [5, 10, 20];

/// 거래량 이동평균 열 빌더
#[derive(Debug)]
pub struct VolumeMAsBuilder {
    builders: Vec<SMABuilder>,
}

impl Default for VolumeMAsBuilder {
    fn default() -> Self {
        VolumeMAsBuilder::new(&VOLUME_MA_PERIODS)
    }
}

impl VolumeMAsBuilder {
    pub fn new(periods: &[usize]) -> VolumeMAsBuilder {
        if periods.iter().any(|period| *period == 0) {
            panic!("거래량 계산 기간은 0보다 커야 합니다");
        }

        VolumeMAsBuilder {
            builders: periods
                .iter()
                .map(|period| SMABuilder::new(*period, PriceSource::Volume))
                .collect(),
        }
    }
}

impl ColumnBuilder for VolumeMAsBuilder {
    fn name(&self) -> &'static str {
        "volume_ma"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        self.builders
            .iter()
            .map(|builder| (IndicatorKey::VolMA(builder.period()), builder.column(series)))
            .collect()
    }
}

/// 당일 거래량 / 직전 `lookback`봉 평균 거래량
///
/// 데이터가 부족하거나 평균이 0이면 0입니다.
pub fn volume_ratio(volumes: &[f64], lookback: usize) -> f64 {
    let Some((current, previous)) = volumes.split_last() else {
        return 0.0;
    };
    if lookback == 0 || previous.is_empty() {
        return 0.0;
    }

    let start = previous.len().saturating_sub(lookback);
    let window = &previous[start..];
    let average = window.iter().sum::<f64>() / window.len() as f64;
    if average > 0.0 { current / average } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_ratio_uses_preceding_bars() {
        let volumes = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 300.0];
        assert!((volume_ratio(&volumes, 5) - 3.0).abs() < 1e-9);
        assert_eq!(volume_ratio(&[0.0, 0.0, 10.0], 5), 0.0);
        assert_eq!(volume_ratio(&[10.0], 5), 0.0);
    }

    #[test]
    fn test_volume_ma_columns() {
        let volume = (1..=20).map(|v| v as f64).collect::<Vec<_>>();
        let series = PriceSeries {
            close: vec![1.0; 20],
            high: vec![1.0; 20],
            low: vec![1.0; 20],
            volume,
        };
        let columns = VolumeMAsBuilder::default().build(&series);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].0, IndicatorKey::VolMA(5));
        assert_eq!(columns[0].1[19], Some(18.0));
        assert_eq!(columns[2].1[19], Some(10.5));
    }
}
