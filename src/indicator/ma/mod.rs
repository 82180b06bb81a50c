pub mod sma;

use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};
use sma::{PriceSource, SMABuilder};

/// 종가 이동평균 기간
pub const MA_PERIODS: [usize; 5] = [5, 10, 20, 60, 250];

/// 이력이 부족할 때 대신 사용할 짧은 이동평균 (기간, 대체 기간)
const MA_FALLBACKS: [(usize, usize); 2] = [(60, 20), (250, 60)];

/// 종가 이동평균 열 빌더
///
/// 장기 이동평균은 시계열이 기간보다 짧으면 바로 아래 기간의 열을 그대로 사용합니다.
/// (MA60 ← MA20, MA250 ← MA60)
#[derive(Debug)]
pub struct MAsBuilder {
    builders: Vec<SMABuilder>,
}

impl Default for MAsBuilder {
    fn default() -> Self {
        MAsBuilder::new(&MA_PERIODS)
    }
}

impl MAsBuilder {
    /// # Panics
    /// * 기간이 오름차순이 아니면 패닉 발생
    pub fn new(periods: &[usize]) -> MAsBuilder {
        for i in 1..periods.len() {
            if periods[i] <= periods[i - 1] {
                panic!(
                    "이동평균 기간은 오름차순으로 정렬되어야 합니다: {:?}",
                    periods
                );
            }
        }

        MAsBuilder {
            builders: periods
                .iter()
                .map(|period| SMABuilder::new(*period, PriceSource::Close))
                .collect(),
        }
    }

    fn fallback_of(period: usize) -> Option<usize> {
        MA_FALLBACKS
            .iter()
            .find(|(long, _)| *long == period)
            .map(|(_, short)| *short)
    }
}

impl ColumnBuilder for MAsBuilder {
    fn name(&self) -> &'static str {
        "ma"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        let mut columns: Vec<(IndicatorKey, Column)> = Vec::with_capacity(self.builders.len());

        for builder in &self.builders {
            let period = builder.period();
            let substitute = if builder.is_defined_for(series) {
                None
            } else {
                Self::fallback_of(period).and_then(|short| {
                    columns
                        .iter()
                        .find(|(key, _)| *key == IndicatorKey::MA(short))
                        .map(|(_, column)| column.clone())
                })
            };

            let column = substitute.unwrap_or_else(|| builder.column(series));
            columns.push((IndicatorKey::MA(period), column));
        }

        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(closes: Vec<f64>) -> PriceSeries {
        PriceSeries {
            high: closes.clone(),
            low: closes.clone(),
            volume: vec![1.0; closes.len()],
            close: closes,
        }
    }

    fn column_of(columns: &[(IndicatorKey, Column)], key: IndicatorKey) -> Column {
        columns
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| c.clone())
            .unwrap()
    }

    #[test]
    fn test_short_series_uses_fallback_columns() {
        let closes = (1..=30).map(|v| v as f64).collect::<Vec<_>>();
        let columns = MAsBuilder::default().build(&series(closes));

        let ma20 = column_of(&columns, IndicatorKey::MA(20));
        assert_eq!(column_of(&columns, IndicatorKey::MA(60)), ma20);
        assert_eq!(column_of(&columns, IndicatorKey::MA(250)), ma20);
        assert_eq!(ma20[29], Some(20.5));
    }

    #[test]
    fn test_long_series_computes_own_columns() {
        let closes = (1..=100).map(|v| v as f64).collect::<Vec<_>>();
        let columns = MAsBuilder::default().build(&series(closes));

        let ma60 = column_of(&columns, IndicatorKey::MA(60));
        assert_eq!(ma60[58], None);
        assert_eq!(ma60[99], Some(70.5));
        assert_eq!(column_of(&columns, IndicatorKey::MA(250)), ma60);
        assert_eq!(column_of(&columns, IndicatorKey::MA(5))[99], Some(98.0));
    }

    #[test]
    #[should_panic]
    fn test_unsorted_periods_panic() {
        MAsBuilder::new(&[20, 5]);
    }
}
