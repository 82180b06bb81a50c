use crate::config::MACDParams;
use crate::indicator::utils::moving_average;
use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};

/// MACD(Moving Average Convergence Divergence) 열 빌더
///
/// DIF = EMA(fast) - EMA(slow), DEA = EMA(DIF, signal), BAR = 2 × (DIF - DEA)
///
/// 모든 EMA는 첫 번째 값을 시드로 사용하므로 모든 봉에서 정의됩니다.
#[derive(Debug, Clone, Copy)]
pub struct MACDBuilder {
    params: MACDParams,
}

/// 봉 단위 MACD 계산 결과
#[derive(Debug, Clone, PartialEq)]
pub struct MACDSeries {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub bar: Vec<f64>,
}

/// 종가 배열에서 MACD 계산
pub fn calculate_macd(values: &[f64], params: &MACDParams) -> MACDSeries {
    let fast = moving_average::ema_series(values, params.fast);
    let slow = moving_average::ema_series(values, params.slow);

    let dif = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| f - s)
        .collect::<Vec<_>>();
    let dea = moving_average::ema_series(&dif, params.signal);
    let bar = dif
        .iter()
        .zip(dea.iter())
        .map(|(d, e)| 2.0 * (d - e))
        .collect();

    MACDSeries { dif, dea, bar }
}

impl MACDBuilder {
    pub fn new(params: MACDParams) -> MACDBuilder {
        MACDBuilder { params }
    }
}

fn defined(values: Vec<f64>) -> Column {
    values.into_iter().map(Some).collect()
}

impl ColumnBuilder for MACDBuilder {
    fn name(&self) -> &'static str {
        "macd"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        let macd = calculate_macd(&series.close, &self.params);
        vec![
            (IndicatorKey::MacdDif, defined(macd.dif)),
            (IndicatorKey::MacdDea, defined(macd.dea)),
            (IndicatorKey::MacdBar, defined(macd.bar)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_series_has_zero_histogram() {
        let macd = calculate_macd(&[12.5; 60], &MACDParams::default());
        assert!(macd.dif.iter().all(|v| v.abs() < 1e-9));
        assert!(macd.bar.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn test_rising_series_has_positive_dif() {
        let closes = (0..60).map(|i| 10.0 + i as f64 * 0.2).collect::<Vec<_>>();
        let macd = calculate_macd(&closes, &MACDParams::default());
        assert_eq!(macd.dif.len(), 60);
        assert_eq!(macd.dif[0], 0.0);
        assert!(macd.dif[59] > 0.0);
        assert!(macd.dea[59] > 0.0);
    }

    #[test]
    fn test_bar_is_twice_the_gap() {
        let closes = [10.0, 11.0, 10.5, 12.0, 11.5, 13.0];
        let macd = calculate_macd(&closes, &MACDParams::default());
        for i in 0..closes.len() {
            assert!((macd.bar[i] - 2.0 * (macd.dif[i] - macd.dea[i])).abs() < 1e-12);
        }
    }
}
