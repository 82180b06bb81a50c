use crate::config::KDJParams;
use crate::indicator::utils::{moving_average, rolling};
use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};

/// RSV를 정의할 수 없을 때 사용하는 중립 값
const NEUTRAL_RSV: f64 = 50.0;

/// 봉 단위 KDJ 계산 결과
#[derive(Debug, Clone, PartialEq)]
pub struct KDJSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
}

/// RSV(Raw Stochastic Value) 계산
///
/// `period`봉 최저가/최고가 기준 종가 위치(0~100). 구간이 채워지지 않았거나
/// 고저 범위가 0이면 50입니다.
pub fn calculate_rsv(series: &PriceSeries, period: usize) -> Vec<f64> {
    let lowest = rolling::rolling_min(&series.low, period);
    let highest = rolling::rolling_max(&series.high, period);

    series
        .close
        .iter()
        .enumerate()
        .map(|(i, close)| match (lowest[i], highest[i]) {
            (Some(low), Some(high)) if high - low != 0.0 => (close - low) / (high - low) * 100.0,
            _ => NEUTRAL_RSV,
        })
        .collect()
}

/// KDJ 계산
///
/// K = EMA(RSV, k_span), D = EMA(K, d_span), J = 3K - 2D
pub fn calculate_kdj(series: &PriceSeries, params: &KDJParams) -> KDJSeries {
    let rsv = calculate_rsv(series, params.period);
    let k = moving_average::ema_series(&rsv, params.k_span);
    let d = moving_average::ema_series(&k, params.d_span);
    let j = k.iter().zip(d.iter()).map(|(k, d)| 3.0 * k - 2.0 * d).collect();

    KDJSeries { k, d, j }
}

/// KDJ 열 빌더
#[derive(Debug, Clone, Copy)]
pub struct KDJBuilder {
    params: KDJParams,
}

impl KDJBuilder {
    pub fn new(params: KDJParams) -> KDJBuilder {
        KDJBuilder { params }
    }
}

impl ColumnBuilder for KDJBuilder {
    fn name(&self) -> &'static str {
        "kdj"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        let kdj = calculate_kdj(series, &self.params);
        vec![
            (IndicatorKey::KdjK, kdj.k.into_iter().map(Some).collect()),
            (IndicatorKey::KdjD, kdj.d.into_iter().map(Some).collect()),
            (IndicatorKey::KdjJ, kdj.j.into_iter().map(Some).collect()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> PriceSeries {
        let volume = vec![1.0; close.len()];
        PriceSeries {
            close,
            high,
            low,
            volume,
        }
    }

    #[test]
    fn test_rsv_warmup_and_flat_range_are_neutral() {
        let flat = series(vec![5.0; 12], vec![5.0; 12], vec![5.0; 12]);
        assert!(calculate_rsv(&flat, 9).iter().all(|v| *v == 50.0));
    }

    #[test]
    fn test_rsv_position_in_range() {
        let close = vec![10.0, 10.0, 12.0];
        let high = vec![11.0, 12.0, 14.0];
        let low = vec![9.0, 9.0, 10.0];
        let rsv = calculate_rsv(&series(high, low, close), 3);
        assert_eq!(rsv[0], 50.0);
        assert_eq!(rsv[1], 50.0);
        // 최저 9, 최고 14 → (12 - 9) / 5 = 60%
        assert!((rsv[2] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_j_identity() {
        let close = (0..30).map(|i| 10.0 + (i as f64 * 0.7).sin()).collect::<Vec<_>>();
        let high = close.iter().map(|c| c + 0.3).collect();
        let low = close.iter().map(|c| c - 0.3).collect();
        let kdj = calculate_kdj(&series(high, low, close), &KDJParams::default());
        for i in 0..30 {
            assert!((kdj.j[i] - (3.0 * kdj.k[i] - 2.0 * kdj.d[i])).abs() < 1e-9);
        }
    }
}
