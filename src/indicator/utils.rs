use crate::indicator::Column;

/// 공통 이동평균 계산 함수들
pub mod moving_average {
    use super::Column;

    /// 지수이동평균(EMA) 계산을 위한 알파값 계산
    ///
    /// # Arguments
    /// * `span` - EMA span
    ///
    /// # Returns
    /// * `f64` - 알파값 (평활화 계수)
    pub fn calculate_ema_alpha(span: usize) -> f64 {
        2.0 / (span + 1) as f64
    }

    /// 지수이동평균(EMA) 한 스텝 계산
    pub fn calculate_ema_step(current_price: f64, previous_ema: f64, alpha: f64) -> f64 {
        alpha * current_price + (1.0 - alpha) * previous_ema
    }

    /// 봉 단위 단순이동평균 열
    ///
    /// 처음 `period - 1`개 봉은 정의되지 않습니다.
    pub fn rolling_mean(values: &[f64], period: usize) -> Column {
        let mut column = vec![None; values.len()];
        if period == 0 || values.len() < period {
            return column;
        }

        for (offset, window) in values.windows(period).enumerate() {
            column[offset + period - 1] = Some(window.iter().sum::<f64>() / period as f64);
        }
        column
    }

    /// 봉 단위 지수이동평균 열
    ///
    /// 첫 번째 값을 시드로 사용하고, 이후 `alpha = 2 / (span + 1)`로 재귀 평활합니다.
    /// 모든 봉에서 정의됩니다.
    pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
        let alpha = calculate_ema_alpha(span);
        let mut result = Vec::with_capacity(values.len());
        let mut previous: Option<f64> = None;

        for value in values {
            let ema = match previous {
                Some(prev) => calculate_ema_step(*value, prev, alpha),
                None => *value,
            };
            result.push(ema);
            previous = Some(ema);
        }
        result
    }
}

/// 구간 통계 함수들
pub mod rolling {
    use super::Column;

    fn rolling_apply(values: &[f64], period: usize, apply: impl Fn(&[f64]) -> f64) -> Column {
        let mut column = vec![None; values.len()];
        if period == 0 || values.len() < period {
            return column;
        }

        for (offset, window) in values.windows(period).enumerate() {
            column[offset + period - 1] = Some(apply(window));
        }
        column
    }

    /// 구간 최저값
    pub fn rolling_min(values: &[f64], period: usize) -> Column {
        rolling_apply(values, period, |window| {
            window.iter().copied().fold(f64::INFINITY, f64::min)
        })
    }

    /// 구간 최고값
    pub fn rolling_max(values: &[f64], period: usize) -> Column {
        rolling_apply(values, period, |window| {
            window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        })
    }

    /// 구간 표본 표준편차 (n - 1로 나눔)
    ///
    /// 구간 길이가 1이면 정의되지 않습니다.
    pub fn rolling_std(values: &[f64], period: usize) -> Column {
        if period < 2 {
            return vec![None; values.len()];
        }

        rolling_apply(values, period, |window| {
            let n = window.len() as f64;
            let mean = window.iter().sum::<f64>() / n;
            let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        })
    }
}

/// n봉 전 대비 변화율(%)
///
/// 이전 값이 0이면 정의되지 않습니다.
pub fn percent_change(values: &[f64], periods: usize) -> Column {
    values
        .iter()
        .enumerate()
        .map(|(index, current)| {
            let previous = *values.get(index.checked_sub(periods)?)?;
            if periods == 0 || previous == 0.0 {
                return None;
            }
            Some((current / previous - 1.0) * 100.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::moving_average::*;
    use super::rolling::*;
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_rolling_mean_warmup() {
        let column = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(column[0], None);
        assert_eq!(column[1], None);
        assert_close(column[2].unwrap(), 2.0);
        assert_close(column[3].unwrap(), 3.0);

        assert!(rolling_mean(&[1.0, 2.0], 3).iter().all(Option::is_none));
    }

    #[test]
    fn test_ema_series_is_seeded_with_first_value() {
        let ema = ema_series(&[10.0, 20.0, 20.0], 3);
        // alpha = 0.5
        assert_close(ema[0], 10.0);
        assert_close(ema[1], 15.0);
        assert_close(ema[2], 17.5);
    }

    #[test]
    fn test_rolling_min_max() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let mins = rolling_min(&values, 3);
        let maxs = rolling_max(&values, 3);
        assert_eq!(mins, vec![None, None, Some(1.0), Some(1.0), Some(1.0)]);
        assert_eq!(maxs, vec![None, None, Some(4.0), Some(4.0), Some(5.0)]);
    }

    #[test]
    fn test_rolling_std_uses_sample_variance() {
        let column = rolling_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        // 표본 분산 = 32 / 7
        assert_close(column[7].unwrap(), (32.0_f64 / 7.0).sqrt());
        assert!(column[6].is_none());
    }

    #[test]
    fn test_percent_change() {
        let column = percent_change(&[100.0, 110.0, 99.0], 1);
        assert_eq!(column[0], None);
        assert_close(column[1].unwrap(), 10.0);
        assert_close(column[2].unwrap(), -10.0);

        assert_eq!(percent_change(&[0.0, 1.0], 1)[1], None);
    }
}
