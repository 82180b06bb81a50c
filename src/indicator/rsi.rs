use crate::indicator::utils::moving_average;
use crate::indicator::{Column, ColumnBuilder, IndicatorKey, PriceSeries};

/// 중립 RSI 값 (이력 부족, 변동 없음)
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI 계산 함수
///
/// 봉별 상승폭/하락폭의 단순 평균으로 계산합니다. 첫 봉은 변화량 0으로 취급합니다.
/// - 하락 평균이 0이고 상승 평균이 양수면 100
/// - 둘 다 0이거나 구간이 채워지지 않았으면 50
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut gains = Vec::with_capacity(values.len());
    let mut losses = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let change = if i == 0 { 0.0 } else { values[i] - values[i - 1] };
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let avg_gains = moving_average::rolling_mean(&gains, period);
    let avg_losses = moving_average::rolling_mean(&losses, period);

    avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|(gain, loss)| match (gain, loss) {
            (Some(gain), Some(loss)) if *loss > 0.0 => {
                let rs = gain / loss;
                100.0 - (100.0 / (1.0 + rs))
            }
            (Some(gain), Some(_)) if *gain > 0.0 => 100.0,
            _ => NEUTRAL_RSI,
        })
        .collect()
}

/// 여러 기간의 RSI 열 빌더
#[derive(Debug)]
pub struct RSIsBuilder {
    periods: Vec<usize>,
}

impl RSIsBuilder {
    pub fn new(periods: &[usize]) -> RSIsBuilder {
        RSIsBuilder {
            periods: periods.to_vec(),
        }
    }
}

impl ColumnBuilder for RSIsBuilder {
    fn name(&self) -> &'static str {
        "rsi"
    }

    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)> {
        self.periods
            .iter()
            .map(|period| {
                let column = calculate_rsi(&series.close, *period)
                    .into_iter()
                    .map(Some)
                    .collect();
                (IndicatorKey::RSI(*period), column)
            })
            .collect()
    }
}
