use crate::error::{AnalysisError, AnalysisResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// 일봉 데이터 접근 인터페이스
///
/// 분석기는 이 트레이트만 요구하므로 호출자는 자신의 봉 타입을 그대로 넘길 수 있습니다.
pub trait Candle: Clone + Debug + Display {
    /// 거래일
    fn trade_date(&self) -> NaiveDate;
    fn open_price(&self) -> f64;
    fn high_price(&self) -> f64;
    fn low_price(&self) -> f64;
    fn close_price(&self) -> f64;
    /// 거래량
    fn volume(&self) -> f64;
}

/// 하루치 OHLCV 봉
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl Display for PriceBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PriceBar({}: o={}, h={}, l={}, c={}, v={})",
            self.date, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

impl Candle for PriceBar {
    fn trade_date(&self) -> NaiveDate {
        self.date
    }
    fn open_price(&self) -> f64 {
        self.open
    }
    fn high_price(&self) -> f64 {
        self.high
    }
    fn low_price(&self) -> f64 {
        self.low
    }
    fn close_price(&self) -> f64 {
        self.close
    }
    fn volume(&self) -> f64 {
        self.volume as f64
    }
}

/// 외부에서 받은 검증 전 레코드
///
/// 모든 필드가 선택적이며, `PriceBar`로 변환할 때 누락/비정상 값을 검사합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: Option<NaiveDate>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

fn require<T>(value: Option<T>, index: usize, field: &'static str) -> AnalysisResult<T> {
    value.ok_or(AnalysisError::MissingField { index, field })
}

fn require_price(value: Option<f64>, index: usize, field: &'static str) -> AnalysisResult<f64> {
    let price = require(value, index, field)?;
    if !price.is_finite() || price <= 0.0 {
        return Err(AnalysisError::InvalidValue {
            index,
            field,
            value: price,
        });
    }
    Ok(price)
}

impl RawBar {
    /// 레코드를 검증하여 `PriceBar`로 변환
    ///
    /// # Arguments
    /// * `index` - 오류 메시지에 사용할 입력 내 위치
    pub fn into_price_bar(self, index: usize) -> AnalysisResult<PriceBar> {
        Ok(PriceBar {
            date: require(self.date, index, "date")?,
            open: require_price(self.open, index, "open")?,
            high: require_price(self.high, index, "high")?,
            low: require_price(self.low, index, "low")?,
            close: require_price(self.close, index, "close")?,
            volume: require(self.volume, index, "volume")?,
        })
    }
}

impl TryFrom<RawBar> for PriceBar {
    type Error = AnalysisError;

    fn try_from(record: RawBar) -> AnalysisResult<PriceBar> {
        record.into_price_bar(0)
    }
}

/// 레코드 목록 전체를 변환합니다. 첫 번째 오류에서 중단합니다.
pub fn price_bars_from_records(records: Vec<RawBar>) -> AnalysisResult<Vec<PriceBar>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_price_bar(index))
        .collect()
}
