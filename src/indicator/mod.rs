// 일봉 시계열에서 봉 단위 기술적 지표 열(column)을 계산하는 모듈
// 각 계산기는 순수 함수이며 입력을 변경하지 않습니다.

pub mod bband;
pub mod kdj;
pub mod ma;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod utils;
pub mod volume;

use crate::candle_store::CandleStore;
use crate::config::AnalyzerConfig;
use crate::model::Candle;
use log::trace;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// 봉 단위 지표 값. `None`은 이력이 부족해 정의되지 않은 값입니다 (0과 구분).
pub type Column = Vec<Option<f64>>;

/// 지표 열 이름
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorKey {
    /// 종가 단순이동평균 (기간)
    MA(usize),
    MacdDif,
    MacdDea,
    MacdBar,
    /// RSI (기간)
    RSI(usize),
    KdjK,
    KdjD,
    KdjJ,
    BBUpper,
    BBMiddle,
    BBLower,
    /// n일 모멘텀 (%)
    Momentum(usize),
    /// 거래량 이동평균 (기간)
    VolMA(usize),
}

impl Display for IndicatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorKey::MA(period) => write!(f, "MA{}", period),
            IndicatorKey::MacdDif => write!(f, "MACD_DIF"),
            IndicatorKey::MacdDea => write!(f, "MACD_DEA"),
            IndicatorKey::MacdBar => write!(f, "MACD_BAR"),
            IndicatorKey::RSI(period) => write!(f, "RSI_{}", period),
            IndicatorKey::KdjK => write!(f, "KDJ_K"),
            IndicatorKey::KdjD => write!(f, "KDJ_D"),
            IndicatorKey::KdjJ => write!(f, "KDJ_J"),
            IndicatorKey::BBUpper => write!(f, "BB_UPPER"),
            IndicatorKey::BBMiddle => write!(f, "BB_MIDDLE"),
            IndicatorKey::BBLower => write!(f, "BB_LOWER"),
            IndicatorKey::Momentum(period) => write!(f, "MOMENTUM_{}D", period),
            IndicatorKey::VolMA(period) => write!(f, "VOL_MA{}", period),
        }
    }
}

/// 순서가 유지되는 키-값 컬렉션
///
/// 지표 열 집합과, 정배열/역배열 판정을 위한 최신 값 묶음에 함께 쓰입니다.
#[derive(Debug, Clone)]
pub struct TAs<K, T>
where
    K: PartialEq + Eq + Hash + Debug,
{
    /// 이 컬렉션의 이름
    name: String,
    /// 순서가 유지되는 키 목록
    keys: Vec<K>,
    data: HashMap<K, T>,
}

impl<K, T> Display for TAs<K, T>
where
    K: PartialEq + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TAs({}, {} keys)", self.name, self.keys.len())
    }
}

/// 값들의 배열 정렬 여부를 확인하는 내부 함수
fn is_arrangement(values: Vec<f64>, init: f64, cmp: impl Fn(f64, f64) -> bool) -> bool {
    let mut prev = init;
    for value in values {
        if !cmp(value, prev) {
            return false;
        }
        prev = value;
    }

    true
}

/// 값들이 엄격한 내림차순인지 확인 (단기 > 중기 > 장기 = 정배열)
fn is_regular_arrangement(values: Vec<f64>) -> bool {
    is_arrangement(values, f64::MAX, |current, prev| current < prev)
}

/// 값들이 엄격한 오름차순인지 확인 (역배열)
fn is_reverse_arrangement(values: Vec<f64>) -> bool {
    is_arrangement(values, f64::MIN, |current, prev| current > prev)
}

impl<K, T> TAs<K, T>
where
    K: PartialEq + Eq + Hash + Clone + Debug,
{
    pub fn new(name: &str) -> TAs<K, T> {
        TAs {
            name: name.to_owned(),
            keys: Vec::new(),
            data: HashMap::new(),
        }
    }

    /// 값을 추가합니다. 같은 키가 있으면 위치는 유지하고 값만 교체합니다.
    pub fn insert(&mut self, key: K, value: T) {
        if self.data.insert(key.clone(), value).is_none() {
            self.keys.push(key);
        }
    }

    pub fn get_keys(&self) -> &[K] {
        &self.keys
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        self.data.get(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// 키 순서대로 모든 값 참조 반환
    pub fn get_all(&self) -> Vec<&T> {
        self.keys
            .iter()
            .filter_map(|key| self.data.get(key))
            .collect()
    }

    /// 키 순서대로 값이 엄격하게 내려가는지 확인
    pub fn is_regular_arrangement(&self, get_value: impl Fn(&T) -> f64) -> bool {
        let values = self.get_all().into_iter().map(get_value).collect::<Vec<_>>();
        is_regular_arrangement(values)
    }

    /// 키 순서대로 값이 엄격하게 올라가는지 확인
    pub fn is_reverse_arrangement(&self, get_value: impl Fn(&T) -> f64) -> bool {
        let values = self.get_all().into_iter().map(get_value).collect::<Vec<_>>();
        is_reverse_arrangement(values)
    }
}

/// 지표 계산 입력: 저장소에서 한 번 추출한 가격/거래량 배열
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub close: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub volume: Vec<f64>,
}

impl PriceSeries {
    pub fn from_store<C: Candle>(store: &CandleStore<C>) -> PriceSeries {
        PriceSeries {
            close: store.closes(),
            high: store.highs(),
            low: store.lows(),
            volume: store.volumes(),
        }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

/// 봉 단위 지표 열 집합
///
/// `with_columns`는 기존 프레임을 소비하고 열이 추가된 새 프레임을 반환합니다.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    len: usize,
    columns: TAs<IndicatorKey, Column>,
}

impl IndicatorFrame {
    pub fn new(len: usize) -> IndicatorFrame {
        IndicatorFrame {
            len,
            columns: TAs::new("indicators"),
        }
    }

    /// 열을 추가한 새 프레임 반환
    pub fn with_columns(mut self, columns: Vec<(IndicatorKey, Column)>) -> IndicatorFrame {
        for (key, column) in columns {
            debug_assert_eq!(column.len(), self.len, "{} 열 길이 불일치", key);
            trace!("지표 열 추가: {}", key);
            self.columns.insert(key, column);
        }
        self
    }

    /// 봉 개수
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn keys(&self) -> &[IndicatorKey] {
        self.columns.get_keys()
    }

    pub fn column(&self, key: IndicatorKey) -> Option<&Column> {
        self.columns.get(&key)
    }

    /// 특정 봉의 지표 값
    pub fn value(&self, key: IndicatorKey, index: usize) -> Option<f64> {
        self.column(key)
            .and_then(|column| column.get(index).copied().flatten())
    }

    /// 최신 봉에서 `offset`만큼 이전 봉의 지표 값
    pub fn value_from_end(&self, key: IndicatorKey, offset: usize) -> Option<f64> {
        self.len
            .checked_sub(offset + 1)
            .and_then(|index| self.value(key, index))
    }

    /// 최신 봉의 지표 값
    pub fn latest(&self, key: IndicatorKey) -> Option<f64> {
        self.value_from_end(key, 0)
    }

    /// 최신 봉의 여러 지표 값을 키 순서대로 묶습니다 (정의되지 않은 값은 제외).
    pub fn latest_set(&self, name: &str, keys: &[IndicatorKey]) -> TAs<IndicatorKey, f64> {
        let mut set = TAs::new(name);
        for key in keys {
            if let Some(value) = self.latest(*key) {
                set.insert(*key, value);
            }
        }
        set
    }
}

/// 지표 열 계산 인터페이스
pub trait ColumnBuilder: Debug + Send + Sync {
    /// 로그용 이름
    fn name(&self) -> &'static str;

    /// 전체 시계열에서 지표 열을 계산
    fn build(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Column)>;
}

/// 설정에 따라 모든 지표 열을 계산하는 빌더
#[derive(Debug)]
pub struct IndicatorFrameBuilder {
    builders: Vec<Box<dyn ColumnBuilder>>,
}

impl IndicatorFrameBuilder {
    /// 설정값으로 기본 지표 빌더 묶음을 구성합니다.
    pub fn from_config(config: &AnalyzerConfig) -> IndicatorFrameBuilder {
        IndicatorFrameBuilder {
            builders: vec![
                Box::new(ma::MAsBuilder::default()),
                Box::new(macd::MACDBuilder::new(config.macd)),
                Box::new(rsi::RSIsBuilder::new(&[
                    config.rsi.short,
                    config.rsi.mid,
                    config.rsi.long,
                ])),
                Box::new(kdj::KDJBuilder::new(config.kdj)),
                Box::new(bband::BollingerBandsBuilder::new(config.bband)),
                Box::new(momentum::MomentumBuilder::new(&[
                    config.momentum.short,
                    config.momentum.long,
                ])),
                Box::new(volume::VolumeMAsBuilder::default()),
            ],
        }
    }

    /// 빌더를 순서대로 적용하여 지표 프레임 생성
    pub fn build(&self, series: &PriceSeries) -> IndicatorFrame {
        self.builders
            .iter()
            .fold(IndicatorFrame::new(series.len()), |frame, builder| {
                trace!("지표 계산: {}", builder.name());
                frame.with_columns(builder.build(series))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_regular_arrangement() {
        assert!(is_regular_arrangement(vec![3.0, 2.0, 1.0]));
        assert!(!is_regular_arrangement(vec![1.0, 2.0, 3.0]));
        assert!(!is_regular_arrangement(vec![3.0, 1.0, 2.0]));
        assert!(!is_regular_arrangement(vec![3.0, 2.0, 2.0]));
        assert!(is_regular_arrangement(vec![]));
    }

    #[test]
    fn test_is_reverse_arrangement() {
        assert!(is_reverse_arrangement(vec![1.0, 2.0, 3.0]));
        assert!(!is_reverse_arrangement(vec![3.0, 2.0, 1.0]));
        assert!(!is_reverse_arrangement(vec![1.0, 2.0, 2.0]));
        assert!(is_reverse_arrangement(vec![]));
    }

    #[test]
    fn test_tas_insert_keeps_order_and_replaces() {
        let mut tas = TAs::new("test");
        tas.insert(5, 3.0);
        tas.insert(10, 2.0);
        tas.insert(20, 1.0);
        assert!(tas.is_regular_arrangement(|value| *value));

        tas.insert(10, 4.0);
        assert_eq!(tas.get_keys(), &[5, 10, 20]);
        assert!(!tas.is_regular_arrangement(|value| *value));
    }

    #[test]
    fn test_frame_lookup_distinguishes_undefined() {
        let frame = IndicatorFrame::new(3)
            .with_columns(vec![(IndicatorKey::MA(2), vec![None, Some(1.5), Some(0.0)])]);

        assert_eq!(frame.value(IndicatorKey::MA(2), 0), None);
        assert_eq!(frame.latest(IndicatorKey::MA(2)), Some(0.0));
        assert_eq!(frame.value_from_end(IndicatorKey::MA(2), 1), Some(1.5));
        assert_eq!(frame.value_from_end(IndicatorKey::MA(2), 3), None);
        assert_eq!(frame.latest(IndicatorKey::MA(5)), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(IndicatorKey::MA(250).to_string(), "MA250");
        assert_eq!(IndicatorKey::RSI(12).to_string(), "RSI_12");
        assert_eq!(IndicatorKey::Momentum(5).to_string(), "MOMENTUM_5D");
        assert_eq!(IndicatorKey::VolMA(20).to_string(), "VOL_MA20");
    }
}
