use crate::model::Candle;

/// 분석 대상 일봉 저장소
///
/// 데이터는 거래일 기준 오름차순으로 정렬되어 저장됩니다 (가장 오래된 데이터가 먼저 옴).
/// 같은 날짜가 여러 번 들어와도 제거하지 않으며, 입력 순서를 유지합니다.
#[derive(Debug, Clone)]
pub struct CandleStore<T: Candle> {
    items: Vec<T>,
}

impl<T> CandleStore<T>
where
    T: Candle,
{
    /// 새로운 CandleStore 인스턴스를 생성합니다.
    ///
    /// 입력이 이미 정렬되어 있어도 다시 정렬합니다 (안정 정렬).
    pub fn new(mut items: Vec<T>) -> CandleStore<T> {
        items.sort_by_key(|item| item.trade_date());
        CandleStore { items }
    }

    /// 슬라이스를 복사하여 저장소를 생성합니다.
    pub fn from_slice(items: &[T]) -> CandleStore<T> {
        Self::new(items.to_vec())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 가장 최근 봉
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// 최근 봉에서 `offset`만큼 이전의 봉 (0이면 최신 봉)
    pub fn from_end(&self, offset: usize) -> Option<&T> {
        self.items
            .len()
            .checked_sub(offset + 1)
            .and_then(|index| self.items.get(index))
    }

    /// 시간 순서로 정렬된 봉 슬라이스
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 최근 n개 봉 (데이터가 부족하면 전체)
    pub fn tail(&self, n: usize) -> &[T] {
        let start = self.items.len().saturating_sub(n);
        &self.items[start..]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.close_price()).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.high_price()).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.low_price()).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.volume()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceBar;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> PriceBar {
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        PriceBar::new(date, close, close, close, close, 100)
    }

    #[test]
    fn test_store_sorts_ascending() {
        let store = CandleStore::new(vec![bar(3, 3.0), bar(1, 1.0), bar(2, 2.0)]);
        assert_eq!(store.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(store.last().map(|b| b.close), Some(3.0));
    }

    #[test]
    fn test_from_end_and_tail() {
        let store = CandleStore::new(vec![bar(1, 1.0), bar(2, 2.0), bar(3, 3.0)]);
        assert_eq!(store.from_end(0).map(|b| b.close), Some(3.0));
        assert_eq!(store.from_end(2).map(|b| b.close), Some(1.0));
        assert!(store.from_end(3).is_none());
        assert_eq!(store.tail(2).len(), 2);
        assert_eq!(store.tail(10).len(), 3);
    }

    #[test]
    fn test_duplicate_dates_keep_input_order() {
        let store = CandleStore::new(vec![bar(2, 5.0), bar(1, 1.0), bar(2, 6.0)]);
        assert_eq!(store.closes(), vec![1.0, 5.0, 6.0]);
    }
}
