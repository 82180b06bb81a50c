use common_test_utils::*;

use trend_analyzer::Candle;
use trend_analyzer::candle_store::CandleStore;

#[test]
fn test_new_empty_store() {
    let store = CandleStore::<TestCandle>::new(Vec::new());
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.last().is_none());
}

#[test]
fn test_new_with_items_sorted_ascending() {
    let candles = vec![
        TestCandle::new(1, 100.0, 105.0, 95.0, 102.0, 1000.0),
        TestCandle::new(3, 110.0, 115.0, 105.0, 112.0, 1000.0),
        TestCandle::new(2, 105.0, 110.0, 100.0, 107.0, 1000.0),
    ];

    let store = CandleStore::new(candles);

    assert_eq!(store.len(), 3);
    assert_eq!(store.items()[0].trade_date(), date_of(1));
    assert_eq!(store.last().unwrap().trade_date(), date_of(3));
    assert_eq!(store.closes(), vec![102.0, 107.0, 112.0]);
}

#[test]
fn test_duplicate_dates_keep_input_order() {
    let candles = vec![
        TestCandle::new(2, 100.0, 101.0, 99.0, 1.0, 10.0),
        TestCandle::new(1, 100.0, 101.0, 99.0, 2.0, 10.0),
        TestCandle::new(2, 100.0, 101.0, 99.0, 3.0, 10.0),
    ];

    let store = CandleStore::new(candles);
    assert_eq!(store.closes(), vec![2.0, 1.0, 3.0]);
}

#[test]
fn test_from_end_and_tail() {
    let store = CandleStore::from_slice(&create_uptrend_bars(10, 100.0, 1.0));

    assert_eq!(store.from_end(0).unwrap().close, 109.5);
    assert_eq!(store.from_end(9).unwrap().close, 100.5);
    assert!(store.from_end(10).is_none());

    assert_eq!(store.tail(3).len(), 3);
    assert_eq!(store.tail(3)[0].close, 107.5);
    assert_eq!(store.tail(50).len(), 10);
}

#[test]
fn test_column_accessors() {
    let store = CandleStore::from_slice(&create_flat_bars(4, 50.0));
    assert_eq!(store.highs(), vec![50.0; 4]);
    assert_eq!(store.lows(), vec![50.0; 4]);
    assert_eq!(store.volumes(), vec![1000.0; 4]);
}
