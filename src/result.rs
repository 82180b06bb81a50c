use crate::analyzer::{
    BollingerPosition, BuySignal, KDJStatus, MACDStatus, MomentumStatus, RSIStatus, TrendStatus,
    VolumeMAStatus, VolumeStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 종목 하나에 대한 추세 분석 결과
///
/// 분석이 끝나면 변경되지 않는 값 객체입니다. 수치 필드의 기본값은 0,
/// 상태 필드는 각 열거형의 기본값입니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendAnalysisResult {
    pub code: String,

    // 추세
    pub trend_status: TrendStatus,
    pub ma_alignment: String,
    /// 추세 강도 (0~100)
    pub trend_strength: f64,

    // 이동평균
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub ma250: f64,
    pub current_price: f64,

    // 이격도 (%)
    pub bias_ma5: f64,
    pub bias_ma10: f64,
    pub bias_ma20: f64,
    pub bias_ma60: f64,
    pub bias_ma250: f64,

    // 거래량
    pub volume_status: VolumeStatus,
    /// 당일 거래량 / 직전 5일 평균
    pub volume_ratio_5d: f64,
    pub volume_trend: String,

    // 지지/저항
    pub support_ma5: bool,
    pub support_ma10: bool,
    pub resistance_levels: Vec<f64>,
    pub support_levels: Vec<f64>,

    // MACD
    pub macd_dif: f64,
    pub macd_dea: f64,
    pub macd_bar: f64,
    pub macd_status: MACDStatus,
    pub macd_signal: String,

    // RSI
    pub rsi_6: f64,
    pub rsi_12: f64,
    pub rsi_24: f64,
    pub rsi_status: RSIStatus,
    pub rsi_signal: String,

    // KDJ
    pub kdj_k: f64,
    pub kdj_d: f64,
    pub kdj_j: f64,
    pub kdj_status: KDJStatus,
    pub kdj_signal: String,

    // 볼린저 밴드
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    /// 밴드폭 (%)
    pub bb_width: f64,
    /// 데이터 부족 시 None
    pub bb_status: Option<BollingerPosition>,
    pub bb_position: String,

    // 모멘텀
    pub momentum_5d: f64,
    pub momentum_10d: f64,
    pub momentum_status: MomentumStatus,
    pub momentum_signal: String,

    // 거래량 이동평균
    pub vol_ma5: f64,
    pub vol_ma10: f64,
    pub vol_ma20: f64,
    pub vol_ratio_ma5: f64,
    pub vol_ma_status: VolumeMAStatus,
    pub vol_trend: String,

    // 신호
    pub buy_signal: BuySignal,
    /// 종합 점수 (0~100)
    pub signal_score: u32,
    pub signal_reasons: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl TrendAnalysisResult {
    /// 기본값으로 채운 결과 생성
    pub fn new(code: &str) -> TrendAnalysisResult {
        TrendAnalysisResult {
            code: code.to_string(),
            ..Default::default()
        }
    }

    /// 이력 부족 결과 (위험 요인 하나만 기록)
    pub fn insufficient(code: &str, risk: &str) -> TrendAnalysisResult {
        TrendAnalysisResult {
            risk_factors: vec![risk.to_string()],
            ..TrendAnalysisResult::new(code)
        }
    }

    /// 필드명 → 값의 평면 맵
    ///
    /// 모든 필드를 포함하며 상태 값은 snake_case 태그로 직렬화됩니다.
    pub fn to_flat_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
