// 지표 분류 및 신호 점수 분석기 모듈
// 각 분석기는 분석 단계(AnalysisStage)로 동작하며 정해진 순서로 결과에 반영됩니다.

pub mod base;
pub mod bband_analyzer;
pub mod bias_analyzer;
pub mod kdj_analyzer;
pub mod ma_analyzer;
pub mod macd_analyzer;
pub mod momentum_analyzer;
pub mod rsi_analyzer;
pub mod signal_strength_analyzer;
pub mod support_resistance_analyzer;
pub mod trend_analyzer;
pub mod volume_analyzer;
pub mod volume_ma_analyzer;

pub use base::{AnalysisContext, AnalysisStage, INSUFFICIENT_DATA, TrendAnalysisDraft};
pub use bband_analyzer::{BBandAnalyzer, BollingerPosition};
pub use bias_analyzer::BiasAnalyzer;
pub use kdj_analyzer::{KDJAnalyzer, KDJStatus};
pub use ma_analyzer::MAAnalyzer;
pub use macd_analyzer::{MACDAnalyzer, MACDStatus};
pub use momentum_analyzer::{MomentumAnalyzer, MomentumStatus};
pub use rsi_analyzer::{RSIAnalyzer, RSIStatus};
pub use signal_strength_analyzer::{BuySignal, SignalAssessment, SignalStrengthAnalyzer};
pub use support_resistance_analyzer::SupportResistanceAnalyzer;
pub use trend_analyzer::{TrendStatus, TrendStatusAnalyzer};
pub use volume_analyzer::{VolumeAnalyzer, VolumeStatus};
pub use volume_ma_analyzer::{VolumeMAAnalyzer, VolumeMAStatus};
