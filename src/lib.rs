pub mod analyzer;
pub mod candle_store;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod model;
pub mod report;
pub mod result;

/// 설정 로더
pub mod config_loader;

pub use analyzer::{
    BollingerPosition, BuySignal, KDJStatus, MACDStatus, MomentumStatus, RSIStatus, TrendStatus,
    VolumeMAStatus, VolumeStatus,
};
pub use config::{AnalyzerConfig, DEFAULT_CONFIG};
pub use config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult};
pub use engine::{TrendAnalyzer, analyze_stock};
pub use error::{AnalysisError, AnalysisResult};
pub use model::{Candle, PriceBar, RawBar};
pub use report::format_analysis;
pub use result::TrendAnalysisResult;
