use crate::config_loader::ConfigError;
use thiserror::Error;

/// 분석 입력 계약 위반 오류
///
/// 데이터 부족은 오류가 아니라 기본값으로 처리되므로, 여기에는 잘못된 입력만 포함됩니다.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{index}번째 봉에 필수 필드 `{field}`가 없습니다")]
    MissingField { index: usize, field: &'static str },

    #[error("{index}번째 봉의 `{field}` 값이 유효하지 않습니다: {value}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 분석 결과 타입
pub type AnalysisResult<T> = Result<T, AnalysisError>;
