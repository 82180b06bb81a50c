use crate::config::AnalyzerConfig;
use crate::indicator::{IndicatorFrame, IndicatorKey, PriceSeries};
use crate::result::TrendAnalysisResult;
use log::debug;

/// 이력이 부족할 때 설명 필드에 기록하는 문구
pub const INSUFFICIENT_DATA: &str = "insufficient data";

/// 분석 단계가 읽는 입력 묶음
///
/// 지표 프레임과 원본 가격 배열, 설정을 함께 전달합니다. 모두 읽기 전용입니다.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub frame: &'a IndicatorFrame,
    pub series: &'a PriceSeries,
    pub config: &'a AnalyzerConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        frame: &'a IndicatorFrame,
        series: &'a PriceSeries,
        config: &'a AnalyzerConfig,
    ) -> AnalysisContext<'a> {
        AnalysisContext {
            frame,
            series,
            config,
        }
    }

    /// 봉 개수
    pub fn bars(&self) -> usize {
        self.series.len()
    }

    /// 최신 봉에서 `offset`만큼 이전 봉의 지표 값 (정의되지 않았으면 0)
    pub fn value_or_zero(&self, key: IndicatorKey, offset: usize) -> f64 {
        self.frame.value_from_end(key, offset).unwrap_or(0.0)
    }

    /// 최신 봉의 지표 값 (정의되지 않았으면 0)
    pub fn latest_or_zero(&self, key: IndicatorKey) -> f64 {
        self.value_or_zero(key, 0)
    }

    /// 최신 종가
    pub fn latest_close(&self) -> f64 {
        self.series.close.last().copied().unwrap_or(0.0)
    }

    /// 최신 거래량
    pub fn latest_volume(&self) -> f64 {
        self.series.volume.last().copied().unwrap_or(0.0)
    }
}

/// 분석 결과 누적기
///
/// 각 단계의 갱신 내용을 순서대로 적용하고, 적용된 단계 이름을 기록합니다.
#[derive(Debug, Clone)]
pub struct TrendAnalysisDraft {
    result: TrendAnalysisResult,
    applied: Vec<&'static str>,
}

impl TrendAnalysisDraft {
    pub fn new(code: &str) -> TrendAnalysisDraft {
        TrendAnalysisDraft {
            result: TrendAnalysisResult::new(code),
            applied: Vec::new(),
        }
    }

    /// 지금까지 누적된 결과
    pub fn result(&self) -> &TrendAnalysisResult {
        &self.result
    }

    /// 단계 갱신 적용
    pub fn update(&mut self, stage: &'static str, apply: impl FnOnce(&mut TrendAnalysisResult)) {
        apply(&mut self.result);
        self.applied.push(stage);
    }

    /// 적용된 단계 이름 (적용 순서)
    pub fn applied_stages(&self) -> &[&'static str] {
        &self.applied
    }

    /// 누적을 마치고 최종 결과 반환
    pub fn finish(self) -> TrendAnalysisResult {
        self.result
    }
}

/// 분석 단계 인터페이스
///
/// `analyze`는 입력과 현재까지의 결과만 읽어 갱신 내용을 만들고,
/// `write`가 그 내용을 결과에 반영합니다.
pub trait AnalysisStage {
    /// 이 단계가 만드는 갱신 내용
    type Output;

    /// 로그와 단계 기록에 쓰는 이름
    fn name(&self) -> &'static str;

    fn analyze(&self, ctx: &AnalysisContext<'_>, current: &TrendAnalysisResult) -> Self::Output;

    fn write(output: Self::Output, result: &mut TrendAnalysisResult);

    /// 분석 후 누적기에 반영
    fn run(&self, ctx: &AnalysisContext<'_>, draft: &mut TrendAnalysisDraft) {
        let output = self.analyze(ctx, draft.result());
        debug!("[{}] 분석 단계 적용: {}", draft.result().code, self.name());
        draft.update(self.name(), |result| Self::write(output, result));
    }
}

/// 두 값의 비율 (%) - 기준값이 0 이하면 0
pub fn percent_from(value: f64, base: f64) -> f64 {
    if base > 0.0 {
        (value - base) / base * 100.0
    } else {
        0.0
    }
}
