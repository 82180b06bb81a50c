use crate::analyzer::{
    AnalysisContext, AnalysisStage, BBandAnalyzer, BiasAnalyzer, INSUFFICIENT_DATA, KDJAnalyzer,
    MAAnalyzer, MACDAnalyzer, MomentumAnalyzer, RSIAnalyzer, SignalStrengthAnalyzer,
    SupportResistanceAnalyzer, TrendAnalysisDraft, TrendStatusAnalyzer, VolumeAnalyzer,
    VolumeMAAnalyzer,
};
use crate::candle_store::CandleStore;
use crate::config::{AnalyzerConfig, DEFAULT_CONFIG};
use crate::config_loader::ConfigValidation;
use crate::error::AnalysisResult;
use crate::indicator::{IndicatorFrameBuilder, PriceSeries};
use crate::model::{Candle, RawBar, price_bars_from_records};
use crate::result::TrendAnalysisResult;
use log::{debug, error, info, warn};

/// 일봉 추세 분석기
///
/// 설정은 생성 시 한 번 정해지며, 분석 호출은 입력만으로 결과를 계산합니다.
/// 내부 상태를 변경하지 않으므로 여러 스레드에서 공유할 수 있습니다.
#[derive(Debug)]
pub struct TrendAnalyzer {
    config: AnalyzerConfig,
    indicators: IndicatorFrameBuilder,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        TrendAnalyzer::new(DEFAULT_CONFIG.clone())
    }
}

impl TrendAnalyzer {
    /// 검증 없이 분석기 생성
    ///
    /// 외부에서 받은 설정은 `try_new`로 검증하세요.
    pub fn new(config: AnalyzerConfig) -> TrendAnalyzer {
        let indicators = IndicatorFrameBuilder::from_config(&config);
        TrendAnalyzer { config, indicators }
    }

    /// 설정을 검증한 뒤 분석기 생성
    pub fn try_new(config: AnalyzerConfig) -> AnalysisResult<TrendAnalyzer> {
        if let Err(e) = config.validate() {
            error!("분석기 설정 검증 실패: {}", e);
            return Err(e.into());
        }
        Ok(TrendAnalyzer::new(config))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 일봉 시계열 분석
    ///
    /// 입력 순서와 무관하게 거래일 오름차순으로 정렬한 뒤 분석합니다.
    /// 봉이 `min_bars`보다 적으면 위험 요인 하나만 담긴 기본 결과를 반환합니다.
    pub fn analyze<C: Candle>(&self, code: &str, bars: &[C]) -> TrendAnalysisResult {
        if bars.len() < self.config.min_bars {
            warn!(
                "[{}] 데이터 부족으로 추세 분석 불가: {}개 (최소 {}개)",
                code,
                bars.len(),
                self.config.min_bars
            );
            return TrendAnalysisResult::insufficient(code, INSUFFICIENT_DATA);
        }

        let store = CandleStore::from_slice(bars);
        self.analyze_store(code, &store)
    }

    /// 정렬된 저장소 분석
    pub fn analyze_store<C: Candle>(&self, code: &str, store: &CandleStore<C>) -> TrendAnalysisResult {
        if store.len() < self.config.min_bars {
            warn!("[{}] 데이터 부족으로 추세 분석 불가: {}개", code, store.len());
            return TrendAnalysisResult::insufficient(code, INSUFFICIENT_DATA);
        }

        debug!("[{}] 지표 계산 시작: {}개 봉", code, store.len());
        let series = PriceSeries::from_store(store);
        let frame = self.indicators.build(&series);
        debug!("[{}] 지표 계산 완료: {}개 열", code, frame.keys().len());

        let ctx = AnalysisContext::new(&frame, &series, &self.config);
        let mut draft = TrendAnalysisDraft::new(code);

        MAAnalyzer.run(&ctx, &mut draft);
        TrendStatusAnalyzer.run(&ctx, &mut draft);
        BiasAnalyzer.run(&ctx, &mut draft);
        VolumeAnalyzer.run(&ctx, &mut draft);
        SupportResistanceAnalyzer.run(&ctx, &mut draft);
        MACDAnalyzer.run(&ctx, &mut draft);
        RSIAnalyzer.run(&ctx, &mut draft);
        KDJAnalyzer.run(&ctx, &mut draft);
        BBandAnalyzer.run(&ctx, &mut draft);
        MomentumAnalyzer.run(&ctx, &mut draft);
        VolumeMAAnalyzer.run(&ctx, &mut draft);
        SignalStrengthAnalyzer.run(&ctx, &mut draft);

        let result = draft.finish();
        info!(
            "[{}] 추세 분석 완료: {} / 점수 {} / {}",
            code, result.trend_status, result.signal_score, result.buy_signal
        );
        result
    }

    /// 검증 전 레코드 분석
    ///
    /// 필수 필드가 없거나 가격이 비정상이면 오류를 반환합니다.
    pub fn analyze_records(
        &self,
        code: &str,
        records: Vec<RawBar>,
    ) -> AnalysisResult<TrendAnalysisResult> {
        let bars = price_bars_from_records(records)?;
        Ok(self.analyze(code, &bars))
    }
}

/// 기본 설정으로 종목 하나를 분석하는 편의 함수
pub fn analyze_stock<C: Candle>(code: &str, bars: &[C]) -> TrendAnalysisResult {
    TrendAnalyzer::default().analyze(code, bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_analyzer_is_shareable() {
        assert_send_sync::<TrendAnalyzer>();
    }

    #[test]
    fn test_try_new_accepts_default() {
        let analyzer = TrendAnalyzer::try_new(AnalyzerConfig::default()).unwrap();
        assert_eq!(analyzer.config(), &*DEFAULT_CONFIG);
    }
}
