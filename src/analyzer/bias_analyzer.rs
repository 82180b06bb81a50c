use crate::analyzer::base::{AnalysisContext, AnalysisStage, percent_from};
use crate::result::TrendAnalysisResult;

/// 현재가의 이동평균 대비 이격도 (%)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BiasSnapshot {
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub ma250: f64,
}

/// 이격도 계산 단계
///
/// 이격도 = (현재가 - MA) / MA × 100, MA가 0 이하이면 0
#[derive(Debug, Default)]
pub struct BiasAnalyzer;

impl AnalysisStage for BiasAnalyzer {
    type Output = BiasSnapshot;

    fn name(&self) -> &'static str {
        "bias"
    }

    fn analyze(&self, _ctx: &AnalysisContext<'_>, current: &TrendAnalysisResult) -> Self::Output {
        let price = current.current_price;
        BiasSnapshot {
            ma5: percent_from(price, current.ma5),
            ma10: percent_from(price, current.ma10),
            ma20: percent_from(price, current.ma20),
            ma60: percent_from(price, current.ma60),
            ma250: percent_from(price, current.ma250),
        }
    }

    fn write(output: Self::Output, result: &mut TrendAnalysisResult) {
        result.bias_ma5 = output.ma5;
        result.bias_ma10 = output.ma10;
        result.bias_ma20 = output.ma20;
        result.bias_ma60 = output.ma60;
        result.bias_ma250 = output.ma250;
    }
}
