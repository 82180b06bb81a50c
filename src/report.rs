use crate::result::TrendAnalysisResult;
use std::fmt::{self, Display};

/// 분석 결과를 사람이 읽는 텍스트 보고서로 변환
pub fn format_analysis(result: &TrendAnalysisResult) -> String {
    result.to_string()
}

impl Display for TrendAnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} trend analysis ===", self.code)?;
        writeln!(f)?;
        writeln!(f, "Trend: {}", self.trend_status)?;
        writeln!(f, "   alignment: {}", self.ma_alignment)?;
        writeln!(f, "   strength: {}/100", self.trend_strength)?;
        writeln!(f)?;
        writeln!(f, "Moving averages:")?;
        writeln!(f, "   price: {:.2}", self.current_price)?;
        writeln!(f, "   MA5:  {:.2} (bias {:+.2}%)", self.ma5, self.bias_ma5)?;
        writeln!(f, "   MA10: {:.2} (bias {:+.2}%)", self.ma10, self.bias_ma10)?;
        writeln!(f, "   MA20: {:.2} (bias {:+.2}%)", self.ma20, self.bias_ma20)?;
        writeln!(f)?;
        writeln!(f, "Volume: {}", self.volume_status)?;
        writeln!(f, "   ratio (vs 5d): {:.2}", self.volume_ratio_5d)?;
        writeln!(f, "   trend: {}", self.volume_trend)?;
        writeln!(f)?;
        writeln!(f, "MACD: {}", self.macd_status)?;
        writeln!(f, "   DIF: {:.4}", self.macd_dif)?;
        writeln!(f, "   DEA: {:.4}", self.macd_dea)?;
        writeln!(f, "   MACD: {:.4}", self.macd_bar)?;
        writeln!(f, "   signal: {}", self.macd_signal)?;
        writeln!(f)?;
        writeln!(f, "RSI: {}", self.rsi_status)?;
        writeln!(f, "   RSI(6): {:.1}", self.rsi_6)?;
        writeln!(f, "   RSI(12): {:.1}", self.rsi_12)?;
        writeln!(f, "   RSI(24): {:.1}", self.rsi_24)?;
        writeln!(f, "   signal: {}", self.rsi_signal)?;
        writeln!(f)?;
        writeln!(f, "Action: {}", self.buy_signal)?;
        write!(f, "   score: {}/100", self.signal_score)?;

        if !self.signal_reasons.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Reasons:")?;
            for reason in &self.signal_reasons {
                write!(f, "\n   {}", reason)?;
            }
        }

        if !self.risk_factors.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Risks:")?;
            for risk in &self.risk_factors {
                write!(f, "\n   {}", risk)?;
            }
        }

        Ok(())
    }
}
