//! Plain-text report rendering

use crate::analysis::StockReport;
use chrono::NaiveDate;

/// Render a classified price as a plain-text report
///
/// The price is interpolated exactly as stored in the report.
pub fn render(report: &StockReport) -> String {
    format!(
        "CURRENT PRICE: ${price}\n\
         TIMESTAMP: {timestamp}\n\
         \n\
         ANALYSIS:\n\
         {analysis}\n\
         \n\
         RECOMMENDATION: {recommendation}\n\
         \n\
         INVESTMENT GRADE:\n\
         {grade}\n\
         \n\
         RISK ASSESSMENT:\n\
         {risk}",
        price = report.price,
        timestamp = report.timestamp,
        analysis = report.analysis_label.commentary(),
        recommendation = report.recommendation.label(),
        grade = report.recommendation.grade(),
        risk = report.risk_tier.assessment(),
    )
}

/// Wrap report text with a header for the saved reports file
pub fn envelope(symbol: &str, body: &str, generated_at: &str) -> String {
    format!("📊 STOCK ANALYSIS REPORT\nGenerated: {generated_at}\nSymbol: {symbol}\n\n{body}")
}

/// Commit message used when saving a report
pub fn commit_message(symbol: &str, date: NaiveDate) -> String {
    format!(
        "Add stock analysis report for {symbol} - {}",
        date.format("%-m/%-d/%Y")
    )
}
