//! Per-match detail list rendering

use super::highlight::escape_markup;
use simcheck_common::report::AnalysisReport;

const NO_MATCHES: &str = "No potential plagiarism was detected in this document.";

/// Render the advisory banner (when the engine sent one) followed by one
/// entry per match detail, in engine order. Empty details render a
/// placeholder, never an empty list.
pub fn render_details(report: &AnalysisReport) -> String {
    let mut html = String::new();

    if let Some(message) = &report.message {
        html.push_str("<p class=\"advisory\">");
        html.push_str(&escape_markup(message));
        html.push_str("</p>\n");
    }

    if report.details.is_empty() {
        html.push_str("<p>");
        html.push_str(NO_MATCHES);
        html.push_str("</p>\n");
        return html;
    }

    for detail in &report.details {
        html.push_str(&format!(
            concat!(
                "<div class=\"detail-item\">\n",
                "  <p class=\"user-sentence\">\"{user}\"</p>\n",
                "  <p class=\"source-info\"><strong>Similarity Score:</strong> ",
                "<span class=\"similarity-score\">{similarity}%</span></p>\n",
                "  <p><strong>Potential Source:</strong> {source}</p>\n",
                "  <p><strong>Matched Text:</strong> {matched}</p>\n",
                "</div>\n"
            ),
            user = escape_markup(&detail.user_sentence),
            similarity = detail.similarity,
            source = escape_markup(&detail.source),
            matched = escape_markup(&detail.matched_sentence),
        ));
    }

    html
}
