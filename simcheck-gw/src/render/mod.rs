//! Match report rendering
//!
//! Turns an `AnalysisReport` into three HTML fragments: the proportion
//! chart, the highlighted original text, and the per-match detail list.
//! The chart handle is an owned field on the renderer with an explicit
//! dispose/recreate contract on every render call.

pub mod chart;
pub mod details;
pub mod highlight;

pub use chart::DonutChart;

use serde::Serialize;
use simcheck_common::report::AnalysisReport;
use tracing::debug;

/// Rendered report fragments returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    /// Two-slice proportion chart (SVG document)
    pub chart_svg: String,
    /// Original text with matched sentences wrapped in highlight spans
    pub highlighted_html: String,
    /// Advisory banner (if any) plus the ordered match detail list
    pub details_html: String,
}

/// Owns the reusable chart handle across renders.
#[derive(Debug, Default)]
pub struct ReportRenderer {
    chart: Option<DonutChart>,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self { chart: None }
    }

    /// Render all three report sections.
    ///
    /// Any previously built chart is disposed first, so repeated renders
    /// never accumulate chart instances and rendering the same report twice
    /// produces identical output.
    pub fn render(&mut self, report: &AnalysisReport) -> RenderedReport {
        self.dispose_chart();

        let chart = DonutChart::new(report.plagiarism_percentage, report.unique_percentage);
        let rendered = RenderedReport {
            chart_svg: chart.svg().to_string(),
            highlighted_html: highlight::highlight_matches(&report.original_text, &report.details),
            details_html: details::render_details(report),
        };
        self.chart = Some(chart);

        rendered
    }

    /// Drop the current chart handle, if any.
    pub fn dispose_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            debug!(plagiarized = chart.plagiarized(), "Disposing previous chart");
        }
    }

    /// Whether a chart instance is currently held.
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcheck_common::report::MatchDetail;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            plagiarism_percentage: 30.0,
            unique_percentage: 70.0,
            original_text: "Cats are mammals. Dogs bark.".to_string(),
            details: vec![MatchDetail {
                user_sentence: "Cats are mammals.".to_string(),
                matched_sentence: "Cats are mammals.".to_string(),
                source: "doc1.txt".to_string(),
                similarity: 95.0,
            }],
            message: None,
        }
    }

    #[test]
    fn test_render_scenario() {
        let mut renderer = ReportRenderer::new();
        let rendered = renderer.render(&sample_report());

        assert!(rendered.chart_svg.contains("30 70"));
        assert!(rendered
            .highlighted_html
            .contains("<span class=\"plagiarized\">Cats are mammals.</span>"));
        assert!(!rendered.highlighted_html.contains("plagiarized\">Dogs bark."));
        assert!(rendered.details_html.contains("95"));
        assert!(rendered.details_html.contains("doc1.txt"));
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let mut renderer = ReportRenderer::new();
        let report = sample_report();

        let first = renderer.render(&report);
        let second = renderer.render(&report);

        assert_eq!(first, second);
    }

    #[test]
    fn test_rerender_holds_a_single_chart_instance() {
        let mut renderer = ReportRenderer::new();
        let report = sample_report();

        assert!(!renderer.has_chart());
        renderer.render(&report);
        assert!(renderer.has_chart());
        renderer.render(&report);
        assert!(renderer.has_chart());

        renderer.dispose_chart();
        assert!(!renderer.has_chart());
        // disposing again is a no-op
        renderer.dispose_chart();
        assert!(!renderer.has_chart());
    }
}
