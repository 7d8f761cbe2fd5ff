//! POST /api/report — server-side match report rendering

use crate::render::RenderedReport;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use simcheck_common::report::AnalysisReport;

/// POST /api/report
///
/// Renders a previously obtained analysis report into its three HTML
/// fragments. The renderer disposes its prior chart instance before
/// building the new one, so repeated renders are idempotent.
pub async fn render_report(
    State(state): State<AppState>,
    Json(report): Json<AnalysisReport>,
) -> Json<RenderedReport> {
    let mut renderer = state.renderer.lock().await;
    Json(renderer.render(&report))
}
