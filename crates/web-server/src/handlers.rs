use crate::{error::AppError, AppState};
use analytics::{histogram, HistogramBin, DEFAULT_BINS};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use datasource::LoadSummary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use views::{default_year, Analysis, Page, View, ViewRequest, ViewSelector};

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// Defaults to the latest year with orders.
    pub year: Option<i32>,
    /// Histogram bins for the delivery-time view.
    pub bins: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
    pub default: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisEntry {
    pub analysis: Analysis,
    pub title: &'static str,
    pub uses_year: bool,
}

#[derive(Debug, Serialize)]
pub struct PageEntry {
    pub page: Page,
    pub title: &'static str,
    pub analyses: Vec<AnalysisEntry>,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub page: Page,
    pub analysis: Analysis,
    pub title: &'static str,
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<HistogramBin>>,
}

/// # GET /api/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<LoadSummary> {
    Json(state.dataset.summary().clone())
}

/// # GET /api/years
/// The options for the year selector.
pub async fn get_years(State(state): State<Arc<AppState>>) -> Json<YearsResponse> {
    let years = state.selector().available_years();
    Json(YearsResponse {
        default: years.last().copied(),
        years,
    })
}

/// # GET /api/pages
/// The page and analysis menus.
pub async fn get_pages() -> Json<Vec<PageEntry>> {
    let pages = Page::ALL
        .into_iter()
        .map(|page| PageEntry {
            page,
            title: page.title(),
            analyses: page
                .analyses()
                .iter()
                .map(|&analysis| AnalysisEntry {
                    analysis,
                    title: analysis.title(),
                    uses_year: analysis.uses_year(),
                })
                .collect(),
        })
        .collect();
    Json(pages)
}

/// # GET /api/views/:page/:analysis?year=YYYY&bins=N
pub async fn get_view(
    Path((page, analysis)): Path<(String, String)>,
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ViewResponse>, AppError> {
    let page: Page = page.parse()?;
    let analysis: Analysis = analysis.parse()?;
    let year = query.year.or_else(|| default_year(&state.dataset));
    let request = ViewRequest::new(page, analysis, year)?;

    let view = state.selector().select(&request);
    let histogram = match &view {
        View::DeliveryTime { durations, .. } => {
            Some(histogram(durations, query.bins.unwrap_or(DEFAULT_BINS))?)
        }
        _ => None,
    };

    Ok(Json(ViewResponse {
        page,
        analysis,
        title: analysis.title(),
        view,
        histogram,
    }))
}

impl AppState {
    fn selector(&self) -> ViewSelector<'_> {
        ViewSelector::new(&self.dataset, &self.holidays, self.geo)
    }
}
