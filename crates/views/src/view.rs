use analytics::{DailyCount, GroupCount, GroupMean};
use configuration::Holiday;
use core_types::{GeoPoint, OrderStatus};
use serde::Serialize;

/// A fully aggregated result set, ready to be drawn.
///
/// Serialized with a `kind` tag so presentation layers can pick a chart type without
/// knowing the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum View {
    /// Raw delivery durations in days; binning is left to the renderer.
    DeliveryTime { year: Option<i32>, durations: Vec<i64> },
    /// Orders per status, largest first.
    OrderStatus { year: Option<i32>, counts: Vec<GroupCount<OrderStatus>> },
    /// Customers per state over the whole customer table, largest first.
    CustomerState { counts: Vec<GroupCount<String>> },
    /// Mean delivery days per customer state, ordered by state.
    RegionalDelivery { year: Option<i32>, means: Vec<GroupMean<String>> },
    /// Orders per day plus the holidays of the same year.
    HolidayTrend {
        year: Option<i32>,
        daily: Vec<DailyCount>,
        holidays: Vec<Holiday>,
    },
    /// A reproducible sample of geolocation points, colored by state.
    UserLocations { requested: usize, points: Vec<GeoPoint> },
}

impl View {
    /// True when there is nothing to plot.
    ///
    /// The holiday overlay alone does not count as data.
    pub fn is_empty(&self) -> bool {
        match self {
            View::DeliveryTime { durations, .. } => durations.is_empty(),
            View::OrderStatus { counts, .. } => counts.is_empty(),
            View::CustomerState { counts } => counts.is_empty(),
            View::RegionalDelivery { means, .. } => means.is_empty(),
            View::HolidayTrend { daily, .. } => daily.is_empty(),
            View::UserLocations { points, .. } => points.is_empty(),
        }
    }

    /// Number of plotted rows (bars, points or values).
    pub fn len(&self) -> usize {
        match self {
            View::DeliveryTime { durations, .. } => durations.len(),
            View::OrderStatus { counts, .. } => counts.len(),
            View::CustomerState { counts } => counts.len(),
            View::RegionalDelivery { means, .. } => means.len(),
            View::HolidayTrend { daily, .. } => daily.len(),
            View::UserLocations { points, .. } => points.len(),
        }
    }
}
