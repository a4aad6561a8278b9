use crate::error::ViewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The top-level dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Eda,
    Explanatory,
    Geospatial,
}

/// Every analysis offered by the dashboard. Each belongs to exactly one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Analysis {
    DeliveryTime,
    OrderStatus,
    CustomerState,
    RegionalDelivery,
    HolidayTrend,
    UserLocations,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Eda, Page::Explanatory, Page::Geospatial];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Eda => "eda",
            Page::Explanatory => "explanatory",
            Page::Geospatial => "geospatial",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Eda => "Exploratory Data Analysis",
            Page::Explanatory => "Visualization & Explanatory Analysis",
            Page::Geospatial => "Geospatial Analysis",
        }
    }

    /// The analyses selectable on this page, in menu order.
    pub fn analyses(self) -> &'static [Analysis] {
        match self {
            Page::Eda => &[Analysis::DeliveryTime, Analysis::OrderStatus, Analysis::CustomerState],
            Page::Explanatory => &[Analysis::RegionalDelivery, Analysis::HolidayTrend],
            Page::Geospatial => &[Analysis::UserLocations],
        }
    }
}

impl Analysis {
    pub fn slug(self) -> &'static str {
        match self {
            Analysis::DeliveryTime => "delivery-time",
            Analysis::OrderStatus => "order-status",
            Analysis::CustomerState => "customer-state",
            Analysis::RegionalDelivery => "regional-delivery",
            Analysis::HolidayTrend => "holiday-trend",
            Analysis::UserLocations => "user-locations",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Analysis::DeliveryTime => "Delivery time distribution",
            Analysis::OrderStatus => "Order status distribution",
            Analysis::CustomerState => "Customers by state",
            Analysis::RegionalDelivery => "Average delivery time per region",
            Analysis::HolidayTrend => "Holidays and annual events vs. order volume",
            Analysis::UserLocations => "Where our users are",
        }
    }

    pub fn page(self) -> Page {
        match self {
            Analysis::DeliveryTime | Analysis::OrderStatus | Analysis::CustomerState => Page::Eda,
            Analysis::RegionalDelivery | Analysis::HolidayTrend => Page::Explanatory,
            Analysis::UserLocations => Page::Geospatial,
        }
    }

    /// Whether the selected year changes this analysis' result.
    pub fn uses_year(self) -> bool {
        !matches!(self, Analysis::CustomerState | Analysis::UserLocations)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| ViewError::UnknownPage(s.to_string()))
    }
}

impl FromStr for Analysis {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .iter()
            .flat_map(|p| p.analyses().iter().copied())
            .find(|a| a.slug() == s)
            .ok_or_else(|| ViewError::UnknownAnalysis(s.to_string()))
    }
}

/// One concrete view to compute.
///
/// A `None` year means no year could be selected (the dataset has no dated orders);
/// year-filtered views are then empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "analysis", rename_all = "kebab-case")]
pub enum ViewRequest {
    DeliveryTime { year: Option<i32> },
    OrderStatus { year: Option<i32> },
    CustomerState,
    RegionalDelivery { year: Option<i32> },
    HolidayTrend { year: Option<i32> },
    UserLocations,
}

impl ViewRequest {
    /// Builds the request for a UI selection, checking the analysis is on the page.
    pub fn new(page: Page, analysis: Analysis, year: Option<i32>) -> Result<Self, ViewError> {
        if analysis.page() != page {
            return Err(ViewError::AnalysisNotOnPage { page, analysis });
        }

        Ok(match analysis {
            Analysis::DeliveryTime => ViewRequest::DeliveryTime { year },
            Analysis::OrderStatus => ViewRequest::OrderStatus { year },
            Analysis::CustomerState => ViewRequest::CustomerState,
            Analysis::RegionalDelivery => ViewRequest::RegionalDelivery { year },
            Analysis::HolidayTrend => ViewRequest::HolidayTrend { year },
            Analysis::UserLocations => ViewRequest::UserLocations,
        })
    }

    pub fn analysis(&self) -> Analysis {
        match self {
            ViewRequest::DeliveryTime { .. } => Analysis::DeliveryTime,
            ViewRequest::OrderStatus { .. } => Analysis::OrderStatus,
            ViewRequest::CustomerState => Analysis::CustomerState,
            ViewRequest::RegionalDelivery { .. } => Analysis::RegionalDelivery,
            ViewRequest::HolidayTrend { .. } => Analysis::HolidayTrend,
            ViewRequest::UserLocations => Analysis::UserLocations,
        }
    }

    pub fn page(&self) -> Page {
        self.analysis().page()
    }
}
