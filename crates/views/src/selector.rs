use crate::request::ViewRequest;
use crate::view::View;
use analytics::{aggregate_mean, available_years, count_by, daily_counts, filter_by_year, sample_uniform};
use configuration::{GeoSampling, HolidayCalendar};
use core_types::Order;
use datasource::Dataset;
use std::time::Instant;

/// The year a fresh dashboard opens on: the latest one with orders.
pub fn default_year(dataset: &Dataset) -> Option<i32> {
    available_years(dataset.orders()).last().copied()
}

/// Runs view requests against one loaded dataset.
pub struct ViewSelector<'a> {
    dataset: &'a Dataset,
    holidays: &'a HolidayCalendar,
    geo: GeoSampling,
}

impl<'a> ViewSelector<'a> {
    pub fn new(dataset: &'a Dataset, holidays: &'a HolidayCalendar, geo: GeoSampling) -> Self {
        Self { dataset, holidays, geo }
    }

    /// Distinct purchase years, ascending, for the year selector.
    pub fn available_years(&self) -> Vec<i32> {
        available_years(self.dataset.orders())
    }

    /// Computes the view for `request` from scratch.
    pub fn select(&self, request: &ViewRequest) -> View {
        let started = Instant::now();

        let view = match *request {
            ViewRequest::DeliveryTime { year } => View::DeliveryTime {
                year,
                durations: self
                    .orders_in(year)
                    .into_iter()
                    .filter_map(|o| o.delivery_duration_days)
                    .collect(),
            },
            ViewRequest::OrderStatus { year } => View::OrderStatus {
                year,
                counts: count_by(self.orders_in(year), |o| {
                    (!o.order_status.as_str().is_empty()).then(|| o.order_status.clone())
                }),
            },
            ViewRequest::CustomerState => View::CustomerState {
                counts: count_by(self.dataset.customers(), |c| {
                    (!c.customer_state.is_empty()).then(|| c.customer_state.clone())
                }),
            },
            ViewRequest::RegionalDelivery { year } => View::RegionalDelivery {
                year,
                // Orders whose customer is unknown or stateless drop out here.
                means: aggregate_mean(
                    self.orders_in(year),
                    |o| self.dataset.customer_state(o).map(str::to_string),
                    |o| o.delivery_duration_days.map(|days| days as f64),
                ),
            },
            ViewRequest::HolidayTrend { year } => View::HolidayTrend {
                year,
                daily: daily_counts(self.orders_in(year)),
                holidays: year.map(|y| self.holidays.for_year(y)).unwrap_or_default(),
            },
            ViewRequest::UserLocations => View::UserLocations {
                requested: self.geo.sample_size,
                points: sample_uniform(self.dataset.geolocation(), self.geo.sample_size, self.geo.seed),
            },
        };

        tracing::debug!(
            analysis = %request.analysis(),
            rows = view.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "View computed."
        );
        view
    }

    fn orders_in(&self, year: Option<i32>) -> Vec<&'a Order> {
        match year {
            Some(year) => filter_by_year(self.dataset.orders(), year),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Analysis, Page};
    use chrono::NaiveDateTime;
    use core_types::{Customer, GeoPoint, OrderStatus};

    fn at(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
    }

    fn order(id: &str, customer: &str, status: OrderStatus, purchased: &str, delivered: &str) -> Order {
        Order::new(id, customer, status, at(purchased), at(delivered))
    }

    fn dataset() -> Dataset {
        let orders = vec![
            order("1", "c1", OrderStatus::Delivered, "2018-01-01 10:00:00", "2018-01-06 10:00:00"),
            order("2", "c2", OrderStatus::Delivered, "2018-01-01 12:00:00", "2018-01-08 12:00:00"),
            order("3", "c3", OrderStatus::Shipped, "2018-04-01 09:00:00", ""),
            order("4", "ghost", OrderStatus::Delivered, "2018-11-24 09:00:00", "2018-11-30 09:00:00"),
            order("5", "c1", OrderStatus::Canceled, "2017-11-24 15:00:00", ""),
            order("6", "c3", OrderStatus::Delivered, "", "2017-01-01 00:00:00"),
        ];
        let customers = vec![
            Customer::new("c1", "SP"),
            Customer::new("c2", "SP"),
            Customer::new("c3", "RJ"),
            Customer::new("c4", "MG"),
        ];
        let geolocation = (0..25)
            .map(|i| GeoPoint::new(Some(-23.0 - i as f64 / 100.0), Some(-46.0), if i % 2 == 0 { "SP" } else { "RJ" }))
            .collect();
        Dataset::new(orders, vec![], customers, geolocation)
    }

    fn select(dataset: &Dataset, page: Page, analysis: Analysis, year: Option<i32>) -> View {
        let calendar = HolidayCalendar::builtin().unwrap();
        let selector = ViewSelector::new(dataset, &calendar, GeoSampling { sample_size: 10, seed: 42 });
        selector.select(&ViewRequest::new(page, analysis, year).unwrap())
    }

    #[test]
    fn default_year_is_the_latest() {
        assert_eq!(default_year(&dataset()), Some(2018));
        assert_eq!(default_year(&Dataset::new(vec![], vec![], vec![], vec![])), None);
    }

    #[test]
    fn delivery_time_strips_undefined_durations() {
        let view = select(&dataset(), Page::Eda, Analysis::DeliveryTime, Some(2018));
        assert_eq!(view, View::DeliveryTime { year: Some(2018), durations: vec![5, 7, 6] });
    }

    #[test]
    fn order_status_counts_within_the_year() {
        let View::OrderStatus { counts, .. } = select(&dataset(), Page::Eda, Analysis::OrderStatus, Some(2018)) else {
            panic!("wrong view kind");
        };
        let flat: Vec<_> = counts.iter().map(|c| (c.key.clone(), c.count)).collect();
        assert_eq!(flat, vec![(OrderStatus::Delivered, 3), (OrderStatus::Shipped, 1)]);
    }

    #[test]
    fn customer_state_ignores_the_year() {
        let ds = dataset();
        let a = select(&ds, Page::Eda, Analysis::CustomerState, Some(2017));
        let b = select(&ds, Page::Eda, Analysis::CustomerState, Some(2030));
        assert_eq!(a, b);
        let View::CustomerState { counts } = a else { panic!("wrong view kind") };
        let flat: Vec<_> = counts.iter().map(|c| (c.key.as_str(), c.count)).collect();
        assert_eq!(flat, vec![("SP", 2), ("RJ", 1), ("MG", 1)]);
    }

    #[test]
    fn regional_delivery_joins_customers_and_drops_orphans() {
        let View::RegionalDelivery { means, .. } =
            select(&dataset(), Page::Explanatory, Analysis::RegionalDelivery, Some(2018))
        else {
            panic!("wrong view kind");
        };
        // SP: orders 1 and 2 (5 and 7 days). RJ: order 3 has no duration, so RJ is absent.
        // Order 4 belongs to an unknown customer.
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].key, "SP");
        assert_eq!(means[0].mean, 6.0);
    }

    #[test]
    fn blank_states_and_statuses_form_no_group() {
        let ds = Dataset::new(
            vec![
                order("1", "blank", OrderStatus::Delivered, "2018-03-01 10:00:00", "2018-03-04 10:00:00"),
                order("2", "sp", "".parse().unwrap(), "2018-03-02 10:00:00", "2018-03-03 10:00:00"),
            ],
            vec![],
            vec![Customer::new("blank", ""), Customer::new("sp", "SP")],
            vec![],
        );

        let View::CustomerState { counts } = select(&ds, Page::Eda, Analysis::CustomerState, None) else {
            panic!("wrong view kind");
        };
        let flat: Vec<_> = counts.iter().map(|c| (c.key.as_str(), c.count)).collect();
        assert_eq!(flat, vec![("SP", 1)]);

        let View::RegionalDelivery { means, .. } =
            select(&ds, Page::Explanatory, Analysis::RegionalDelivery, Some(2018))
        else {
            panic!("wrong view kind");
        };
        let flat: Vec<_> = means.iter().map(|m| (m.key.as_str(), m.mean)).collect();
        assert_eq!(flat, vec![("SP", 1.0)]);

        let View::OrderStatus { counts, .. } = select(&ds, Page::Eda, Analysis::OrderStatus, Some(2018)) else {
            panic!("wrong view kind");
        };
        let flat: Vec<_> = counts.iter().map(|c| (c.key.clone(), c.count)).collect();
        assert_eq!(flat, vec![(OrderStatus::Delivered, 1)]);
    }

    #[test]
    fn holiday_trend_overlays_only_that_years_holidays() {
        let View::HolidayTrend { daily, holidays, .. } =
            select(&dataset(), Page::Explanatory, Analysis::HolidayTrend, Some(2018))
        else {
            panic!("wrong view kind");
        };
        let flat: Vec<_> = daily.iter().map(|d| (d.date.to_string(), d.count)).collect();
        assert_eq!(
            flat,
            vec![
                ("2018-01-01".to_string(), 2),
                ("2018-04-01".to_string(), 1),
                ("2018-11-24".to_string(), 1)
            ]
        );
        assert_eq!(holidays.len(), 4);
        assert!(holidays.iter().all(|h| h.date.to_string().starts_with("2018")));
    }

    #[test]
    fn user_locations_are_a_stable_sample() {
        let ds = dataset();
        let first = select(&ds, Page::Geospatial, Analysis::UserLocations, None);
        let second = select(&ds, Page::Geospatial, Analysis::UserLocations, Some(2017));
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn user_locations_cap_at_available_points() {
        let ds = dataset();
        let calendar = HolidayCalendar::builtin().unwrap();
        let selector = ViewSelector::new(&ds, &calendar, GeoSampling::default());
        let View::UserLocations { requested, points } = selector.select(&ViewRequest::UserLocations) else {
            panic!("wrong view kind");
        };
        assert_eq!(requested, 10_000);
        assert_eq!(points.len(), 25);
    }

    #[test]
    fn a_year_without_orders_gives_empty_views() {
        let ds = dataset();
        for (page, analysis) in [
            (Page::Eda, Analysis::DeliveryTime),
            (Page::Eda, Analysis::OrderStatus),
            (Page::Explanatory, Analysis::RegionalDelivery),
            (Page::Explanatory, Analysis::HolidayTrend),
        ] {
            assert!(select(&ds, page, analysis, Some(2030)).is_empty(), "{analysis} should be empty");
            assert!(select(&ds, page, analysis, None).is_empty(), "{analysis} should be empty");
        }
    }

    #[test]
    fn an_empty_dataset_gives_empty_views() {
        let ds = Dataset::new(vec![], vec![], vec![], vec![]);
        for page in Page::ALL {
            for &analysis in page.analyses() {
                assert!(select(&ds, page, analysis, Some(2018)).is_empty());
            }
        }
    }

    #[test]
    fn views_serialize_with_a_kind_tag() {
        let view = select(&dataset(), Page::Eda, Analysis::OrderStatus, Some(2017));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "order-status");
        assert_eq!(json["year"], 2017);
        assert_eq!(json["counts"][0]["key"], "canceled");
        assert_eq!(json["counts"][0]["count"], 1);
    }
}
