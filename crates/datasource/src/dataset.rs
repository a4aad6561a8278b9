use crate::error::SourceError;
use crate::loader::load_dataset;
use analytics::apply_derivations;
use configuration::DataPaths;
use core_types::{Customer, GeoPoint, Order, Payment};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Row counts and data-quality counters gathered while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub orders: usize,
    pub payments: usize,
    pub customers: usize,
    pub geolocation: usize,
    /// Fields that failed to parse and were read as missing.
    pub parse_skips: usize,
    /// Orders delivered before they were purchased. Kept, but worth knowing about.
    pub negative_durations: usize,
}

/// The four record sets, immutable once built.
#[derive(Debug)]
pub struct Dataset {
    orders: Vec<Order>,
    payments: Vec<Payment>,
    customers: Vec<Customer>,
    geolocation: Vec<GeoPoint>,
    customer_states: HashMap<String, usize>,
    summary: LoadSummary,
}

impl Dataset {
    /// Builds a dataset from in-memory records, deriving the order fields.
    pub fn new(
        orders: Vec<Order>,
        payments: Vec<Payment>,
        customers: Vec<Customer>,
        geolocation: Vec<GeoPoint>,
    ) -> Self {
        Self::from_parts(orders, payments, customers, geolocation, 0)
    }

    pub(crate) fn from_parts(
        mut orders: Vec<Order>,
        payments: Vec<Payment>,
        customers: Vec<Customer>,
        geolocation: Vec<GeoPoint>,
        parse_skips: usize,
    ) -> Self {
        let mut negative_durations = 0;
        for order in &mut orders {
            apply_derivations(order);
            if order.delivery_duration_days.is_some_and(|days| days < 0) {
                negative_durations += 1;
                tracing::debug!(order_id = %order.order_id, "Order delivered before purchase.");
            }
        }

        // The first row wins if a customer id is repeated.
        let mut customer_states = HashMap::with_capacity(customers.len());
        for (idx, customer) in customers.iter().enumerate() {
            customer_states.entry(customer.customer_id.clone()).or_insert(idx);
        }

        let summary = LoadSummary {
            orders: orders.len(),
            payments: payments.len(),
            customers: customers.len(),
            geolocation: geolocation.len(),
            parse_skips,
            negative_durations,
        };

        Self {
            orders,
            payments,
            customers,
            geolocation,
            customer_states,
            summary,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn geolocation(&self) -> &[GeoPoint] {
        &self.geolocation
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Looks up a customer by id.
    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customer_states
            .get(customer_id)
            .map(|&idx| &self.customers[idx])
    }

    /// The state of the customer who placed `order`, if that customer is known
    /// and has a non-blank state.
    pub fn customer_state(&self, order: &Order) -> Option<&str> {
        self.customer(&order.customer_id)
            .map(|c| c.customer_state.as_str())
            .filter(|state| !state.is_empty())
    }
}

/// A handle over the configured CSV files that loads them at most once.
///
/// Clones of the returned `Arc` are the only way consumers reach the data, so
/// nothing can mutate it after the first load.
#[derive(Debug)]
pub struct DataSource {
    paths: DataPaths,
    loaded: OnceLock<Arc<Dataset>>,
}

impl DataSource {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            loaded: OnceLock::new(),
        }
    }

    /// Returns the dataset, reading the files on the first call only.
    pub fn load(&self) -> Result<Arc<Dataset>, SourceError> {
        if let Some(dataset) = self.loaded.get() {
            tracing::trace!("Dataset served from memory.");
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_dataset(&self.paths)?);
        Ok(Arc::clone(self.loaded.get_or_init(|| dataset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use core_types::OrderStatus;

    fn at(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
    }

    #[test]
    fn derives_fields_and_counts_negative_durations() {
        let orders = vec![
            Order::new("o1", "c1", OrderStatus::Delivered, at("2018-01-01 10:00:00"), at("2018-01-03 09:00:00")),
            Order::new("o2", "c2", OrderStatus::Delivered, at("2018-01-05 10:00:00"), at("2018-01-03 09:00:00")),
            Order::new("o3", "c9", OrderStatus::Shipped, None, None),
        ];
        let dataset = Dataset::new(orders, vec![], vec![Customer::new("c1", "SP")], vec![]);

        assert_eq!(dataset.orders()[0].delivery_duration_days, Some(1));
        assert_eq!(dataset.orders()[1].delivery_duration_days, Some(-3));
        assert_eq!(dataset.orders()[2].purchase_year, None);
        assert_eq!(dataset.summary().negative_durations, 1);
        assert_eq!(dataset.summary().orders, 3);
    }

    #[test]
    fn customer_lookup_prefers_first_row() {
        let customers = vec![Customer::new("c1", "SP"), Customer::new("c1", "RJ"), Customer::new("c2", "MG")];
        let order = Order::new("o1", "c1", OrderStatus::Delivered, None, None);
        let orphan = Order::new("o2", "missing", OrderStatus::Delivered, None, None);
        let dataset = Dataset::new(vec![order.clone(), orphan.clone()], vec![], customers, vec![]);

        assert_eq!(dataset.customer_state(&order), Some("SP"));
        assert_eq!(dataset.customer_state(&orphan), None);
        assert_eq!(dataset.customer("c2").map(|c| c.customer_state.as_str()), Some("MG"));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let source = DataSource::new(DataPaths {
            orders: "/nope/orders.csv".into(),
            payments: "/nope/payments.csv".into(),
            customers: "/nope/customers.csv".into(),
            geolocation: "/nope/geolocation.csv".into(),
        });
        assert!(source.load().is_err());
        assert!(source.load().is_err());
    }
}
