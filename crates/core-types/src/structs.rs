use crate::enums::OrderStatus;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single marketplace order.
///
/// `delivery_duration_days` and `purchase_year` are derived once at load time
/// and are `None` whenever the timestamps they depend on are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: OrderStatus,
    pub purchase_timestamp: Option<NaiveDateTime>,
    pub delivered_timestamp: Option<NaiveDateTime>,
    pub delivery_duration_days: Option<i64>,
    pub purchase_year: Option<i32>,
}

impl Order {
    /// Creates an order with no derived fields filled in.
    pub fn new(
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
        order_status: OrderStatus,
        purchase_timestamp: Option<NaiveDateTime>,
        delivered_timestamp: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            order_status,
            purchase_timestamp,
            delivered_timestamp,
            delivery_duration_days: None,
            purchase_year: None,
        }
    }
}

/// A customer and the state (region code) they order from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub customer_state: String,
    pub customer_unique_id: Option<String>,
    pub zip_code_prefix: Option<String>,
    pub city: Option<String>,
}

impl Customer {
    pub fn new(customer_id: impl Into<String>, customer_state: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            customer_state: customer_state.into(),
            customer_unique_id: None,
            zip_code_prefix: None,
            city: None,
        }
    }
}

/// One geolocation sample. Many samples exist per state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub state: String,
    pub zip_code_prefix: Option<String>,
    pub city: Option<String>,
}

impl GeoPoint {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>, state: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            state: state.into(),
            zip_code_prefix: None,
            city: None,
        }
    }
}

/// A payment made against an order. Loaded for completeness; no view joins it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: String,
    pub payment_sequential: Option<u32>,
    pub payment_type: Option<String>,
    pub payment_installments: Option<u32>,
    pub payment_value: Option<Decimal>,
}
