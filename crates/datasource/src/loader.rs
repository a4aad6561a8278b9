use crate::dataset::Dataset;
use crate::error::SourceError;
use configuration::DataPaths;
use core_types::{
    parse_number, parse_timestamp, CoreError, Customer, GeoPoint, Order, OrderStatus, Payment,
};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

const ORDER_COLUMNS: &[&str] = &[
    "order_id",
    "customer_id",
    "order_status",
    "order_purchase_timestamp",
    "order_delivered_customer_date",
];
const PAYMENT_COLUMNS: &[&str] = &["order_id"];
const CUSTOMER_COLUMNS: &[&str] = &["customer_id", "customer_state"];
const GEOLOCATION_COLUMNS: &[&str] = &["geolocation_lat", "geolocation_lng", "geolocation_state"];

/// Reads all four files and builds the dataset.
///
/// A missing file, a missing required column or a row longer than its header aborts
/// the whole load.
/// Individual fields that fail to parse are read as missing and counted.
pub fn load_dataset(paths: &DataPaths) -> Result<Dataset, SourceError> {
    let started = Instant::now();

    let (orders, order_skips) = read_table(&paths.orders, ORDER_COLUMNS, parse_order)?;
    let (payments, payment_skips) = read_table(&paths.payments, PAYMENT_COLUMNS, parse_payment)?;
    let (customers, customer_skips) = read_table(&paths.customers, CUSTOMER_COLUMNS, parse_customer)?;
    let (geolocation, geo_skips) = read_table(&paths.geolocation, GEOLOCATION_COLUMNS, parse_geo_point)?;

    let parse_skips = order_skips + payment_skips + customer_skips + geo_skips;
    let dataset = Dataset::from_parts(orders, payments, customers, geolocation, parse_skips);

    let summary = dataset.summary();
    tracing::info!(
        orders = summary.orders,
        payments = summary.payments,
        customers = summary.customers,
        geolocation = summary.geolocation,
        parse_skips = summary.parse_skips,
        negative_durations = summary.negative_durations,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Dataset loaded."
    );

    Ok(dataset)
}

/// Header name → position for one file.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(path: &Path, headers: &StringRecord, required: &[&str]) -> Result<Self, SourceError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !index.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(SourceError::unavailable(
                path,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
        }

        Ok(Self { index })
    }

    /// The raw cell, or "" when the column is absent from this file.
    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        self.index
            .get(name)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn optional(&self, record: &StringRecord, name: &str) -> Option<String> {
        let value = self.get(record, name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Counts fields that failed to parse within one file.
#[derive(Default)]
struct FieldSkips {
    count: usize,
}

impl FieldSkips {
    /// Turns a parse failure into a missing value, remembering that it happened.
    fn absorb<T>(&mut self, row: usize, parsed: Result<Option<T>, CoreError>) -> Option<T> {
        match parsed {
            Ok(value) => value,
            Err(e) => {
                self.count += 1;
                tracing::trace!(row, error = %e, "Field read as missing.");
                None
            }
        }
    }
}

fn read_table<T, F>(path: &Path, required: &[&str], mut parse_row: F) -> Result<(Vec<T>, usize), SourceError>
where
    F: FnMut(&Columns, &StringRecord, usize, &mut FieldSkips) -> T,
{
    // Short rows are kept with their trailing cells missing.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SourceError::unavailable(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| SourceError::unavailable(path, e))?
        .clone();
    let columns = Columns::from_headers(path, &headers, required)?;

    let mut rows = Vec::new();
    let mut skips = FieldSkips::default();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) if record.len() > headers.len() => {
                return Err(SourceError::unavailable(
                    path,
                    format!(
                        "row {} has {} fields but the header has {}",
                        rows.len() + 1,
                        record.len(),
                        headers.len()
                    ),
                ));
            }
            Ok(true) => {
                let row = rows.len() + 1;
                rows.push(parse_row(&columns, &record, row, &mut skips));
            }
            Ok(false) => break,
            Err(e) => return Err(SourceError::unavailable(path, e)),
        }
    }

    if skips.count > 0 {
        tracing::warn!(
            file = %path.display(),
            fields = skips.count,
            "Some fields could not be parsed and were read as missing."
        );
    }
    tracing::debug!(file = %path.display(), rows = rows.len(), "Table read.");

    Ok((rows, skips.count))
}

fn parse_order(columns: &Columns, record: &StringRecord, row: usize, skips: &mut FieldSkips) -> Order {
    let purchased = skips.absorb(row, parse_timestamp(columns.get(record, "order_purchase_timestamp")));
    let delivered = skips.absorb(row, parse_timestamp(columns.get(record, "order_delivered_customer_date")));
    let status = match columns.get(record, "order_status").parse::<OrderStatus>() {
        Ok(status) => status,
        Err(never) => match never {},
    };

    Order::new(
        columns.get(record, "order_id").trim(),
        columns.get(record, "customer_id").trim(),
        status,
        purchased,
        delivered,
    )
}

fn parse_payment(columns: &Columns, record: &StringRecord, row: usize, skips: &mut FieldSkips) -> Payment {
    Payment {
        order_id: columns.get(record, "order_id").trim().to_string(),
        payment_sequential: skips.absorb(
            row,
            parse_number::<u32>("payment_sequential", columns.get(record, "payment_sequential")),
        ),
        payment_type: columns.optional(record, "payment_type"),
        payment_installments: skips.absorb(
            row,
            parse_number::<u32>("payment_installments", columns.get(record, "payment_installments")),
        ),
        payment_value: skips.absorb(
            row,
            parse_number::<Decimal>("payment_value", columns.get(record, "payment_value")),
        ),
    }
}

fn parse_customer(columns: &Columns, record: &StringRecord, _row: usize, _skips: &mut FieldSkips) -> Customer {
    Customer {
        customer_id: columns.get(record, "customer_id").trim().to_string(),
        customer_state: columns.get(record, "customer_state").trim().to_string(),
        customer_unique_id: columns.optional(record, "customer_unique_id"),
        zip_code_prefix: columns.optional(record, "customer_zip_code_prefix"),
        city: columns.optional(record, "customer_city"),
    }
}

fn parse_geo_point(columns: &Columns, record: &StringRecord, row: usize, skips: &mut FieldSkips) -> GeoPoint {
    GeoPoint {
        latitude: skips.absorb(row, parse_number::<f64>("geolocation_lat", columns.get(record, "geolocation_lat"))),
        longitude: skips.absorb(row, parse_number::<f64>("geolocation_lng", columns.get(record, "geolocation_lng"))),
        state: columns.get(record, "geolocation_state").trim().to_string(),
        zip_code_prefix: columns.optional(record, "geolocation_zip_code_prefix"),
        city: columns.optional(record, "geolocation_city"),
    }
}
