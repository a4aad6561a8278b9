//! Terminal rendering of views, in place of the dashboard charts.

use analytics::{DEFAULT_BINS, histogram};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use datasource::LoadSummary;
use std::collections::HashMap;
use views::{Analysis, View};

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

pub fn print_years(years: &[i32]) {
    if years.is_empty() {
        println!("No orders with a purchase date were found.");
        return;
    }
    let listed: Vec<String> = years.iter().map(i32::to_string).collect();
    println!("Available years: {}", listed.join(", "));
    if let Some(latest) = years.last() {
        println!("Default year:    {latest}");
    }
}

pub fn print_summary(summary: &LoadSummary) {
    let mut table = new_table(&["Record set", "Rows"]);
    table.add_row(vec![Cell::new("orders"), number(summary.orders)]);
    table.add_row(vec![Cell::new("payments"), number(summary.payments)]);
    table.add_row(vec![Cell::new("customers"), number(summary.customers)]);
    table.add_row(vec![Cell::new("geolocation"), number(summary.geolocation)]);
    table.add_row(vec![Cell::new("unparsable fields"), number(summary.parse_skips)]);
    table.add_row(vec![Cell::new("negative delivery times"), number(summary.negative_durations)]);
    println!("{table}");
}

pub fn print_view(analysis: Analysis, view: &View, limit: Option<usize>) {
    println!("{}", analysis.title());
    if view.is_empty() {
        println!("No data for this selection.");
        return;
    }

    let limit = limit.unwrap_or(usize::MAX);
    let table = match view {
        View::DeliveryTime { durations, .. } => {
            let mut table = new_table(&["Days", "Orders"]);
            // `durations` is non-empty here and DEFAULT_BINS is non-zero.
            for bin in histogram(durations, DEFAULT_BINS).unwrap_or_default().iter().take(limit) {
                table.add_row(vec![
                    Cell::new(format!("{:.1} .. {:.1}", bin.lower, bin.upper)),
                    number(bin.count),
                ]);
            }
            table
        }
        View::OrderStatus { counts, .. } => {
            let mut table = new_table(&["Status", "Orders"]);
            for group in counts.iter().take(limit) {
                table.add_row(vec![Cell::new(&group.key), number(group.count)]);
            }
            table
        }
        View::CustomerState { counts } => {
            let mut table = new_table(&["State", "Customers"]);
            for group in counts.iter().take(limit) {
                table.add_row(vec![Cell::new(&group.key), number(group.count)]);
            }
            table
        }
        View::RegionalDelivery { means, .. } => {
            let mut table = new_table(&["State", "Avg. delivery (days)", "Orders"]);
            for group in means.iter().take(limit) {
                table.add_row(vec![
                    Cell::new(&group.key),
                    number(format!("{:.2}", group.mean)),
                    number(group.samples),
                ]);
            }
            table
        }
        View::HolidayTrend { daily, holidays, .. } => {
            let labels: HashMap<_, _> = holidays.iter().map(|h| (h.date, h.label.as_str())).collect();
            let mut table = new_table(&["Date", "Orders", "Event"]);
            for day in daily.iter().take(limit) {
                table.add_row(vec![
                    Cell::new(day.date),
                    number(day.count),
                    Cell::new(labels.get(&day.date).copied().unwrap_or("")),
                ]);
            }
            table
        }
        View::UserLocations { points, .. } => {
            let mut table = new_table(&["Latitude", "Longitude", "State"]);
            for point in points.iter().take(limit) {
                let coordinate = |v: Option<f64>| v.map(|v| format!("{v:.6}")).unwrap_or_default();
                table.add_row(vec![
                    number(coordinate(point.latitude)),
                    number(coordinate(point.longitude)),
                    Cell::new(&point.state),
                ]);
            }
            table
        }
    };

    println!("{table}");
    if view.len() > limit {
        println!("({} of {} rows shown)", limit, view.len());
    }
}
