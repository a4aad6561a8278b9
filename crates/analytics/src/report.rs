use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of rows sharing one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: usize,
}

/// Mean of the defined values within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
    /// How many defined values went into `mean`.
    pub samples: usize,
}

/// Orders purchased on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// One equal-width bucket. `upper` is exclusive except on the last bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}
