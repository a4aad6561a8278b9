use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("A histogram needs between 1 and {max} bins, got {0}", max = crate::histogram::MAX_BINS)]
    InvalidBinCount(usize),
}
