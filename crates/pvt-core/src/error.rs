use thiserror::Error;

pub type PvtResult<T> = Result<T, PvtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PvtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },
}
