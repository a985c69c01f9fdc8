//! USD/MXN historical rates from Banxico's SIE API.
//!
//! The pipeline is: resolve the month-to-date range for an input date, fetch
//! the raw series from SIE, reshape it into `date -> "rate"` pairs.

mod config;
mod dates;
mod error;
mod fetcher;
mod handler;
mod payload;

pub use config::Config;
pub use dates::{resolve_range, DateRange};
pub use error::RateError;
pub use fetcher::{http_client, BanxicoClient, RateSource};
pub use handler::{usd_rates, RatesResponse, INPUT_DATE_PARAM};
pub use payload::{shape_rates, RateMap};
