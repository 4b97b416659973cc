pub mod calculator;
pub mod calories;
pub mod cash;
pub mod clock;
pub mod data_structures;
pub mod error;
pub mod loader;
pub mod rates;

pub use calculator::{Calculator, Tracker};
pub use calories::CaloriesCalculator;
pub use cash::CashCalculator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use data_structures::{CurrencyRate, Record, DATE_FORMAT};
pub use error::RecordError;
pub use loader::RecordLoader;
pub use rates::RateProvider;

pub use anyhow::Result;
pub use chrono::{Duration, NaiveDate};

pub mod prelude {
    pub use crate::calculator::Tracker;
    pub use crate::calories::CaloriesCalculator;
    pub use crate::cash::CashCalculator;
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::data_structures::Record;
    pub use anyhow::Result;
    pub use chrono::NaiveDate;
}
