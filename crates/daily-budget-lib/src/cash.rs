use crate::calculator::{Calculator, Tracker};
use crate::clock::Clock;
use crate::rates::RateProvider;

pub const INVALID_CURRENCY: &str = "<invalid currency selected>";
pub const NO_MONEY: &str = "No money, hold on";

pub struct CashCalculator {
    calculator: Calculator,
    rates: RateProvider,
}

impl CashCalculator {
    pub fn new(limit: f64) -> Self {
        Self {
            calculator: Calculator::new(limit),
            rates: RateProvider::new(),
        }
    }

    pub fn with_clock(limit: f64, clock: impl Clock + 'static) -> Self {
        Self {
            calculator: Calculator::with_clock(limit, clock),
            rates: RateProvider::new(),
        }
    }

    pub fn rates(&self) -> &RateProvider {
        &self.rates
    }

    /// An unknown code yields [`INVALID_CURRENCY`] instead of an error.
    pub fn get_today_cash_remained(&self, currency: &str) -> String {
        let Some(rate) = self.rates.get_rate(currency) else {
            tracing::debug!(currency, "unknown currency requested");
            return INVALID_CURRENCY.to_string();
        };

        let balance = self.get_rest();
        let converted = rate.convert(balance);

        if balance > 0.0 {
            format!("Remaining for today: {:.2} {}", converted, rate.unit_name())
        } else if balance == 0.0 {
            NO_MONEY.to_string()
        } else {
            format!(
                "{}: your debt is {:.2} {}",
                NO_MONEY,
                converted.abs(),
                rate.unit_name()
            )
        }
    }
}

impl Tracker for CashCalculator {
    fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calculator
    }
}
