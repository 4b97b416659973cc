use crate::calculator::{Calculator, Tracker};
use crate::clock::Clock;

pub const STOP_EATING: &str = "Stop eating!";

pub struct CaloriesCalculator {
    calculator: Calculator,
}

impl CaloriesCalculator {
    pub fn new(limit: f64) -> Self {
        Self {
            calculator: Calculator::new(limit),
        }
    }

    pub fn with_clock(limit: f64, clock: impl Clock + 'static) -> Self {
        Self {
            calculator: Calculator::with_clock(limit, clock),
        }
    }

    /// Advice on eating more today. A remainder of exactly zero already means stop.
    pub fn get_calories_remained(&self) -> String {
        let rest = self.get_rest();

        if rest > 0.0 {
            format!(
                "Today you can eat something else, but with a total calorie content of no more than {rest} kcal"
            )
        } else {
            STOP_EATING.to_string()
        }
    }
}

impl Tracker for CaloriesCalculator {
    fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calculator
    }
}
