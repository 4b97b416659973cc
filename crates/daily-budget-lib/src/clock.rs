use chrono::{Local, NaiveDate};

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 19).unwrap();
        let clock = FixedClock::new(date);

        assert_eq!(clock.today(), date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_system_clock_matches_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();

        assert!(before <= today && today <= after);
    }
}
