use crate::clock::{Clock, SystemClock};
use crate::data_structures::Record;
use chrono::{Duration, NaiveDate};

pub const WEEK_DAYS: i64 = 7;

pub struct Calculator {
    limit: f64,
    records: Vec<Record>,
    clock: Box<dyn Clock>,
}

impl Calculator {
    pub fn new(limit: f64) -> Self {
        Self::with_clock(limit, SystemClock)
    }

    pub fn with_clock(limit: f64, clock: impl Clock + 'static) -> Self {
        Self {
            limit,
            records: Vec::new(),
            clock: Box::new(clock),
        }
    }

    pub fn add_record(&mut self, record: Record) {
        tracing::debug!(
            amount = record.amount(),
            comment = record.comment(),
            date = %record.date(),
            "adding record"
        );
        self.records.push(record);
    }

    pub fn get_today_stats(&self) -> f64 {
        let today = self.today();
        self.sum_between(today, today)
    }

    pub fn get_rest(&self) -> f64 {
        self.limit - self.get_today_stats()
    }

    /// Total amount over the last seven days, both `today - 7` and today included.
    pub fn get_week_stats(&self) -> f64 {
        let today = self.today();
        self.sum_between(week_start(today), today)
    }

    pub fn get_week_breakdown(&self) -> Vec<(NaiveDate, f64)> {
        let today = self.today();

        week_start(today)
            .iter_days()
            .take_while(|day| *day <= today)
            .map(|day| (day, self.sum_between(day, day)))
            .collect()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn sum_between(&self, first: NaiveDate, last: NaiveDate) -> f64 {
        self.records
            .iter()
            .filter(|record| first <= record.date() && record.date() <= last)
            .map(Record::amount)
            .sum()
    }
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(WEEK_DAYS)
}

pub trait Tracker {
    fn calculator(&self) -> &Calculator;

    fn calculator_mut(&mut self) -> &mut Calculator;

    fn add_record(&mut self, record: Record) {
        self.calculator_mut().add_record(record);
    }

    fn get_today_stats(&self) -> f64 {
        self.calculator().get_today_stats()
    }

    fn get_rest(&self) -> f64 {
        self.calculator().get_rest()
    }

    fn get_week_stats(&self) -> f64 {
        self.calculator().get_week_stats()
    }
}
