use crate::clock::{Clock, SystemClock};
use crate::error::RecordError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The only accepted format for user supplied dates, e.g. `19.11.2023`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    amount: f64,
    comment: String,
    #[serde(with = "date_format")]
    date: NaiveDate,
}

impl Record {
    pub fn new(
        amount: f64,
        comment: impl Into<String>,
        date: Option<&str>,
    ) -> Result<Self, RecordError> {
        Self::with_clock(amount, comment, date, &SystemClock)
    }

    pub fn with_clock(
        amount: f64,
        comment: impl Into<String>,
        date: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Self, RecordError> {
        let date = match date {
            Some(input) => parse_date(input)?,
            None => clock.today(),
        };

        Ok(Self::on(amount, comment, date))
    }

    pub fn on(amount: f64, comment: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            comment: comment.into(),
            date,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| RecordError::InvalidDate {
        input: input.to_string(),
        source,
    })
}

mod date_format {
    use super::{parse_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        parse_date(&input).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone)]
pub struct CurrencyRate {
    code: &'static str,
    units_per_base: f64,
    unit_name: &'static str,
}

impl CurrencyRate {
    pub fn new(code: &'static str, units_per_base: f64, unit_name: &'static str) -> Self {
        Self {
            code,
            units_per_base,
            unit_name,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn units_per_base(&self) -> f64 {
        self.units_per_base
    }

    pub fn unit_name(&self) -> &'static str {
        self.unit_name
    }

    pub fn convert(&self, base_amount: f64) -> f64 {
        let converted = base_amount / self.units_per_base;

        (converted * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::Local;

    #[test]
    fn test_record_with_explicit_date() {
        let record = Record::new(1000.0, "birthday bar", Some("19.11.2023")).unwrap();

        assert_eq!(record.amount(), 1000.0);
        assert_eq!(record.comment(), "birthday bar");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2023, 11, 19).unwrap());
    }

    #[test]
    fn test_record_defaults_to_clock_date() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let record = Record::with_clock(84.0, "yogurt", None, &FixedClock::new(today)).unwrap();

        assert_eq!(record.date(), today);
    }

    #[test]
    fn test_record_without_date_uses_local_date() {
        let before = Local::now().date_naive();
        let record = Record::new(300.0, "coffee", None).unwrap();
        let after = Local::now().date_naive();

        assert!(before <= record.date() && record.date() <= after);
    }

    #[test]
    fn test_explicit_date_ignores_clock() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let record = Record::with_clock(
            1140.0,
            "crisps",
            Some("24.02.2019"),
            &FixedClock::new(today),
        )
        .unwrap();

        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2019, 2, 24).unwrap());
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        for input in ["2023-11-19", "19/11/2023", "32.01.2023", "29.02.2023", ""] {
            let err = Record::new(1.0, "bad", Some(input)).unwrap_err();
            assert!(
                matches!(&err, RecordError::InvalidDate { input: i, .. } if i == input),
                "unexpected error for {input:?}: {err}"
            );
        }
    }

    #[test]
    fn test_json_dates_use_day_month_year() {
        let record = Record::new(1.0, "x", Some("19.11.2023")).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"amount":1.0,"comment":"x","date":"19.11.2023"}"#);
        assert_eq!(serde_json::from_str::<Record>(&json).unwrap(), record);
    }

    #[test]
    fn test_json_rejects_iso_dates() {
        let err = serde_json::from_str::<Record>(
            r#"{"amount":1.0,"comment":"x","date":"2023-11-19"}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("2023-11-19"), "{err}");
    }

    #[test]
    fn test_currency_rate_rounds_to_cents() {
        let eur = CurrencyRate::new("eur", 102.0, "Euro");

        assert_eq!(eur.convert(-200.0), -1.96);
        assert_eq!(eur.convert(0.0), 0.0);
        assert_eq!(CurrencyRate::new("usd", 92.0, "USD").convert(400.0), 4.35);
    }
}
