use chrono::{Duration, Local, NaiveDate};

pub const DATE_FMT: &str = "%Y-%m-%d";

// today is the server's local calendar date; due dates count from it.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn due_date(from: NaiveDate, loan_days: i64) -> NaiveDate {
    from + Duration::days(loan_days)
}

pub mod serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        date.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let str_date: String = Deserialize::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&str_date, DATE_FMT).map_err(D::Error::custom)
    }
}
