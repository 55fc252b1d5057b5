use chrono::NaiveDate;

/// Format used for transaction dates, both on disk and on input.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Older ledgers may contain ISO dates; these are accepted when loading.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `MM-DD-YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date written by a user. Only `MM-DD-YYYY` is accepted.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}

/// Parse a date read back from storage: `MM-DD-YYYY`, falling back to ISO.
pub fn parse_stored_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .or_else(|err| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).map_err(|_| err))
}

/// Serde adapter for `NaiveDate` fields stored as `MM-DD-YYYY`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_stored_date(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
    }
}
