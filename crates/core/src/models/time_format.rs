//! Minute-precision wire format for instants, e.g. `2024-09-08 15:00`.
//!
//! Use with `#[serde(with = "time_format")]`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer, de};

pub const FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), FORMAT)
}
