//! Serde adapter for item timestamps.
//!
//! Items are written as RFC 3339. Reading also accepts the `YYYY-MM-DD HH:MM:SS` form that
//! SQLite's `CURRENT_TIMESTAMP` produces, interpreted as UTC.

use serde::{Deserialize, Deserializer, Serializer};
use time::{
	OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
	macros::format_description,
};

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse(&raw).map_err(serde::de::Error::custom)
}

pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
	let trimmed = raw.trim();

	if let Ok(value) = OffsetDateTime::parse(trimmed, &Rfc3339) {
		return Ok(value);
	}

	let sqlite = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

	PrimitiveDateTime::parse(trimmed, &sqlite).map(PrimitiveDateTime::assume_utc)
}
