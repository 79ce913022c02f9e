use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;

/// Output format of sampled dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted input format with a time of day.
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while building a date range.
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
	/// The input is neither `YYYY-MM-DD` nor `YYYY-MM-DD HH:MM:SS`
	#[error("Invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
	InvalidDate(String),
}

/// Inclusive range of instants sampled with day granularity.
///
/// # Invariants
/// - `start <= end`, the constructors swap reversed bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
	start: NaiveDateTime,
	end: NaiveDateTime,
}

impl DateRange {
	/// Creates a range between two dates, in any order.
	pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
		Self::between(a.and_time(NaiveTime::MIN), b.and_time(NaiveTime::MIN))
	}

	/// Creates a range between two instants, in any order.
	pub fn between(a: NaiveDateTime, b: NaiveDateTime) -> Self {
		if b < a {
			log::debug!("date range {a} .. {b} is reversed, swapping bounds");
			Self { start: b, end: a }
		} else {
			Self { start: a, end: b }
		}
	}

	/// A range covering a single day.
	pub fn day(date: NaiveDate) -> Self {
		Self::new(date, date)
	}

	/// Parses both bounds and builds the range.
	///
	/// # Errors
	/// Returns `InvalidDate` if a bound cannot be parsed.
	pub fn parse(min: &str, max: &str) -> Result<Self, RangeError> {
		Ok(Self::between(parse_instant(min)?, parse_instant(max)?))
	}

	pub fn start(&self) -> NaiveDate {
		self.start.date()
	}

	pub fn end(&self) -> NaiveDate {
		self.end.date()
	}

	/// Number of whole days between the bounds.
	pub fn span_days(&self) -> i64 {
		(self.end - self.start).num_days()
	}

	/// Draws a date uniformly: the start plus `[0, span]` whole days.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> NaiveDate {
		let offset = rng.random_range(0..=self.span_days());
		(self.start + Duration::days(offset)).date()
	}
}

/// Current local date.
pub fn today() -> NaiveDate {
	chrono::Local::now().date_naive()
}

/// Draws a random date between two bounds, formatted as `YYYY-MM-DD`.
///
/// Reversed bounds are swapped.
///
/// # Errors
/// Returns `InvalidDate` if a bound cannot be parsed.
pub fn random_date<R: Rng>(rng: &mut R, min: &str, max: &str) -> Result<String, RangeError> {
	let range = DateRange::parse(min, max)?;
	Ok(range.sample(rng).format(DATE_FORMAT).to_string())
}

/// Parses a date or a date with time of day.
fn parse_instant(input: &str) -> Result<NaiveDateTime, RangeError> {
	let input = input.trim();
	if let Ok(instant) = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT) {
		return Ok(instant);
	}
	NaiveDate::parse_from_str(input, DATE_FORMAT)
		.map(|date| date.and_time(NaiveTime::MIN))
		.map_err(|_| RangeError::InvalidDate(input.to_owned()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn date(s: &str) -> NaiveDate {
		NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
	}

	#[test]
	fn samples_stay_in_range_and_hit_both_ends() {
		let mut rng = StdRng::seed_from_u64(42);
		let (mut first, mut last) = (0, 0);
		for _ in 0..10_000 {
			let value = random_date(&mut rng, "2024-01-01", "2024-01-10").unwrap();
			assert!(value.as_str() >= "2024-01-01" && value.as_str() <= "2024-01-10", "{value}");
			if value == "2024-01-01" {
				first += 1;
			}
			if value == "2024-01-10" {
				last += 1;
			}
		}
		assert!(first > 0);
		assert!(last > 0);
	}

	#[test]
	fn reversed_bounds_are_normalized() {
		let range = DateRange::parse("2024-03-10", "2024-03-01").unwrap();
		assert_eq!(range.start(), date("2024-03-01"));
		assert_eq!(range.end(), date("2024-03-10"));

		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..1_000 {
			let sampled = range.sample(&mut rng);
			assert!(sampled >= range.start() && sampled <= range.end());
		}
	}

	#[test]
	fn single_day_range_returns_that_day() {
		let mut rng = StdRng::seed_from_u64(5);
		let range = DateRange::day(date("2020-02-29"));
		assert_eq!(range.span_days(), 0);
		assert_eq!(range.sample(&mut rng), date("2020-02-29"));
	}

	#[test]
	fn partial_days_are_floored() {
		let range = DateRange::parse("2024-01-01 23:00:00", "2024-01-02 01:00:00").unwrap();
		assert_eq!(range.span_days(), 0);
		let mut rng = StdRng::seed_from_u64(5);
		assert_eq!(range.sample(&mut rng), date("2024-01-01"));
	}

	#[test]
	fn invalid_dates_are_rejected() {
		let mut rng = StdRng::seed_from_u64(5);
		assert!(matches!(
			random_date(&mut rng, "2024-13-01", "2024-01-01"),
			Err(RangeError::InvalidDate(value)) if value == "2024-13-01"
		));
	}
}
