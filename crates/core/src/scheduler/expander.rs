//! # Occurrence Expander
//!
//! Turns a weekly recurring pattern into concrete occurrences. Each start
//! time is converted with the zone's offset on that particular date, so
//! occurrences on either side of a daylight-saving transition keep their
//! requested local start and their requested length.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::{
    errors::{HubError, HubResult},
    models::generation::{GenerationRequest, Occurrence},
    settings::GeneratorSettings,
};

/// A validated, typed view of the scheduling fields of a `GenerationRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrencePattern {
    start_date: NaiveDate,
    end_date: NaiveDate,
    weekdays: BTreeSet<u32>,
    start_time: NaiveTime,
    end_time: NaiveTime,
    timezone: Tz,
}

impl RecurrencePattern {
    /// Validates the request's dates, weekdays, times and timezone.
    ///
    /// # Errors
    ///
    /// * `HubError::InvalidRequest` - reversed or oversized date range, empty or
    ///   out-of-range weekday set, malformed time, end time not after start
    ///   time, or an unknown IANA timezone
    pub fn parse(request: &GenerationRequest, settings: &GeneratorSettings) -> HubResult<Self> {
        if request.start_date > request.end_date {
            return Err(HubError::invalid(format!(
                "startDate {} is after endDate {}",
                request.start_date, request.end_date
            )));
        }

        let span_days = (request.end_date - request.start_date).num_days() + 1;
        if span_days > settings.max_range_days {
            return Err(HubError::invalid(format!(
                "Date range covers {} days, the maximum is {}",
                span_days, settings.max_range_days
            )));
        }

        // The fetch window ends at midnight after endDate
        if request.end_date.succ_opt().is_none() {
            return Err(HubError::invalid("endDate is out of range"));
        }

        if request.weekdays.is_empty() {
            return Err(HubError::invalid("At least one weekday must be selected"));
        }
        let mut weekdays = BTreeSet::new();
        for &day in &request.weekdays {
            if !(1..=7).contains(&day) {
                return Err(HubError::invalid(format!(
                    "Weekday {} is out of range, expected 1 (Monday) to 7 (Sunday)",
                    day
                )));
            }
            weekdays.insert(u32::from(day));
        }

        let start_time = parse_time(&request.start_time, "startTime")?;
        let end_time = parse_time(&request.end_time, "endTime")?;
        if end_time <= start_time {
            return Err(HubError::invalid(format!(
                "endTime {} must be after startTime {}",
                request.end_time, request.start_time
            )));
        }

        let timezone = Tz::from_str(request.timezone.trim())
            .map_err(|_| HubError::invalid(format!("Unknown timezone: {}", request.timezone)))?;

        Ok(Self {
            start_date: request.start_date,
            end_date: request.end_date,
            weekdays,
            start_time,
            end_time,
            timezone,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Occurrences in ascending local-date order.
    ///
    /// Only the start is resolved against the zone; the end is the start plus
    /// the requested wall-clock length, so every occurrence lasts exactly
    /// `end_time - start_time` even on transition days.
    pub fn occurrences(&self) -> HubResult<Vec<Occurrence>> {
        let length = self.end_time - self.start_time;
        let mut occurrences = Vec::new();

        for date in self.start_date.iter_days().take_while(|date| *date <= self.end_date) {
            if !self.weekdays.contains(&date.weekday().number_from_monday()) {
                continue;
            }

            let start_at_utc = self.to_utc(date.and_time(self.start_time))?;
            occurrences.push(Occurrence {
                local_date: date,
                start_at_utc,
                end_at_utc: start_at_utc + length,
            });
        }

        Ok(occurrences)
    }

    /// UTC window `[startDate 00:00, endDate + 1 day 00:00)` in the pattern's
    /// zone. Depends only on the request, so preview and commit fetch the same
    /// existing sessions.
    pub fn fetch_window(&self) -> HubResult<(DateTime<Utc>, DateTime<Utc>)> {
        let after_end = self
            .end_date
            .succ_opt()
            .ok_or_else(|| HubError::invalid("endDate is out of range"))?;

        let from = self.to_utc(self.start_date.and_time(NaiveTime::MIN))?;
        let to = self.to_utc(after_end.and_time(NaiveTime::MIN))?;
        Ok((from, to))
    }

    /// Converts a wall-clock time using the zone's offset on that date.
    ///
    /// Ambiguous times (fall-back fold) take the earlier instant. Times that
    /// fall into a spring-forward gap move one hour later.
    fn to_utc(&self, local: NaiveDateTime) -> HubResult<DateTime<Utc>> {
        match self.timezone.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => self
                .timezone
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| {
                    HubError::invalid(format!(
                        "Local time {} does not exist in {}",
                        local, self.timezone.name()
                    ))
                }),
        }
    }
}

/// Expands a request into its occurrences.
///
/// Pure and deterministic: the same request always yields the same sequence,
/// in ascending local-date order. A range without any selected weekday gives
/// an empty sequence.
pub fn expand(request: &GenerationRequest, settings: &GeneratorSettings) -> HubResult<Vec<Occurrence>> {
    RecurrencePattern::parse(request, settings)?.occurrences()
}

fn parse_time(value: &str, field: &str) -> HubResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| HubError::invalid(format!("{} must be HH:MM, got '{}'", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_minutes_and_seconds() {
        assert_eq!(
            parse_time("09:30", "startTime").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time(" 17:45:10 ", "endTime").unwrap(),
            NaiveTime::from_hms_opt(17, 45, 10).unwrap()
        );
    }

    #[test]
    fn parse_time_rejects_garbage() {
        let err = parse_time("9am", "startTime").unwrap_err();
        assert!(err.to_string().contains("startTime must be HH:MM"));
    }
}
