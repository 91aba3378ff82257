//! Time helpers: response timestamps and receipt time in the business timezone

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Current UTC time for response bodies
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Receipt time: the request timestamp when given, otherwise now
///
/// Either way the result is shown in the business timezone.
pub fn receipt_time(timestamp: Option<&str>, tz: Tz) -> AppResult<DateTime<Tz>> {
    match timestamp.map(str::trim).filter(|s| !s.is_empty()) {
        Some(ts) => DateTime::parse_from_rfc3339(ts)
            .map(|dt| dt.with_timezone(&tz))
            .map_err(|_| AppError::validation(format!("Invalid timestamp: {}", ts))),
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}
