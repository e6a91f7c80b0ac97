//! `[count, unit]` interval schedules.

use serde_json::Value;

use cronmon_core::{Choice, IntervalSchedule, IntervalUnit};

use super::ScheduleError;

pub(super) fn parse(raw: &Value) -> Result<IntervalSchedule, ScheduleError> {
    let Value::Array(items) = raw else {
        return Err(ScheduleError::InvalidShape);
    };
    let [count, unit] = items.as_slice() else {
        return Err(ScheduleError::InvalidShape);
    };

    // as_i64 is None for floats, booleans and out-of-range numbers
    let count = count.as_i64().ok_or(ScheduleError::InvalidFrequency)?;
    let unit = unit
        .as_str()
        .and_then(IntervalUnit::from_token)
        .ok_or(ScheduleError::InvalidInterval)?;

    Ok(IntervalSchedule { count, unit })
}
