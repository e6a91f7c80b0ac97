//! Schedule validation for scheduled-job monitors.
//!
//! Checks the `schedule_type` + `schedule` pair and produces a normalized
//! [`ScheduleDefinition`]: crontab strings are trimmed and `@` aliases expanded,
//! interval schedules are checked for the `[count, unit]` shape. The first
//! failure ends validation, so at most one message is reported.

pub mod crontab;
mod interval;


use cronmon_core::{ScheduleDefinition, ScheduleType};

use crate::errors::FieldErrors;
use crate::fields::{choice_field, present, RawFields, REQUIRED};
use crate::monitor::ConfigValidator;

pub(crate) const SCHEDULE_TYPE: &str = "schedule_type";
pub(crate) const SCHEDULE: &str = "schedule";

/// Why a `schedule` value was rejected. The display text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Wrong structural type for the selected schedule type.
    #[error("Invalid value for schedule_type")]
    InvalidShape,
    /// Interval count is not an integer.
    #[error("Invalid value for schedule frequency")]
    InvalidFrequency,
    /// Interval unit is not one of the known names.
    #[error("Invalid value for schedule interval")]
    InvalidInterval,
    /// Unknown alias or bad crontab syntax.
    #[error("Schedule was not parseable")]
    NotParseable,
}

/// Validates the `schedule_type` + `schedule` pair of a scheduled-job monitor.
///
/// On update, `existing` is the stored schedule. Its type is used when the
/// request omits `schedule_type`, and the whole schedule is kept when the
/// request omits `schedule` without changing type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleValidator;

impl ConfigValidator for ScheduleValidator {
    type Output = ScheduleDefinition;

    fn validate(
        &self,
        fields: &RawFields,
        existing: Option<&ScheduleDefinition>,
    ) -> Result<ScheduleDefinition, FieldErrors> {
        let schedule_type = match choice_field::<ScheduleType>(fields, SCHEDULE_TYPE) {
            Ok(Some(schedule_type)) => schedule_type,
            Ok(None) => match existing {
                Some(stored) => stored.schedule_type(),
                None => return Err(FieldErrors::single(SCHEDULE_TYPE, REQUIRED)),
            },
            Err(message) => {
                tracing::debug!(%message, "schedule_type rejected");
                return Err(FieldErrors::single(SCHEDULE_TYPE, message));
            }
        };

        let Some(raw) = present(fields, SCHEDULE) else {
            return match existing {
                Some(stored) if stored.schedule_type() == schedule_type => Ok(stored.clone()),
                _ => Err(FieldErrors::single(SCHEDULE, REQUIRED)),
            };
        };

        let normalized = match schedule_type {
            ScheduleType::Crontab => crontab::normalize(raw).map(ScheduleDefinition::Crontab),
            ScheduleType::Interval => interval::parse(raw).map(ScheduleDefinition::Interval),
        };

        match normalized {
            Ok(definition) => {
                tracing::debug!(schedule = %definition, "schedule accepted");
                Ok(definition)
            }
            Err(err) => {
                tracing::debug!(%schedule_type, schedule = %raw, error = %err, "schedule rejected");
                Err(FieldErrors::single(SCHEDULE, err.to_string()))
            }
        }
    }
}
