//! Monitor configuration validation.
//!
//! This crate provides:
//! - [`ScheduleValidator`]: `schedule_type` + `schedule` checks, crontab alias
//!   expansion and interval shape validation
//! - [`MonitorValidator`]: top-level monitor fields, project resolution with a
//!   `project:write` check, and type-driven delegation of the nested `config`
//! - [`FieldErrors`]: field-keyed failure messages returned by both validators

mod errors;
mod fields;
pub mod monitor;
pub mod schedule;

pub use errors::FieldErrors;
pub use fields::RawFields;
pub use monitor::{
    ConfigValidator, MonitorValidator, UpdateContext, ValidatedMonitor, ValidationContext,
};
pub use schedule::{ScheduleError, ScheduleValidator};
