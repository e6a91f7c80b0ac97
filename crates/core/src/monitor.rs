//! Monitor domain types and their closed token tables.
//!
//! Every enum here maps to a fixed set of wire tokens. The mapping is
//! bidirectional: [`Choice::token`] is an exhaustive match, and parsing is
//! derived from [`Choice::CHOICES`], so serde, `Display` and `FromStr` all
//! agree on the same spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A closed, bidirectional mapping between enum variants and wire tokens.
pub trait Choice: Copy + Sized + 'static {
    /// Every variant, in presentation order.
    const CHOICES: &'static [Self];

    /// The wire token for this variant.
    fn token(self) -> &'static str;

    /// Look up a variant by its exact wire token.
    fn from_token(token: &str) -> Option<Self> {
        Self::CHOICES.iter().copied().find(|c| c.token() == token)
    }
}

fn parse_choice<T: Choice>(s: &str, what: &str) -> std::result::Result<T, String> {
    T::from_token(s).ok_or_else(|| format!("unknown {}: '{}'", what, s))
}

// ── Monitor type ────────────────────────────────────────────────────

/// Kind of monitor. Selects which configuration validator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitorType {
    #[serde(rename = "cron_job")]
    ScheduledJob,
}

impl Choice for MonitorType {
    const CHOICES: &'static [Self] = &[MonitorType::ScheduledJob];

    fn token(self) -> &'static str {
        match self {
            MonitorType::ScheduledJob => "cron_job",
        }
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for MonitorType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_choice(s, "monitor type")
    }
}

// ── Monitor status ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorStatus {
    #[default]
    Active,
    Disabled,
}

impl Choice for MonitorStatus {
    const CHOICES: &'static [Self] = &[MonitorStatus::Active, MonitorStatus::Disabled];

    fn token(self) -> &'static str {
        match self {
            MonitorStatus::Active => "active",
            MonitorStatus::Disabled => "disabled",
        }
    }
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for MonitorStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_choice(s, "monitor status")
    }
}

// ── Schedule type ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Crontab,
    Interval,
}

impl Choice for ScheduleType {
    const CHOICES: &'static [Self] = &[ScheduleType::Crontab, ScheduleType::Interval];

    fn token(self) -> &'static str {
        match self {
            ScheduleType::Crontab => "crontab",
            ScheduleType::Interval => "interval",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ScheduleType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_choice(s, "schedule type")
    }
}

// ── Interval unit ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

impl Choice for IntervalUnit {
    const CHOICES: &'static [Self] = &[
        IntervalUnit::Year,
        IntervalUnit::Month,
        IntervalUnit::Week,
        IntervalUnit::Day,
        IntervalUnit::Hour,
        IntervalUnit::Minute,
    ];

    fn token(self) -> &'static str {
        match self {
            IntervalUnit::Year => "year",
            IntervalUnit::Month => "month",
            IntervalUnit::Week => "week",
            IntervalUnit::Day => "day",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Minute => "minute",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_choice(s, "interval unit")
    }
}

// ── Schedule definition ─────────────────────────────────────────────

/// A fixed-interval schedule: every `count` `unit`s.
///
/// On the wire this is the two-element sequence `[count, unit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, IntervalUnit)", into = "(i64, IntervalUnit)")]
pub struct IntervalSchedule {
    pub count: i64,
    pub unit: IntervalUnit,
}

impl From<(i64, IntervalUnit)> for IntervalSchedule {
    fn from((count, unit): (i64, IntervalUnit)) -> Self {
        Self { count, unit }
    }
}

impl From<IntervalSchedule> for (i64, IntervalUnit) {
    fn from(interval: IntervalSchedule) -> Self {
        (interval.count, interval.unit)
    }
}

/// A normalized schedule, tagged by its `schedule_type`.
///
/// Serializes as `{"schedule_type": "crontab", "schedule": "0 0 * * *"}` or
/// `{"schedule_type": "interval", "schedule": [5, "minute"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schedule_type", content = "schedule", rename_all = "snake_case")]
pub enum ScheduleDefinition {
    /// A 5-field crontab expression with aliases already expanded.
    Crontab(String),
    Interval(IntervalSchedule),
}

impl ScheduleDefinition {
    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            ScheduleDefinition::Crontab(_) => ScheduleType::Crontab,
            ScheduleDefinition::Interval(_) => ScheduleType::Interval,
        }
    }
}

impl fmt::Display for ScheduleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleDefinition::Crontab(expr) => write!(f, "crontab '{}'", expr),
            ScheduleDefinition::Interval(i) => write!(f, "every {} {}(s)", i.count, i.unit),
        }
    }
}

/// Type-specific monitor configuration. One variant per [`MonitorType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonitorConfig {
    ScheduledJob(ScheduleDefinition),
}

impl MonitorConfig {
    pub fn monitor_type(&self) -> MonitorType {
        match self {
            MonitorConfig::ScheduledJob(_) => MonitorType::ScheduledJob,
        }
    }
}
