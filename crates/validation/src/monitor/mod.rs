//! Top-level monitor validation.
//!
//! Checks `project`, `name`, `status` and `type`, then hands the nested
//! `config` mapping to the configuration validator selected by the resolved
//! monitor type. Errors from independent fields are collected together;
//! nested configuration errors are reported under `config.<field>` keys.


use serde::Serialize;
use serde_json::Value;

use cronmon_core::{
    Capability, MonitorConfig, MonitorStatus, MonitorType, Project, ProjectAccess,
    ProjectDirectory, ScheduleDefinition,
};

use crate::errors::FieldErrors;
use crate::fields::{choice_field, kind_name, present, require, string_field, RawFields, REQUIRED};
use crate::schedule::ScheduleValidator;

pub(crate) const PROJECT: &str = "project";
pub(crate) const NAME: &str = "name";
pub(crate) const STATUS: &str = "status";
pub(crate) const TYPE: &str = "type";
pub(crate) const CONFIG: &str = "config";

pub(crate) const INVALID_PROJECT: &str = "Invalid project";
pub(crate) const INSUFFICIENT_ACCESS: &str = "Insufficient access to project";

/// Validates the type-specific `config` mapping of a monitor.
///
/// One implementation exists per [`MonitorType`] variant.
pub trait ConfigValidator {
    type Output;

    /// `existing` is the stored configuration when validating an update.
    fn validate(
        &self,
        fields: &RawFields,
        existing: Option<&Self::Output>,
    ) -> Result<Self::Output, FieldErrors>;
}

/// Who is asking, and within which organization.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Organization slug that project lookups are scoped to.
    pub organization: &'a str,
    /// Capability checks for the calling user.
    pub access: &'a dyn ProjectAccess,
}

/// Stored values reused for fields an update request leaves out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateContext {
    pub project: Option<Project>,
    pub name: Option<String>,
    pub status: Option<MonitorStatus>,
    pub monitor_type: Option<MonitorType>,
    pub config: Option<MonitorConfig>,
}

impl UpdateContext {
    /// Overlay every field from a previously validated monitor.
    pub fn from_monitor(monitor: &ValidatedMonitor) -> Self {
        Self {
            project: Some(monitor.project.clone()),
            name: Some(monitor.name.clone()),
            status: Some(monitor.status),
            monitor_type: Some(monitor.monitor_type),
            config: Some(monitor.config.clone()),
        }
    }
}

/// A fully validated, normalized monitor ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMonitor {
    pub project: Project,
    pub name: String,
    pub status: MonitorStatus,
    pub monitor_type: MonitorType,
    pub config: MonitorConfig,
}

impl ValidatedMonitor {
    /// The schedule of a scheduled-job monitor.
    pub fn schedule(&self) -> Option<&ScheduleDefinition> {
        match &self.config {
            MonitorConfig::ScheduledJob(schedule) => Some(schedule),
        }
    }
}

/// Wire form: the project is rendered as its slug and enums as their tokens.
#[derive(Serialize)]
struct MonitorFields<'a> {
    project: &'a str,
    name: &'a str,
    status: MonitorStatus,
    #[serde(rename = "type")]
    monitor_type: MonitorType,
    config: &'a MonitorConfig,
}

impl Serialize for ValidatedMonitor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MonitorFields {
            project: &self.project.slug,
            name: &self.name,
            status: self.status,
            monitor_type: self.monitor_type,
            config: &self.config,
        }
        .serialize(serializer)
    }
}

/// Validates monitor create and update requests against a project directory.
pub struct MonitorValidator<'a> {
    projects: &'a dyn ProjectDirectory,
}

impl<'a> MonitorValidator<'a> {
    pub fn new(projects: &'a dyn ProjectDirectory) -> Self {
        Self { projects }
    }

    /// Validate raw monitor fields.
    ///
    /// `update` is `None` for a create. For an update it carries the stored
    /// values, which stand in for any field the request omits.
    pub fn validate(
        &self,
        fields: &RawFields,
        ctx: &ValidationContext<'_>,
        update: Option<&UpdateContext>,
    ) -> Result<ValidatedMonitor, FieldErrors> {
        tracing::debug!(
            organization = ctx.organization,
            update = update.is_some(),
            fields = ?fields.keys().collect::<Vec<_>>(),
            "Validating monitor..."
        );

        let overlay = update.cloned().unwrap_or_default();
        let mut errors = FieldErrors::new();

        let name = require(
            &mut errors,
            NAME,
            string_field(fields, NAME).map(|name| name.map(str::to_string)),
            overlay.name,
        );

        let status = match choice_field::<MonitorStatus>(fields, STATUS) {
            Ok(status) => Some(status.or(overlay.status).unwrap_or_default()),
            Err(message) => {
                errors.add(STATUS, message);
                None
            }
        };

        let monitor_type = require(
            &mut errors,
            TYPE,
            choice_field::<MonitorType>(fields, TYPE),
            overlay.monitor_type,
        );

        let config = monitor_type.and_then(|monitor_type| {
            validate_config(monitor_type, fields, overlay.config.as_ref(), &mut errors)
        });

        let project = self.resolve_project(fields, ctx, overlay.project, &mut errors);

        match (project, name, status, monitor_type, config) {
            (Some(project), Some(name), Some(status), Some(monitor_type), Some(config))
                if errors.is_empty() =>
            {
                tracing::debug!(
                    project = %project,
                    monitor_type = %monitor_type,
                    "monitor validated"
                );
                Ok(ValidatedMonitor {
                    project,
                    name,
                    status,
                    monitor_type,
                    config,
                })
            }
            _ => {
                debug_assert!(!errors.is_empty());
                tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "monitor rejected");
                Err(errors)
            }
        }
    }

    /// Resolve the project within the caller's organization and check write access.
    fn resolve_project(
        &self,
        fields: &RawFields,
        ctx: &ValidationContext<'_>,
        stored: Option<Project>,
        errors: &mut FieldErrors,
    ) -> Option<Project> {
        let project = match string_field(fields, PROJECT) {
            Ok(Some(slug)) => self
                .projects
                .find_project(ctx.organization, slug)
                .filter(|project| project.organization == ctx.organization),
            Ok(None) => match stored {
                Some(project) => Some(project).filter(|p| p.organization == ctx.organization),
                None => {
                    errors.add(PROJECT, REQUIRED);
                    return None;
                }
            },
            Err(message) => {
                errors.add(PROJECT, message);
                return None;
            }
        };

        let Some(project) = project else {
            tracing::debug!(organization = ctx.organization, "project not found in scope");
            errors.add(PROJECT, INVALID_PROJECT);
            return None;
        };

        if !ctx.access.has_project_scope(&project, Capability::ProjectWrite) {
            tracing::warn!(
                project = %project,
                capability = %Capability::ProjectWrite,
                "caller lacks capability on project"
            );
            errors.add(PROJECT, INSUFFICIENT_ACCESS);
            return None;
        }

        Some(project)
    }
}

/// Dispatch the nested `config` mapping to the validator for `monitor_type`.
fn validate_config(
    monitor_type: MonitorType,
    fields: &RawFields,
    stored: Option<&MonitorConfig>,
    errors: &mut FieldErrors,
) -> Option<MonitorConfig> {
    // a stored config only carries over while the monitor keeps its type
    let stored = stored.filter(|config| config.monitor_type() == monitor_type);

    let nested = match present(fields, CONFIG) {
        None => {
            if stored.is_none() {
                errors.add(CONFIG, REQUIRED);
            }
            return stored.cloned();
        }
        Some(Value::Object(nested)) => nested,
        Some(other) => {
            errors.add(
                CONFIG,
                format!("Invalid data. Expected a dictionary, but got {}.", kind_name(other)),
            );
            return None;
        }
    };

    let validated = match monitor_type {
        MonitorType::ScheduledJob => {
            let stored = stored.map(|config| match config {
                MonitorConfig::ScheduledJob(schedule) => schedule,
            });
            ScheduleValidator
                .validate(nested, stored)
                .map(MonitorConfig::ScheduledJob)
        }
    };

    match validated {
        Ok(config) => Some(config),
        Err(nested_errors) => {
            errors.extend_nested(CONFIG, nested_errors);
            None
        }
    }
}
