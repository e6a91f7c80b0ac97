//! Subcommand implementations.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use cronmon_core::{
    Config, CronmonError, MonitorConfig, MonitorStatus, MonitorType, ProjectDirectory,
    StaticDirectory,
};
use cronmon_validation::schedule::crontab::ALIASES;
use cronmon_validation::{
    FieldErrors, MonitorValidator, RawFields, UpdateContext, ValidatedMonitor, ValidationContext,
};

use crate::cli::ValidateArgs;

/// Result of a `validate` run that got as far as the validator.
#[derive(Debug)]
pub enum Outcome {
    Valid(ValidatedMonitor),
    Invalid(FieldErrors),
}

impl Outcome {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = match (self, pretty) {
            (Outcome::Valid(monitor), true) => serde_json::to_string_pretty(monitor)?,
            (Outcome::Valid(monitor), false) => serde_json::to_string(monitor)?,
            (Outcome::Invalid(errors), true) => serde_json::to_string_pretty(errors)?,
            (Outcome::Invalid(errors), false) => serde_json::to_string(errors)?,
        };
        Ok(json)
    }
}

/// A stored monitor in wire form, as `--existing` provides it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredMonitor {
    project: String,
    name: String,
    #[serde(default)]
    status: MonitorStatus,
    #[serde(rename = "type")]
    monitor_type: MonitorType,
    config: MonitorConfig,
}

pub fn validate(args: &ValidateArgs, config: &Config) -> Result<Outcome> {
    let organization = args
        .organization
        .clone()
        .or_else(|| config.scope.organization.clone())
        .context("no organization scope: pass --organization or set ORGANIZATION")?;
    let caller = args
        .caller
        .clone()
        .or_else(|| config.scope.caller.clone())
        .context("no caller: pass --caller or set CALLER")?;

    let directory_path = args
        .directory
        .clone()
        .unwrap_or_else(|| config.directory.path.clone());
    let directory = StaticDirectory::load(&directory_path).with_context(|| {
        format!("failed to load project directory {}", directory_path.display())
    })?;
    if !directory.has_organization(&organization) {
        return Err(CronmonError::UnknownOrganization(organization).into());
    }

    let payload = read_fields(&args.payload)?;
    let update = match &args.existing {
        Some(path) => Some(load_existing(path, &directory, &organization)?),
        None => None,
    };

    info!(
        organization = %organization,
        caller = %caller,
        update = update.is_some(),
        "validating monitor payload"
    );

    let access = directory.access_for(caller.as_str());
    let ctx = ValidationContext {
        organization: &organization,
        access: &access,
    };
    let outcome = match MonitorValidator::new(&directory).validate(&payload, &ctx, update.as_ref())
    {
        Ok(monitor) => Outcome::Valid(monitor),
        Err(errors) => Outcome::Invalid(errors),
    };
    Ok(outcome)
}

/// Render the alias table, one `alias expansion` pair per line.
pub fn aliases() -> String {
    let width = ALIASES.iter().map(|(alias, _)| alias.len()).max().unwrap_or(0);
    ALIASES
        .iter()
        .map(|(alias, expr)| format!("{alias:<width$}  {expr}\n"))
        .collect()
}

/// Read a JSON object from `source` (`-` means stdin).
fn read_fields(source: &str) -> Result<RawFields> {
    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read payload {source}"))?
    };
    parse_fields(&json)
}

fn parse_fields(json: &str) -> Result<RawFields> {
    match serde_json::from_str(json).context("payload is not valid JSON")? {
        Value::Object(fields) => Ok(fields),
        other => bail!("monitor payload must be a JSON object, got {}", other),
    }
}

/// Build the update overlay from a stored monitor file.
fn load_existing(path: &Path, directory: &StaticDirectory, organization: &str) -> Result<UpdateContext> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stored monitor {}", path.display()))?;
    let stored: StoredMonitor = serde_json::from_str(&json)
        .with_context(|| format!("stored monitor {} is malformed", path.display()))?;

    let project = directory
        .find_project(organization, &stored.project)
        .with_context(|| {
            format!(
                "stored monitor references unknown project '{}' in '{}'",
                stored.project, organization
            )
        })?;
    debug!(project = %project, "loaded stored monitor");

    Ok(UpdateContext {
        project: Some(project),
        name: Some(stored.name),
        status: Some(stored.status),
        monitor_type: Some(stored.monitor_type),
        config: Some(stored.config),
    })
}
