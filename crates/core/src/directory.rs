//! File-backed project directory with per-caller capability grants.
//!
//! The directory file is YAML:
//!
//! ```yaml
//! projects:
//!   - organization: acme
//!     slug: backend
//!     name: Backend
//!     grants:
//!       alice: ["project:read", "project:write"]
//!       bob: ["project:read"]
//! ```
//!
//! It is loaded once and is read-only afterwards, so lookups need no locking.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CronmonError, Result};
use crate::project::{Capability, Project, ProjectAccess, ProjectDirectory};

#[derive(Debug, Default, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    projects: Vec<ProjectEntry>,
}

/// One project plus the capabilities each caller holds on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub organization: String,
    pub slug: String,
    /// Display name; defaults to the slug.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grants: BTreeMap<String, Vec<Capability>>,
}

impl ProjectEntry {
    fn project(&self) -> Project {
        Project {
            organization: self.organization.clone(),
            slug: self.slug.clone(),
            name: self.name.clone().unwrap_or_else(|| self.slug.clone()),
        }
    }
}

/// In-memory directory keyed by `(organization, slug)`.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    projects: HashMap<(String, String), ProjectEntry>,
}

impl StaticDirectory {
    /// Build a directory, rejecting duplicate `(organization, slug)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = ProjectEntry>) -> Result<Self> {
        let mut projects = HashMap::new();
        for entry in entries {
            let key = (entry.organization.clone(), entry.slug.clone());
            if projects.contains_key(&key) {
                return Err(CronmonError::DuplicateProject {
                    organization: entry.organization,
                    slug: entry.slug,
                });
            }
            projects.insert(key, entry);
        }
        Ok(Self { projects })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: DirectoryFile = serde_yaml::from_str(yaml)?;
        Self::from_entries(file.projects)
    }

    /// Load the directory file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let directory = Self::from_yaml_str(&yaml)?;
        tracing::info!(
            path = %path.display(),
            projects = directory.len(),
            "project directory loaded"
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Whether any project belongs to `organization`.
    pub fn has_organization(&self, organization: &str) -> bool {
        self.projects.keys().any(|(org, _)| org == organization)
    }

    /// Capability view bound to one caller.
    pub fn access_for(&self, caller: impl Into<String>) -> CallerAccess<'_> {
        CallerAccess {
            directory: self,
            caller: caller.into(),
        }
    }

    fn entry(&self, organization: &str, slug: &str) -> Option<&ProjectEntry> {
        self.projects.get(&(organization.to_string(), slug.to_string()))
    }
}

impl ProjectDirectory for StaticDirectory {
    fn find_project(&self, organization: &str, slug: &str) -> Option<Project> {
        self.entry(organization, slug).map(ProjectEntry::project)
    }
}

/// A caller's grants as recorded in a [`StaticDirectory`].
#[derive(Debug, Clone)]
pub struct CallerAccess<'a> {
    directory: &'a StaticDirectory,
    caller: String,
}

impl ProjectAccess for CallerAccess<'_> {
    fn has_project_scope(&self, project: &Project, capability: Capability) -> bool {
        self.directory
            .entry(&project.organization, &project.slug)
            .and_then(|entry| entry.grants.get(&self.caller))
            .is_some_and(|caps| caps.contains(&capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
projects:
  - organization: acme
    slug: backend
    name: Backend
    grants:
      alice: ["project:read", "project:write"]
      bob: ["project:read"]
  - organization: acme
    slug: frontend
  - organization: globex
    slug: backend
    grants:
      alice: ["project:admin"]
"#;

    #[test]
    fn lookup_is_scoped_to_organization() {
        let dir = StaticDirectory::from_yaml_str(YAML).unwrap();
        assert_eq!(dir.len(), 3);

        let project = dir.find_project("acme", "backend").unwrap();
        assert_eq!(project.name, "Backend");
        assert_eq!(dir.find_project("globex", "backend").unwrap().organization, "globex");
        assert!(dir.find_project("acme", "nonexistent").is_none());
        assert!(dir.find_project("initech", "backend").is_none());
    }

    #[test]
    fn name_defaults_to_slug() {
        let dir = StaticDirectory::from_yaml_str(YAML).unwrap();
        assert_eq!(dir.find_project("acme", "frontend").unwrap().name, "frontend");
    }

    #[test]
    fn grants_are_per_caller_and_per_project() {
        let dir = StaticDirectory::from_yaml_str(YAML).unwrap();
        let backend = dir.find_project("acme", "backend").unwrap();
        let globex = dir.find_project("globex", "backend").unwrap();

        let alice = dir.access_for("alice");
        assert!(alice.has_project_scope(&backend, Capability::ProjectWrite));
        // admin does not imply write
        assert!(!alice.has_project_scope(&globex, Capability::ProjectWrite));

        let bob = dir.access_for("bob");
        assert!(bob.has_project_scope(&backend, Capability::ProjectRead));
        assert!(!bob.has_project_scope(&backend, Capability::ProjectWrite));

        let mallory = dir.access_for("mallory");
        assert!(!mallory.has_project_scope(&backend, Capability::ProjectRead));
    }

    #[test]
    fn duplicate_projects_are_rejected() {
        let yaml = r#"
projects:
  - organization: acme
    slug: backend
  - organization: acme
    slug: backend
"#;
        let err = StaticDirectory::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CronmonError::DuplicateProject { .. }));
    }

    #[test]
    fn unknown_capability_is_a_parse_error() {
        let yaml = r#"
projects:
  - organization: acme
    slug: backend
    grants:
      alice: ["project:delete"]
"#;
        assert!(matches!(
            StaticDirectory::from_yaml_str(yaml),
            Err(CronmonError::Yaml(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.yaml");
        std::fs::write(&path, YAML).unwrap();

        let directory = StaticDirectory::load(&path).unwrap();
        assert!(directory.has_organization("globex"));
        assert!(!directory.has_organization("initech"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticDirectory::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, CronmonError::Io(_)));
    }
}
