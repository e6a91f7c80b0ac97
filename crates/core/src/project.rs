//! Projects and the two external collaborators used to resolve them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::monitor::Choice;

/// A project owned by an organization, identified by `(organization, slug)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub organization: String,
    pub slug: String,
    pub name: String,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.slug)
    }
}

/// A named permission checked against a caller for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "project:read")]
    ProjectRead,
    #[serde(rename = "project:write")]
    ProjectWrite,
    #[serde(rename = "project:admin")]
    ProjectAdmin,
}

impl Choice for Capability {
    const CHOICES: &'static [Self] = &[
        Capability::ProjectRead,
        Capability::ProjectWrite,
        Capability::ProjectAdmin,
    ];

    fn token(self) -> &'static str {
        match self {
            Capability::ProjectRead => "project:read",
            Capability::ProjectWrite => "project:write",
            Capability::ProjectAdmin => "project:admin",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Resolves project slugs within an organization scope.
pub trait ProjectDirectory: Send + Sync {
    /// Find the project `slug` owned by `organization`, if any.
    fn find_project(&self, organization: &str, slug: &str) -> Option<Project>;
}

/// Answers capability questions for a single caller.
pub trait ProjectAccess: Send + Sync {
    fn has_project_scope(&self, project: &Project, capability: Capability) -> bool;
}
