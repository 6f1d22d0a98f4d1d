use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Kind of study material a resource holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Notes,
    /// Previous-year question paper
    Pyq,
    FormulaSheet,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Notes => "notes",
            ResourceKind::Pyq => "pyq",
            ResourceKind::FormulaSheet => "formula-sheet",
        }
    }

    /// Question papers are catalogued by the exam year they were set in
    pub fn requires_exam_year(&self) -> bool {
        matches!(self, ResourceKind::Pyq)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notes" => Ok(ResourceKind::Notes),
            "pyq" => Ok(ResourceKind::Pyq),
            "formula-sheet" => Ok(ResourceKind::FormulaSheet),
            other => Err(DomainError::InvalidResourceKind(other.to_string())),
        }
    }
}
