mod parse;

pub use parse::{parse_dependency, parse_dependency_list};

use crate::error::StatusDbError;
use std::{fmt, str::FromStr};

/// Relation operators allowed inside a dependency's parentheses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionOp {
    /// `<<`
    StrictlyEarlier,
    /// `<=`
    EarlierOrEqual,
    /// `=`
    Exactly,
    /// `>=`
    LaterOrEqual,
    /// `>>`
    StrictlyLater,
    // Obsolete forms still accepted by dpkg, both mean "or equal"
    /// `<`
    Earlier,
    /// `>`
    Later,
}

impl VersionOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOp::StrictlyEarlier => "<<",
            VersionOp::EarlierOrEqual => "<=",
            VersionOp::Exactly => "=",
            VersionOp::LaterOrEqual => ">=",
            VersionOp::StrictlyLater => ">>",
            VersionOp::Earlier => "<",
            VersionOp::Later => ">",
        }
    }
}

impl fmt::Display for VersionOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single package requirement, like `libc6 (>= 2.34)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencySpec {
    name: String,
    // Operator and version always come together
    relation: Option<(VersionOp, String)>,
}

impl DependencySpec {
    pub fn new(name: &str) -> Self {
        DependencySpec {
            name: name.to_owned(),
            relation: None,
        }
    }

    pub fn with_relation(name: &str, op: VersionOp, version: &str) -> Self {
        DependencySpec {
            name: name.to_owned(),
            relation: Some((op, version.to_owned())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op(&self) -> Option<VersionOp> {
        self.relation.as_ref().map(|(op, _)| *op)
    }

    pub fn version(&self) -> Option<&str> {
        self.relation.as_ref().map(|(_, ver)| ver.as_str())
    }
}

impl FromStr for DependencySpec {
    type Err = StatusDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dependency(s)
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some((op, ver)) = &self.relation {
            write!(f, " ({} {})", op, ver)?;
        }
        Ok(())
    }
}

/// A group of specs separated by `|`. Any one of them satisfies the group,
/// earlier ones are preferred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyAlternatives(Vec<DependencySpec>);

impl DependencyAlternatives {
    pub fn new(specs: Vec<DependencySpec>) -> Self {
        DependencyAlternatives(specs)
    }

    pub fn specs(&self) -> &[DependencySpec] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencySpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencyAlternatives {
    type Item = &'a DependencySpec;
    type IntoIter = std::slice::Iter<'a, DependencySpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DependencyAlternatives {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, spec) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

/// Format a full dependency list the way it appears in a control file
pub fn display_list(list: &[DependencyAlternatives]) -> String {
    list.iter()
        .map(|alt| alt.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
