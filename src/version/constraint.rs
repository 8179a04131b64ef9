//! Version constraint expressions
//!
//! A constraint is a comma-separated list of clauses which must all hold:
//! - `v1.2.3`, `= v1.2.3` - exact match
//! - `!= v1.2.3` - anything else
//! - `>`, `>=`, `<`, `<=` - comparison operators
//! - `~> v1.2` - pessimistic: `>= v1.2, < v2.0`; `~> v1.2.3` is `>= v1.2.3, < v1.3.0`
//!
//! Comparisons only admit pre-releases when the clause names a pre-release of
//! the same segments, so `>= v1.0.0` never matches `v1.1.0-rc.1`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::ConstraintError;
use crate::version::semver::Version;

static CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(~>|!=|>=|<=|=|>|<)?\s*([^\s,]+)\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Pessimistic,
}

impl Operator {
    fn from_symbol(symbol: Option<&str>) -> Option<Self> {
        match symbol {
            None | Some("=") => Some(Operator::Equal),
            Some("!=") => Some(Operator::NotEqual),
            Some(">") => Some(Operator::Greater),
            Some(">=") => Some(Operator::GreaterOrEqual),
            Some("<") => Some(Operator::Less),
            Some("<=") => Some(Operator::LessOrEqual),
            Some("~>") => Some(Operator::Pessimistic),
            Some(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Pessimistic => "~>",
        }
    }
}

/// A single `<operator> <version>` clause
#[derive(Debug, Clone)]
pub struct Clause {
    operator: Operator,
    version: Version,
}

impl Clause {
    fn parse(clause: &str) -> Result<Self, ConstraintError> {
        let caps = CLAUSE_RE
            .captures(clause)
            .ok_or_else(|| ConstraintError::InvalidClause(clause.trim().to_string()))?;

        let operator = Operator::from_symbol(caps.get(1).map(|m| m.as_str()))
            .ok_or_else(|| ConstraintError::InvalidClause(clause.trim().to_string()))?;

        let version =
            Version::parse(&caps[2]).map_err(|source| ConstraintError::InvalidVersion {
                clause: clause.trim().to_string(),
                source,
            })?;

        Ok(Self { operator, version })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check whether `version` satisfies this clause
    pub fn check(&self, version: &Version) -> bool {
        let ordering = version.cmp(&self.version);
        match self.operator {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::NotEqual => ordering != Ordering::Equal,
            Operator::Greater => self.admits_prerelease(version) && ordering == Ordering::Greater,
            Operator::GreaterOrEqual => {
                self.admits_prerelease(version) && ordering != Ordering::Less
            }
            Operator::Less => self.admits_prerelease(version) && ordering == Ordering::Less,
            Operator::LessOrEqual => {
                self.admits_prerelease(version) && ordering != Ordering::Greater
            }
            Operator::Pessimistic => self.check_pessimistic(version, ordering),
        }
    }

    fn admits_prerelease(&self, version: &Version) -> bool {
        match (self.version.is_prerelease(), version.is_prerelease()) {
            (true, true) => version.cmp_segments(&self.version) == Ordering::Equal,
            (false, true) => false,
            _ => true,
        }
    }

    fn check_pessimistic(&self, version: &Version, ordering: Ordering) -> bool {
        if !self.admits_prerelease(version)
            || (self.version.is_prerelease() && !version.is_prerelease())
        {
            return false;
        }
        if ordering == Ordering::Less {
            return false;
        }

        // Every segment but the last one written is pinned
        let pinned = self.version.segments().len().saturating_sub(1);
        (0..pinned).all(|i| version.segment(i) == self.version.segment(i))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator.as_str(), self.version)
    }
}

/// A conjunction of clauses parsed from an expression like `>= v1.1.0, < v2.0.0`
#[derive(Debug, Clone)]
pub struct Constraints {
    clauses: Vec<Clause>,
}

impl Constraints {
    pub fn parse(expression: &str) -> Result<Self, ConstraintError> {
        if expression.trim().is_empty() {
            return Err(ConstraintError::Empty);
        }

        let clauses = expression
            .split(',')
            .map(Clause::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { clauses })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Check whether `version` satisfies every clause
    pub fn check(&self, version: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.check(version))
    }
}

impl FromStr for Constraints {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
