//! Composite identifier codec
//!
//! Declared objects persist exactly one string across passes: a composite
//! identifier joining the object's identity tuple with a reserved
//! separator. The separator is never valid inside a component (enforced by
//! upstream field validation), so the codec does no escaping and no
//! normalization. The encoding is a compatibility surface; changing it
//! breaks every persisted identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator joining identity components inside a composite id.
pub const ID_SEPARATOR: char = ':';

/// A composite id did not split into the expected number of components.
///
/// Always fatal: it indicates corrupted or foreign-origin state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expecting {expected} id tokens, got {got}")]
pub struct IdFormatError {
    pub expected: usize,
    pub got: usize,
}

/// Join identity components into a composite id.
pub fn join_id<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let parts: Vec<&str> = parts.into_iter().collect();
    parts.join(&ID_SEPARATOR.to_string())
}

/// Split a composite id into exactly `expected` components.
pub fn split_id(value: &str, expected: usize) -> Result<Vec<&str>, IdFormatError> {
    let tokens: Vec<&str> = value.split(ID_SEPARATOR).collect();
    if tokens.len() != expected {
        return Err(IdFormatError {
            expected,
            got: tokens.len(),
        });
    }
    Ok(tokens)
}

/// Identity of a certificate: `<rulestack>:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId {
    pub rulestack: String,
    pub name: String,
}

impl CertificateId {
    pub fn new(rulestack: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rulestack: rulestack.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_id([self.rulestack.as_str(), self.name.as_str()]))
    }
}

impl FromStr for CertificateId {
    type Err = IdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = split_id(s, 2)?;
        Ok(Self::new(tokens[0], tokens[1]))
    }
}

/// Identity of a custom URL category: `<rulestack>:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlCategoryId {
    pub rulestack: String,
    pub name: String,
}

impl UrlCategoryId {
    pub fn new(rulestack: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rulestack: rulestack.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for UrlCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_id([self.rulestack.as_str(), self.name.as_str()]))
    }
}

impl FromStr for UrlCategoryId {
    type Err = IdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = split_id(s, 2)?;
        Ok(Self::new(tokens[0], tokens[1]))
    }
}

/// Identity of a rulestack: the bare name, no separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RulestackId {
    pub name: String,
}

impl RulestackId {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for RulestackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for RulestackId {
    type Err = IdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = split_id(s, 1)?;
        Ok(Self::new(tokens[0]))
    }
}

/// Identity of a firewall: `<account_id>:<region>:<name>`.
///
/// Firewall names are only unique per account and region, so both join the
/// identity. Account and region components may be empty: an id can be built
/// before the server has confirmed the owning account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirewallId {
    pub account_id: String,
    pub region: String,
    pub name: String,
}

impl FirewallId {
    pub fn new(
        account_id: impl Into<String>,
        region: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FirewallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            join_id([
                self.account_id.as_str(),
                self.region.as_str(),
                self.name.as_str()
            ])
        )
    }
}

impl FromStr for FirewallId {
    type Err = IdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = split_id(s, 3)?;
        Ok(Self::new(tokens[0], tokens[1], tokens[2]))
    }
}
