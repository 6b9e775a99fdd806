// crates/randomuser-conformance-core/src/core/catalog.rs
// ============================================================================
// Module: Parameter Catalog
// Description: Rule identifiers and their base query parameter sets.
// Purpose: Supply valid, self-describing parameters for each contract rule.
// Dependencies: serde, crate::core::params
// ============================================================================

//! ## Overview
//! The catalog maps each [`Rule`] to a base [`ParameterSet`]. It is an
//! explicit value handed to every test case rather than a global, so config
//! files can replace entries and parallel cases never share mutable state.
//! The catalog never interprets values: invalid values (for example an
//! unknown gender) are intentionally representable for negative-path rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::params::ParameterSet;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Named catalog entry exercising one contract rule.
///
/// # Invariants
/// - Variants map to stable snake_case names used in config files and the CLI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Gender filter restricted to `female`.
    Female,
    /// Gender filter restricted to `male`.
    Male,
    /// Unrecognized gender value.
    GenderInvalid,
    /// Result count control.
    Results,
    /// Upper/lower password policy with a length range.
    PasswordSimple,
    /// Special-character password policy with an exact length.
    PasswordSpecial,
    /// All character classes with the default length range.
    PasswordComplex,
    /// Nationality restriction to several countries.
    NatMulti,
    /// Top-level field inclusion.
    IncludeBasic,
    /// Top-level field exclusion.
    ExcludeLogin,
    /// Seeded page used for determinism checks.
    SeededPage,
}

impl Rule {
    /// All rules in catalog order.
    pub const ALL: [Self; 11] = [
        Self::Female,
        Self::Male,
        Self::GenderInvalid,
        Self::Results,
        Self::PasswordSimple,
        Self::PasswordSpecial,
        Self::PasswordComplex,
        Self::NatMulti,
        Self::IncludeBasic,
        Self::ExcludeLogin,
        Self::SeededPage,
    ];

    /// Returns the stable rule name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::GenderInvalid => "gender_invalid",
            Self::Results => "results",
            Self::PasswordSimple => "password_simple",
            Self::PasswordSpecial => "password_special",
            Self::PasswordComplex => "password_complex",
            Self::NatMulti => "nat_multi",
            Self::IncludeBasic => "include_basic",
            Self::ExcludeLogin => "exclude_login",
            Self::SeededPage => "seeded_page",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == raw)
            .ok_or_else(|| format!("unknown rule `{raw}`"))
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Mapping from rule to its base parameter set.
///
/// # Invariants
/// - Every [`Rule`] has an entry (missing entries fall back to an empty set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Base parameters per rule.
    entries: BTreeMap<Rule, ParameterSet>,
}

impl Catalog {
    /// Builds the standard catalog used by the conformance suite.
    #[must_use]
    pub fn standard() -> Self {
        let entries = Rule::ALL.into_iter().map(|rule| (rule, standard_entry(rule))).collect();
        Self {
            entries,
        }
    }

    /// Returns a copy with the entry for `rule` replaced.
    #[must_use]
    pub fn with_entry(mut self, rule: Rule, params: ParameterSet) -> Self {
        self.entries.insert(rule, params);
        self
    }

    /// Returns the base parameters for `rule`.
    #[must_use]
    pub fn entry(&self, rule: Rule) -> ParameterSet {
        self.entries.get(&rule).cloned().unwrap_or_default()
    }

    /// Builds the parameters for `rule`, merging `overrides` on top.
    #[must_use]
    pub fn build_params(&self, rule: Rule, overrides: Option<&ParameterSet>) -> ParameterSet {
        let base = self.entry(rule);
        match overrides {
            Some(overrides) => base.merge(overrides),
            None => base,
        }
    }

    /// Iterates over catalog entries in rule order.
    pub fn entries(&self) -> impl Iterator<Item = (Rule, &ParameterSet)> {
        self.entries.iter().map(|(rule, params)| (*rule, params))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns the standard base parameters for a rule.
fn standard_entry(rule: Rule) -> ParameterSet {
    match rule {
        Rule::Female => ParameterSet::new().with("gender", "female"),
        Rule::Male => ParameterSet::new().with("gender", "male"),
        Rule::GenderInvalid => {
            ParameterSet::new().with("gender", "not-a-valid-value").with("results", 20_u32)
        }
        Rule::Results => ParameterSet::new().with("results", 10_u32),
        Rule::PasswordSimple => ParameterSet::new().with("password", "upper,lower,1-16"),
        Rule::PasswordSpecial => ParameterSet::new().with("password", "special,32"),
        Rule::PasswordComplex => {
            ParameterSet::new().with("password", "special,upper,lower,number")
        }
        Rule::NatMulti => ParameterSet::new().with("nat", "us,dk,fr,gb").with("results", 20_u32),
        Rule::IncludeBasic => {
            ParameterSet::new().with("inc", "gender,name,nat").with("results", 5_u32)
        }
        Rule::ExcludeLogin => ParameterSet::new().with("exc", "login").with("results", 5_u32),
        Rule::SeededPage => ParameterSet::new()
            .with("seed", "abc123")
            .with("page", 2_u32)
            .with("results", 5_u32),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
