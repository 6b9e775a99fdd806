// crates/randomuser-conformance-core/src/runtime/scenario.rs
// ============================================================================
// Module: Conformance Scenarios
// Description: Test cases pairing catalog entries with verifiers.
// Purpose: Drive one request (or request pair) per case and classify results.
// Dependencies: serde, crate::core, crate::interfaces, crate::runtime::verifier
// ============================================================================

//! ## Overview
//! A [`Scenario`] selects a catalog entry, sends it through a [`Transport`],
//! and hands the response to the matching verifier. [`run_scenario`] never
//! panics and never shares state with other scenarios, so a runner can fan
//! scenarios out in any order. The determinism scenario is the only one that
//! issues two requests, sequentially, from the same case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::ApiResponse;
use crate::core::Catalog;
use crate::core::ConformanceError;
use crate::core::FailureKind;
use crate::core::Gender;
use crate::core::ParameterSet;
use crate::core::PasswordPolicy;
use crate::core::PolicyError;
use crate::core::Rule;
use crate::core::serialize;
use crate::interfaces::Transport;
use crate::runtime::verifier;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path of the generator endpoint, relative to the base URL.
pub const ROOT_PATH: &str = "";
/// Path that the API does not serve.
pub const INVALID_PATH: &str = "does-not-exist";
/// Result count requested by gender and password scenarios.
const FILTER_RESULT_COUNT: u32 = 10;
/// Result counts exercised by the standard suite.
pub const STANDARD_RESULT_COUNTS: [u32; 4] = [1, 2, 5, 10];

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Password policy case exercised by a password scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordCase {
    /// `upper,lower,1-16`.
    Simple,
    /// `special,32`.
    Special,
    /// `special,upper,lower,number` with the default length.
    Complex,
}

impl PasswordCase {
    /// Catalog rule holding the policy for this case.
    const fn rule(self) -> Rule {
        match self {
            Self::Simple => Rule::PasswordSimple,
            Self::Special => Rule::PasswordSpecial,
            Self::Complex => Rule::PasswordComplex,
        }
    }
}

/// One conformance test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Every record matches the requested gender.
    GenderFilter(Gender),
    /// An unknown gender degrades to mixed results.
    GenderInvalid,
    /// Generated passwords satisfy the policy.
    Password(PasswordCase),
    /// `results` controls the record count.
    ResultCount(u32),
    /// Nationalities stay within the requested set.
    NationalitySet,
    /// `inc` returns exactly the requested top-level keys.
    IncludeFields,
    /// `exc` removes the excluded key.
    ExcludeField,
    /// Same seed and page yield identical bodies.
    SeededDeterminism,
    /// Unknown paths return an error.
    InvalidPath,
}

impl Scenario {
    /// Returns the standard suite in reporting order.
    #[must_use]
    pub fn standard_suite() -> Vec<Self> {
        let mut suite = vec![
            Self::GenderFilter(Gender::Female),
            Self::GenderFilter(Gender::Male),
            Self::GenderInvalid,
            Self::Password(PasswordCase::Simple),
            Self::Password(PasswordCase::Special),
            Self::Password(PasswordCase::Complex),
        ];
        suite.extend(STANDARD_RESULT_COUNTS.into_iter().map(Self::ResultCount));
        suite.extend([
            Self::NationalitySet,
            Self::IncludeFields,
            Self::ExcludeField,
            Self::SeededDeterminism,
            Self::InvalidPath,
        ]);
        suite
    }

    /// Returns the stable scenario name.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::GenderFilter(gender) => format!("gender_{gender}"),
            Self::GenderInvalid => "gender_invalid".to_string(),
            Self::Password(PasswordCase::Simple) => "password_simple".to_string(),
            Self::Password(PasswordCase::Special) => "password_special".to_string(),
            Self::Password(PasswordCase::Complex) => "password_complex".to_string(),
            Self::ResultCount(count) => format!("results_{count}"),
            Self::NationalitySet => "nat_set".to_string(),
            Self::IncludeFields => "inc_fields".to_string(),
            Self::ExcludeField => "exc_field".to_string(),
            Self::SeededDeterminism => "seed_determinism".to_string(),
            Self::InvalidPath => "invalid_path".to_string(),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(count) = raw.strip_prefix("results_") {
            return count
                .parse()
                .map(Self::ResultCount)
                .map_err(|_| format!("invalid result count in scenario `{raw}`"));
        }
        Self::standard_suite()
            .into_iter()
            .find(|scenario| scenario.name() == raw)
            .ok_or_else(|| format!("unknown scenario `{raw}`"))
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Pass/fail status of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// All assertions held.
    Pass,
    /// An assertion failed or the API was unreachable.
    Fail,
}

impl ScenarioStatus {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

/// Classified failure of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Failure classification.
    pub kind: FailureKind,
    /// Full failure message including payload context.
    pub message: String,
}

impl From<&ConformanceError> for FailureRecord {
    fn from(err: &ConformanceError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of running one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Pass/fail status.
    pub status: ScenarioStatus,
    /// Failure details when the scenario failed.
    pub failure: Option<FailureRecord>,
    /// Number of requests issued.
    pub requests: u32,
}

impl ScenarioOutcome {
    /// Returns true when the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Pass
    }
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one scenario against the transport.
pub async fn run_scenario<T: Transport + ?Sized>(
    transport: &T,
    catalog: &Catalog,
    scenario: Scenario,
) -> ScenarioOutcome {
    let mut session = Session {
        transport,
        requests: 0,
    };
    let result = execute(&mut session, catalog, scenario).await;
    ScenarioOutcome {
        name: scenario.name(),
        status: if result.is_ok() { ScenarioStatus::Pass } else { ScenarioStatus::Fail },
        failure: result.as_ref().err().map(FailureRecord::from),
        requests: session.requests,
    }
}

/// Request counter scoped to one scenario.
struct Session<'a, T: ?Sized> {
    /// Transport used for every request of the scenario.
    transport: &'a T,
    /// Requests issued so far.
    requests: u32,
}

impl<T: Transport + ?Sized> Session<'_, T> {
    /// Sends one GET request with serialized parameters.
    async fn get(
        &mut self,
        path: &str,
        params: &ParameterSet,
    ) -> Result<ApiResponse, ConformanceError> {
        self.requests += 1;
        Ok(self.transport.get(path, &serialize(params)).await?)
    }
}

/// Executes the scenario body.
async fn execute<T: Transport + ?Sized>(
    session: &mut Session<'_, T>,
    catalog: &Catalog,
    scenario: Scenario,
) -> Result<(), ConformanceError> {
    match scenario {
        Scenario::GenderFilter(gender) => {
            let rule = match gender {
                Gender::Female => Rule::Female,
                Gender::Male => Rule::Male,
            };
            let overrides = ParameterSet::new().with("results", FILTER_RESULT_COUNT);
            let params = catalog.build_params(rule, Some(&overrides));
            let response = session.get(ROOT_PATH, &params).await?;
            verifier::verify_gender(&response, gender)
        }
        Scenario::GenderInvalid => {
            let params = catalog.build_params(Rule::GenderInvalid, None);
            let response = session.get(ROOT_PATH, &params).await?;
            verifier::verify_gender_degrades(&response)
        }
        Scenario::Password(case) => {
            let overrides =
                ParameterSet::new().with("results", FILTER_RESULT_COUNT).with("inc", "login");
            let params = catalog.build_params(case.rule(), Some(&overrides));
            let raw_policy = params.get_text("password").ok_or(PolicyError::EmptyInput)?;
            let policy = PasswordPolicy::parse(&raw_policy)?;
            let response = session.get(ROOT_PATH, &params).await?;
            verifier::verify_password(&response, &policy)
        }
        Scenario::ResultCount(count) => {
            let overrides = ParameterSet::new().with("results", count);
            let params = catalog.build_params(Rule::Results, Some(&overrides));
            let response = session.get(ROOT_PATH, &params).await?;
            verifier::verify_count(&response, count as usize)
        }
        Scenario::NationalitySet => {
            let params = catalog.build_params(Rule::NatMulti, None);
            let allowed = list_param(&params, "nat");
            let response = session.get(ROOT_PATH, &params).await?;
            verifier::verify_nationalities(&response, &allowed)
        }
        Scenario::IncludeFields => {
            let params = catalog.build_params(Rule::IncludeBasic, None);
            let expected = list_param(&params, "inc");
            let response = session.get(ROOT_PATH, &params).await?;
            verifier::verify_included_keys(&response, &expected)
        }
        Scenario::ExcludeField => {
            let params = catalog.build_params(Rule::ExcludeLogin, None);
            let excluded = list_param(&params, "exc");
            if excluded.is_empty() {
                return Err(ConformanceError::Contract {
                    rule: "exclusion",
                    detail: "no excluded keys configured; nothing to check".to_string(),
                    context: serialize(&params)
                        .into_iter()
                        .map(|(name, value)| format!("{name}={value}"))
                        .collect::<Vec<_>>()
                        .join("&"),
                });
            }
            let response = session.get(ROOT_PATH, &params).await?;
            excluded.iter().try_for_each(|key| verifier::verify_excluded_key(&response, key))
        }
        Scenario::SeededDeterminism => {
            let params = catalog.build_params(Rule::SeededPage, None);
            let first = session.get(ROOT_PATH, &params).await?;
            let second = session.get(ROOT_PATH, &params).await?;
            verifier::verify_determinism(&first, &second)
        }
        Scenario::InvalidPath => {
            let response = session.get(INVALID_PATH, &ParameterSet::new()).await?;
            verifier::verify_error(&response)
        }
    }
}

/// Splits a comma-separated parameter into a set of trimmed, non-empty items.
fn list_param(params: &ParameterSet, name: &str) -> BTreeSet<String> {
    params
        .get_text(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
