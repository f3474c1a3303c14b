use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::state::StateCode;

/// One unprocessed data row as returned by the Census API
///
/// Cells are kept as strings; the normalizer decides what is a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPlaceRow {
    pub name: String,
    pub population: String,
    pub income: String,
}

impl RawPlaceRow {
    pub fn new(name: impl Into<String>, population: impl Into<String>, income: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: population.into(),
            income: income.into(),
        }
    }
}

/// A normalized demographic record for one Census place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "officialName")]
    pub official_name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub population: u64,
    #[serde(rename = "medianHouseholdIncome", default)]
    pub median_household_income: Option<u64>,
}

/// Opaque identity of a town in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TownId(Uuid);

impl TownId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Lowercase hex form without dashes, used for prefix lookups
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }
}

impl Default for TownId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A town before the registry has accepted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TownCandidate {
    pub name: String,
    pub state: StateCode,
    pub population: u64,
    pub median_household_income: Option<u64>,
    pub is_manual_entry: bool,
}

impl TownCandidate {
    /// Candidate for a place picked from Census data
    pub fn from_place(place: &Place, state: StateCode) -> Self {
        Self {
            name: place.display_name.clone(),
            state,
            population: place.population,
            median_household_income: place.median_household_income,
            is_manual_entry: false,
        }
    }
}

/// A user-selected place bound to a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub id: TownId,
    pub name: String,
    pub state: StateCode,
    pub population: u64,
    #[serde(rename = "medianHouseholdIncome")]
    pub median_household_income: Option<u64>,
    #[serde(rename = "isManualEntry")]
    pub is_manual_entry: bool,
}

impl Town {
    pub(crate) fn from_candidate(candidate: TownCandidate) -> Self {
        Self {
            id: TownId::new(),
            name: candidate.name,
            state: candidate.state,
            population: candidate.population,
            median_household_income: candidate.median_household_income,
            is_manual_entry: candidate.is_manual_entry,
        }
    }

    /// Whether this town has the registry key `(name, state)`, ignoring case
    pub fn matches_key(&self, name: &str, state: StateCode) -> bool {
        self.state == state && same_name(&self.name, name)
    }
}

/// Town names compare equal ignoring case, including non-ASCII letters
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Anything the estimator can price: a population plus an optional income
pub trait Demographics {
    fn population(&self) -> u64;
    fn median_household_income(&self) -> Option<u64>;
}

impl Demographics for Place {
    fn population(&self) -> u64 {
        self.population
    }

    fn median_household_income(&self) -> Option<u64> {
        self.median_household_income
    }
}

impl Demographics for Town {
    fn population(&self) -> u64 {
        self.population
    }

    fn median_household_income(&self) -> Option<u64> {
        self.median_household_income
    }
}

impl Demographics for TownCandidate {
    fn population(&self) -> u64 {
        self.population
    }

    fn median_household_income(&self) -> Option<u64> {
        self.median_household_income
    }
}

/// Fee projection for a single town
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrainEstimate {
    #[serde(rename = "dailySpendPerPerson")]
    pub daily_spend_per_person: f64,
    #[serde(rename = "totalCardVolume")]
    pub total_card_volume: f64,
    #[serde(rename = "estimatedDailyTransactions")]
    pub estimated_daily_transactions: u64,
    #[serde(rename = "feesDaily")]
    pub fees_daily: f64,
    #[serde(rename = "feesWeekly")]
    pub fees_weekly: f64,
    #[serde(rename = "feesMonthly")]
    pub fees_monthly: f64,
    #[serde(rename = "feesYearly")]
    pub fees_yearly: f64,
    #[serde(rename = "yearlyFeesPerPerson")]
    pub yearly_fees_per_person: f64,
}

/// Fee projection summed over several towns
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateDrain {
    #[serde(rename = "townCount")]
    pub town_count: usize,
    #[serde(rename = "totalPopulation")]
    pub total_population: u64,
    #[serde(rename = "feesDaily")]
    pub fees_daily: f64,
    #[serde(rename = "feesWeekly")]
    pub fees_weekly: f64,
    #[serde(rename = "feesMonthly")]
    pub fees_monthly: f64,
    #[serde(rename = "feesYearly")]
    pub fees_yearly: f64,
}

/// Headline numbers for the registry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistryTotals {
    #[serde(rename = "totalPopulation")]
    pub total_population: u64,
    #[serde(rename = "totalDailyFees")]
    pub total_daily_fees: f64,
    #[serde(rename = "totalYearlyFees")]
    pub total_yearly_fees: f64,
}

/// Fixed business parameters of the fee model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeModel {
    /// Share of consumer spending paid by card
    pub card_share: f64,
    /// Percentage component of the blended processor fee
    pub fee_percent: f64,
    /// Fixed component of the blended processor fee, per transaction
    pub fee_fixed: f64,
    pub average_transaction_size: f64,
    /// Share of pre-tax household income spent locally
    pub local_spending_ratio: f64,
    pub average_household_size: f64,
    /// Daily spend per person used when income is unknown
    pub fallback_daily_spend: f64,
}

impl Default for FeeModel {
    fn default() -> Self {
        Self {
            card_share: 0.72,
            fee_percent: 0.0275,
            fee_fixed: 0.05,
            average_transaction_size: 42.0,
            local_spending_ratio: 0.65,
            average_household_size: 2.53,
            fallback_daily_spend: 75.0,
        }
    }
}
