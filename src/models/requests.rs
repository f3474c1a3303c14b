use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::domain::TownCandidate;
use crate::models::state::StateCode;

/// Reasons a manual entry never reaches the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManualEntryError {
    #[error("Town name is required")]
    MissingName,

    #[error("Population must be a positive whole number, got {0:?}")]
    InvalidPopulation(String),

    #[error("Median income must be a whole number, got {0:?}")]
    InvalidIncome(String),
}

/// A town typed in by hand when it is missing from the Census data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ManualEntry {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub population: u64,
    #[serde(rename = "medianHouseholdIncome", default)]
    pub median_household_income: Option<u64>,
}

impl ManualEntry {
    /// Parse and validate raw form input
    ///
    /// A blank or zero income is treated as unknown.
    pub fn parse(name: &str, population: &str, income: Option<&str>) -> Result<Self, ManualEntryError> {
        let population_text = population.trim();
        let population = if population_text.is_empty() {
            0
        } else {
            // Same bound as fetched rows: anything past i64::MAX is rejected
            population_text
                .parse::<i64>()
                .ok()
                .and_then(|value| u64::try_from(value).ok())
                .ok_or_else(|| ManualEntryError::InvalidPopulation(population_text.to_string()))?
        };

        let median_household_income = match income.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(text) => {
                let value = text
                    .parse::<u64>()
                    .map_err(|_| ManualEntryError::InvalidIncome(text.to_string()))?;
                (value > 0).then_some(value)
            }
        };

        let entry = Self {
            name: name.trim().to_string(),
            population,
            median_household_income,
        };

        entry
            .validate()
            .map_err(|errors| validation_error(&errors, population_text))?;

        Ok(entry)
    }

    pub fn into_candidate(self, state: StateCode) -> TownCandidate {
        TownCandidate {
            name: self.name,
            state,
            population: self.population,
            median_household_income: self.median_household_income,
            is_manual_entry: true,
        }
    }
}

fn validation_error(errors: &ValidationErrors, population_text: &str) -> ManualEntryError {
    if errors.field_errors().contains_key("name") {
        ManualEntryError::MissingName
    } else {
        ManualEntryError::InvalidPopulation(population_text.to_string())
    }
}
