use crate::core::Estimator;
use crate::models::{RegistryTotals, StateCode, Town, TownCandidate, TownId};
use thiserror::Error;

/// Errors raised when adding towns to the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{name}, {state} is already on the list")]
    Duplicate { name: String, state: StateCode },

    #[error("{name} has no population to estimate from")]
    InvalidPopulation { name: String },
}

/// Ordered collection of the towns a user has picked
///
/// Towns are unique by `(name, state)` ignoring case, and keep their
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct TownRegistry {
    towns: Vec<Town>,
}

impl TownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a town and return its new id
    pub fn add(&mut self, candidate: TownCandidate) -> Result<TownId, RegistryError> {
        if candidate.population == 0 {
            return Err(RegistryError::InvalidPopulation { name: candidate.name });
        }

        if self.contains(&candidate.name, candidate.state) {
            return Err(RegistryError::Duplicate {
                name: candidate.name,
                state: candidate.state,
            });
        }

        let town = Town::from_candidate(candidate);
        let id = town.id;

        tracing::debug!("Added {}, {} ({})", town.name, town.state, id);
        self.towns.push(town);

        Ok(id)
    }

    /// Remove a town by id; unknown ids are ignored
    pub fn remove(&mut self, id: TownId) -> Option<Town> {
        let index = self.towns.iter().position(|town| town.id == id)?;
        let town = self.towns.remove(index);

        tracing::debug!("Removed {}, {} ({})", town.name, town.state, id);
        Some(town)
    }

    pub fn contains(&self, name: &str, state: StateCode) -> bool {
        self.towns.iter().any(|town| town.matches_key(name, state))
    }

    pub fn get(&self, id: TownId) -> Option<&Town> {
        self.towns.iter().find(|town| town.id == id)
    }

    pub fn list(&self) -> &[Town] {
        &self.towns
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    /// Population and fee totals across all towns
    pub fn totals(&self, estimator: &Estimator) -> RegistryTotals {
        let aggregate = estimator.aggregate(&self.towns);

        RegistryTotals {
            total_population: aggregate.total_population,
            total_daily_fees: aggregate.fees_daily,
            total_yearly_fees: aggregate.fees_yearly,
        }
    }
}
