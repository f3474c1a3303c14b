//! User session: the selected state, its place dataset and the town list.
//!
//! All mutation goes through one `Session` owned by a single task. Fetches
//! happen elsewhere and report back through `apply_load` and
//! `complete_quick_add`.

use thiserror::Error;

use crate::config::Settings;
use crate::core::{search, Estimator, RegistryError, SearchResults, TownRegistry};
use crate::models::{
    AggregateDrain, DrainEstimate, ManualEntry, ManualEntryError, Place, RegistrySummary,
    RegistryTotals, StateCode, Town, TownCandidate, TownId, TownSummary, UnknownStateCode, same_name,
};
use crate::services::{CensusError, DatasetLoader, DatasetStatus, LoadOutcome, LoadTicket};

/// Well-known small towns offered as one-click additions
pub const QUICK_TOWNS: [(&str, StateCode); 6] = [
    ("Sedona", StateCode::AZ),
    ("Aspen", StateCode::CO),
    ("Key West", StateCode::FL),
    ("Savannah", StateCode::GA),
    ("Nantucket", StateCode::MA),
    ("Carmel-by-the-Sea", StateCode::CA),
];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidState(#[from] UnknownStateCode),

    #[error(transparent)]
    Census(#[from] CensusError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    ManualEntry(#[from] ManualEntryError),

    #[error("{name} was not found among the {state} Census places")]
    PlaceNotFound { name: String, state: StateCode },
}

#[derive(Debug)]
pub struct Session {
    state: StateCode,
    loader: DatasetLoader,
    registry: TownRegistry,
    estimator: Estimator,
    result_limit: usize,
}

impl Session {
    pub fn new(state: StateCode, estimator: Estimator, result_limit: usize) -> Self {
        Self {
            state,
            loader: DatasetLoader::new(),
            registry: TownRegistry::new(),
            estimator,
            result_limit,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SessionError> {
        let state = settings.session.default_state.parse::<StateCode>()?;
        Ok(Self::new(state, Estimator::default(), settings.search.result_limit))
    }

    /// Currently selected state
    pub fn state(&self) -> StateCode {
        self.state
    }

    /// Select a state by its two-letter code and start loading its places
    pub fn select_state(&mut self, code: &str) -> Result<LoadTicket, SessionError> {
        let state = code.parse::<StateCode>()?;
        Ok(self.load(state))
    }

    /// Start (or restart) loading the places of `state`
    pub fn load(&mut self, state: StateCode) -> LoadTicket {
        self.state = state;
        self.loader.begin(state)
    }

    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<Place>, CensusError>) -> LoadOutcome {
        self.loader.complete(ticket, result)
    }

    pub fn places(&self) -> &[Place] {
        self.loader.places()
    }

    pub fn dataset_status(&self) -> &DatasetStatus {
        self.loader.status()
    }

    pub fn search(&self, query: &str) -> SearchResults<'_> {
        search(self.loader.places(), query, self.result_limit)
    }

    /// Add a search result, bound to the selected state
    pub fn add_place(&mut self, place: &Place) -> Result<TownId, SessionError> {
        let candidate = TownCandidate::from_place(place, self.state);
        Ok(self.registry.add(candidate)?)
    }

    /// Add a validated manual entry, bound to the selected state
    pub fn add_manual(&mut self, entry: ManualEntry) -> Result<TownId, SessionError> {
        let candidate = entry.into_candidate(self.state);
        Ok(self.registry.add(candidate)?)
    }

    /// Check that a quick-add is worth fetching for
    pub fn begin_quick_add(&self, name: &str, state: StateCode) -> Result<(), SessionError> {
        if self.registry.contains(name, state) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
                state,
            }
            .into());
        }
        Ok(())
    }

    /// Finish a quick-add with the places fetched for `state`
    pub fn complete_quick_add(
        &mut self,
        name: &str,
        state: StateCode,
        result: Result<Vec<Place>, CensusError>,
    ) -> Result<TownId, SessionError> {
        let places = result?;
        let place = places
            .iter()
            .find(|place| same_name(&place.display_name, name))
            .ok_or_else(|| SessionError::PlaceNotFound {
                name: name.to_string(),
                state,
            })?;

        let id = self.registry.add(TownCandidate::from_place(place, state))?;
        tracing::info!("Quick-added {}, {}", place.display_name, state);

        Ok(id)
    }

    /// Whether a quick-add town is already on the list
    pub fn has_town(&self, name: &str, state: StateCode) -> bool {
        self.registry.contains(name, state)
    }

    pub fn remove(&mut self, id: TownId) -> Option<Town> {
        self.registry.remove(id)
    }

    pub fn towns(&self) -> &[Town] {
        self.registry.list()
    }

    pub fn estimate(&self, town: &Town) -> DrainEstimate {
        self.estimator.estimate(town)
    }

    pub fn totals(&self) -> RegistryTotals {
        self.registry.totals(&self.estimator)
    }

    pub fn aggregate(&self) -> AggregateDrain {
        self.estimator.aggregate(self.registry.list())
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            towns: self
                .towns()
                .iter()
                .map(|town| TownSummary {
                    town: town.clone(),
                    estimate: self.estimate(town),
                })
                .collect(),
            aggregate: self.aggregate(),
            generated_at: chrono::Utc::now(),
        }
    }
}
