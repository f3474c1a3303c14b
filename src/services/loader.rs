use crate::models::{Place, StateCode};
use crate::services::census::CensusError;

/// Receipt for a dataset load that has been started
///
/// Only the ticket of the most recent `begin` can complete a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    state: StateCode,
}

impl LoadTicket {
    pub fn state(&self) -> StateCode {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    Idle,
    Loading(StateCode),
    Ready(StateCode),
    Failed { state: StateCode, message: String },
}

/// What happened to a completed load
#[derive(Debug)]
pub enum LoadOutcome {
    /// The dataset was replaced; carries the number of places
    Loaded(usize),
    /// The load was current but failed; the dataset stays empty
    Failed(CensusError),
    /// A newer load has started since; the result was discarded
    Stale,
}

/// Holds the place dataset of the selected state
///
/// Every `begin` bumps a generation counter, and `complete` drops results
/// whose ticket is not from the latest generation. The last request wins
/// without having to cancel anything in flight.
#[derive(Debug)]
pub struct DatasetLoader {
    generation: u64,
    status: DatasetStatus,
    places: Vec<Place>,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            generation: 0,
            status: DatasetStatus::Idle,
            places: Vec::new(),
        }
    }

    /// Start loading a state, invalidating any load in flight
    pub fn begin(&mut self, state: StateCode) -> LoadTicket {
        self.generation += 1;
        self.places.clear();
        self.status = DatasetStatus::Loading(state);

        LoadTicket {
            generation: self.generation,
            state,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the result of a fetch
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Vec<Place>, CensusError>) -> LoadOutcome {
        if !self.is_current(&ticket) {
            tracing::debug!(
                "Discarding stale load for {} (generation {}, current {})",
                ticket.state,
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(places) => {
                let count = places.len();
                self.places = places;
                self.status = DatasetStatus::Ready(ticket.state);
                LoadOutcome::Loaded(count)
            }
            Err(err) => {
                tracing::warn!("Failed to load {} places: {}", ticket.state, err);
                self.places.clear();
                self.status = DatasetStatus::Failed {
                    state: ticket.state,
                    message: err.to_string(),
                };
                LoadOutcome::Failed(err)
            }
        }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn status(&self) -> &DatasetStatus {
        &self.status
    }

    /// State of the dataset being loaded or held, if any
    pub fn state(&self) -> Option<StateCode> {
        match &self.status {
            DatasetStatus::Idle => None,
            DatasetStatus::Loading(state) | DatasetStatus::Ready(state) => Some(*state),
            DatasetStatus::Failed { state, .. } => Some(*state),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, DatasetStatus::Loading(_))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places(n: usize) -> Vec<Place> {
        (0..n)
            .map(|i| Place {
                official_name: format!("Place {} CDP, Somewhere", i),
                display_name: format!("Place {}", i),
                population: 100,
                median_household_income: None,
            })
            .collect()
    }

    #[test]
    fn test_state_follows_status() {
        let mut loader = DatasetLoader::new();
        assert_eq!(loader.state(), None);

        let ticket = loader.begin(StateCode::NM);
        assert_eq!(loader.state(), Some(StateCode::NM));

        loader.complete(ticket, Err(CensusError::Status(500)));
        assert_eq!(loader.state(), Some(StateCode::NM));

        let ticket = loader.begin(StateCode::UT);
        loader.complete(ticket, Ok(places(1)));
        assert_eq!(loader.state(), Some(StateCode::UT));
    }

    #[test]
    fn test_load_applies_current_result() {
        let mut loader = DatasetLoader::new();
        let ticket = loader.begin(StateCode::AZ);
        assert!(loader.is_loading());

        let outcome = loader.complete(ticket, Ok(places(3)));

        assert!(matches!(outcome, LoadOutcome::Loaded(3)));
        assert_eq!(loader.places().len(), 3);
        assert_eq!(loader.status(), &DatasetStatus::Ready(StateCode::AZ));
    }

    #[test]
    fn test_last_request_wins() {
        let mut loader = DatasetLoader::new();
        let first = loader.begin(StateCode::AZ);
        let second = loader.begin(StateCode::CO);

        // The newer request resolves first, then the stale one arrives
        assert!(matches!(loader.complete(second, Ok(places(2))), LoadOutcome::Loaded(2)));
        assert!(matches!(loader.complete(first, Ok(places(5))), LoadOutcome::Stale));

        assert_eq!(loader.places().len(), 2);
        assert_eq!(loader.status(), &DatasetStatus::Ready(StateCode::CO));
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut loader = DatasetLoader::new();
        let first = loader.begin(StateCode::AZ);
        let _second = loader.begin(StateCode::CO);

        let outcome = loader.complete(first, Err(CensusError::Status(500)));

        assert!(matches!(outcome, LoadOutcome::Stale));
        assert_eq!(loader.status(), &DatasetStatus::Loading(StateCode::CO));
    }

    #[test]
    fn test_failure_leaves_dataset_empty() {
        let mut loader = DatasetLoader::new();
        let ticket = loader.begin(StateCode::AZ);
        loader.complete(ticket, Ok(places(4)));

        let retry = loader.begin(StateCode::AZ);
        assert!(loader.places().is_empty());

        let outcome = loader.complete(retry, Err(CensusError::Status(503)));

        assert!(matches!(outcome, LoadOutcome::Failed(CensusError::Status(503))));
        assert!(loader.places().is_empty());
        assert!(matches!(loader.status(), DatasetStatus::Failed { state: StateCode::AZ, .. }));
    }
}
