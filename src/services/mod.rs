// Service exports
pub mod census;
pub mod loader;

pub use census::{parse_rows, CensusClient, CensusError, PLACE_VARIABLES};
pub use loader::{DatasetLoader, DatasetStatus, LoadOutcome, LoadTicket};
