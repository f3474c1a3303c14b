// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod state;

pub use domain::{
    AggregateDrain, Demographics, DrainEstimate, FeeModel, Place, RawPlaceRow, RegistryTotals, Town,
    TownCandidate, TownId, same_name,
};
pub use requests::{ManualEntry, ManualEntryError};
pub use responses::{RegistrySummary, TownSummary};
pub use state::{StateCode, UnknownStateCode};
