use serde::{Deserialize, Serialize};
use crate::models::domain::{AggregateDrain, DrainEstimate, Town};

/// A town together with its current fee projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownSummary {
    pub town: Town,
    pub estimate: DrainEstimate,
}

/// Snapshot of the whole registry for the `report` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub towns: Vec<TownSummary>,
    pub aggregate: AggregateDrain,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
