//! SwipeHeist - estimates the card-processing fee drain on US towns
//!
//! This library turns Census place data (population and median household
//! income) into projections of how much a community pays in card-processing
//! fees per day, week, month and year.

pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Estimator, TownRegistry, normalize, filter, search};
pub use models::{Place, Town, TownId, DrainEstimate, FeeModel, StateCode, ManualEntry};
pub use services::CensusClient;
pub use session::{Session, SessionError};
