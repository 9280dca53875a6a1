//! Seams for the two data loads the tracker depends on: the client budget
//! list and the spend records for one client.

pub mod json_backend;

use crate::{
    errors::TrackerResult,
    tracker::{client::ClientRecord, spend::SpendRecord},
};

pub use json_backend::JsonSource;

/// Abstraction over the feeds backing the tracker. Each call returns a full
/// replacement collection; callers never merge results.
pub trait TrackerSource: Send + Sync {
    fn load_clients(&self) -> TrackerResult<Vec<ClientRecord>>;
    fn load_spend(&self, client_code: &str) -> TrackerResult<Vec<SpendRecord>>;
}
