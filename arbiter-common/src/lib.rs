pub mod auth;
pub mod types;
pub mod utils;

pub use types::{
    ReferenceAnswer, ScoredResponse, Task, WeightVector, WorkerEndpoint, WorkerResponse,
};
