pub mod client;
pub mod dispatcher;
pub mod error;

pub use client::{HttpWorkerClient, WorkerClient};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
