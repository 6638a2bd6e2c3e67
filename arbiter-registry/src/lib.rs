pub mod client;
pub mod directory;
pub mod error;

pub use client::{HttpRegistryClient, RegistryClient};
pub use directory::Directory;
pub use error::RegistryError;
