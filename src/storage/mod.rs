pub mod error;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use repository::{Filter, Repository};
