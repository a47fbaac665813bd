pub mod error;
pub mod models;
pub mod routes;
pub mod traits;

pub use error::Error;
