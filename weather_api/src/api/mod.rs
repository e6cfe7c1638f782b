pub mod api_models;
pub mod error;
mod extractors;
mod handlers;
mod router;

pub use router::router;
