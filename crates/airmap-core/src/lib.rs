pub mod airport;
pub mod config;
pub mod countries;
pub mod geography;
pub mod ingest;
pub mod projection;
pub mod render;
pub mod session;

pub use airport::{AirportId, AirportRecord};
pub use ingest::{ingest, ingest_file, Dataset, IngestError};
pub use render::Scene;
pub use session::Session;
