//! HTTP API handlers

pub mod export;
pub mod health;
pub mod participant;
pub mod recall;
pub mod translate;

pub use export::export_csv;
pub use health::{health_routes, root_info};
pub use participant::register_participant;
pub use recall::submit_recall;
pub use translate::translate;
