pub mod bridge;
pub mod config;
pub mod db;
pub mod models;

pub use bridge::{Bridge, ScanSink};
pub use config::Settings;
pub use db::Database;
pub use models::ScanRecord;
