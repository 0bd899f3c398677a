pub mod channels;
pub mod config;
pub mod cronjob;
pub mod db;
pub mod error;
pub mod server;
pub mod service;

mod utils;

pub use error::RelayError;
