pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod excel;
pub mod menu;
pub mod model;
pub mod report;
mod session;
mod utils;

#[cfg(test)]
mod test;

pub use api::Mode;
pub use config::Config;
pub use error::{error_type, Error, ErrorType, Result};
pub use model::Amount;
pub use session::Session;
