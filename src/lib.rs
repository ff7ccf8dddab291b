pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod escape;
pub mod filter;
pub mod github;
pub mod page;
pub mod render;
pub mod types;
pub mod view;

pub use config::PortfolioConfig;
pub use error::{PortfolioError, Result};
pub use types::Repository;
