pub mod config;
pub mod error;
pub mod field;
pub mod time;

pub use config::Config;
pub use error::*;
pub use field::*;
pub use time::*;
