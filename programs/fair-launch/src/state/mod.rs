pub mod global_config;
pub mod participation;
pub mod token_launch;

pub use global_config::*;
pub use participation::*;
pub use token_launch::*;
