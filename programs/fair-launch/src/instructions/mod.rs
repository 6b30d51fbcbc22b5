pub mod claims;
pub mod initialize_config;
pub mod launch;
pub mod new_fair_launch;
pub mod participate;
pub mod refund_for_launch_fail;
pub mod reserve_free_claim;
pub mod update_config;

pub use claims::*;
pub use initialize_config::*;
pub use launch::*;
pub use new_fair_launch::*;
pub use participate::*;
pub use refund_for_launch_fail::*;
pub use reserve_free_claim::*;
pub use update_config::*;
