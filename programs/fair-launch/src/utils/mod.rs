pub mod allocation;
pub mod dex;
pub mod pool_liquidity;
pub mod signature;
pub mod validation;

pub use allocation::*;
pub use dex::*;
pub use pool_liquidity::*;
pub use signature::*;
pub use validation::*;
