// programs/rwa_tranche_vaults/src/instructions/mod.rs

pub mod factory;
pub mod lifecycle;
pub mod claims;
pub mod views;

pub use factory::*;
pub use lifecycle::*;
pub use claims::*;
pub use views::*;
