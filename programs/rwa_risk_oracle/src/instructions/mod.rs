// programs/rwa_risk_oracle/src/instructions/mod.rs

pub mod asset_data;
pub mod initialize;

pub use asset_data::*;
pub use initialize::*;
