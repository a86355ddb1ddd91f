//! Per-contract deployment wrappers.
//!
//! Each function deploys one contract family through the shared
//! deploy-and-record helper and returns the handle later steps need.

pub mod amm;
pub mod gauge;
pub mod governance;
pub mod helpers;
pub mod registries;
pub mod test_pools;
