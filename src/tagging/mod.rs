//! Device classification and tag reconciliation

pub mod classify;
pub mod reconcile;
pub mod resolve;
pub mod summary;
