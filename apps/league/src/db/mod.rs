pub mod txn;
pub mod txn_policy;

pub use txn::{begin_txn, finish_txn};
