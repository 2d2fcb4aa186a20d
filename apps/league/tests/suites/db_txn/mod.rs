mod conflicts;
mod txn_policy;
