use league::db::txn_policy::{current, set_txn_policy, TxnPolicy};

#[test]
fn policy_is_rollback_on_ok_for_this_binary() {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
}

#[test]
fn first_policy_wins() {
    set_txn_policy(TxnPolicy::CommitOnOk);
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
}
