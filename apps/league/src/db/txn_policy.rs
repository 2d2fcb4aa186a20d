use std::sync::OnceLock;

/// What [`super::finish_txn`] does with a transaction whose work succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit (production behaviour)
    CommitOnOk,
    /// Roll back even on success, so a test run leaves the store untouched
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parse `LEAGUE_TXN_POLICY`; anything other than `rollback` means commit.
    pub fn from_env() -> Self {
        match std::env::var("LEAGUE_TXN_POLICY")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "rollback" => TxnPolicy::RollbackOnOk,
            _ => TxnPolicy::CommitOnOk,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current policy; `CommitOnOk` until something sets it.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the policy for the process. Only the first call wins.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
