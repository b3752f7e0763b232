use std::default::Default;

use log::error;

cfg_if! {
    if #[cfg(debug_assertions)] {
        const DEFAULT_CONTRACT_POLICY: ContractPolicy = ContractPolicy::Panic;
    } else {
        const DEFAULT_CONTRACT_POLICY: ContractPolicy = ContractPolicy::Log;
    }
}

/// How a contract violation (a wiring bug between the effect layer and the
/// attribute definitions) is surfaced by the non-`try_` pipeline methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractPolicy {
    /// Panic immediately with the violation's message
    Panic,
    /// Log the violation at error level and continue as a no-op
    Log,
}

impl ContractPolicy {
    pub(crate) fn violated(&self, violation: &dyn std::error::Error) {
        match self {
            ContractPolicy::Panic => panic!("{}", violation),
            ContractPolicy::Log => error!("Attribute contract violation: {}", violation),
        }
    }
}

impl Default for ContractPolicy {
    fn default() -> Self {
        DEFAULT_CONTRACT_POLICY
    }
}

/// When a Replica fires its replication notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepNotifyPolicy {
    /// Notify for every delivered update, even if the value did not change
    #[default]
    Always,
    /// Notify only when the delivered value differs from the stored one
    OnChange,
}

/// Contains Config properties which will be used by an AttributeSet
#[derive(Clone, Debug)]
pub struct AttributeConfig {
    /// Determines how contract violations are reported by the panicking
    /// variants of the change pipeline
    pub contract_policy: ContractPolicy,
    /// Determines when replication notifications fire on a Replica
    pub rep_notify: RepNotifyPolicy,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            contract_policy: ContractPolicy::default(),
            rep_notify: RepNotifyPolicy::default(),
        }
    }
}
