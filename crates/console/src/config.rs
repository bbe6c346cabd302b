//! Environment-driven settings for the console.

use anyhow::Context;

use shopdesk_catalog::{OrphanPolicy, WizardConfig};

pub const ORPHAN_POLICY_VAR: &str = "SHOPDESK_ORPHAN_POLICY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsoleConfig {
    pub wizard: WizardConfig,
}

impl ConsoleConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let orphan_policy = match lookup(ORPHAN_POLICY_VAR) {
            Some(raw) => OrphanPolicy::parse(&raw)
                .with_context(|| format!("invalid {ORPHAN_POLICY_VAR}"))?,
            None => OrphanPolicy::default(),
        };
        Ok(Self {
            wizard: WizardConfig { orphan_policy },
        })
    }
}
