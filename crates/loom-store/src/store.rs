//! The save-slot interface shared by all backends.

use std::str::FromStr;

use async_trait::async_trait;
use loom_core::{CoreError, SaveState, default_state};
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::platform::ScopeId;

/// A durable slot holding one save per scope.
#[async_trait]
pub trait SaveStore: Send + Sync {
    /// Load the save of `scope`.
    ///
    /// A scope without a save gets a fresh default save, which is written
    /// before it is returned.
    async fn load(&self, scope: &ScopeId) -> StoreResult<SaveState>;

    /// Replace the save of `scope`.
    async fn save(&self, scope: &ScopeId, state: &SaveState) -> StoreResult<()>;
}

/// What `load` does with a save that cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Overwrite it with a default save and carry on.
    #[default]
    Reset,
    /// Leave it in place and report [`StoreError::Corrupt`].
    Fail,
}

impl FromStr for RecoveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown recovery policy: {other:?} (use reset or fail)")),
        }
    }
}

impl RecoveryPolicy {
    /// Apply the policy to a decode failure.
    ///
    /// Returns the default state the caller must persist in place of the
    /// corrupted one, or the error to surface.
    pub(crate) fn recover(self, scope: &ScopeId, err: CoreError) -> StoreResult<SaveState> {
        match self {
            Self::Reset => {
                warn!(scope = %scope, error = %err, "corrupted save replaced with a fresh story");
                Ok(default_state())
            }
            Self::Fail => {
                warn!(scope = %scope, error = %err, "corrupted save left in place");
                Err(StoreError::Corrupt {
                    scope: scope.clone(),
                    source: err,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names() {
        assert_eq!("reset".parse::<RecoveryPolicy>(), Ok(RecoveryPolicy::Reset));
        assert_eq!(" FAIL ".parse::<RecoveryPolicy>(), Ok(RecoveryPolicy::Fail));
        assert!("ignore".parse::<RecoveryPolicy>().is_err());
    }

    #[test]
    fn reset_yields_default() {
        let state = RecoveryPolicy::Reset
            .recover(&ScopeId::new("g"), CoreError::MissingSentinel)
            .unwrap();
        assert_eq!(state, default_state());
    }

    #[test]
    fn fail_surfaces_corruption() {
        let err = RecoveryPolicy::Fail
            .recover(&ScopeId::new("g"), CoreError::MissingSentinel)
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
