// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{collections::HashSet, sync::Arc};

use alloy::primitives::Address;
use parking_lot::Mutex;

use super::DeploymentError;

/// Tracks which wallet sessions have an attempt in flight.
///
/// Interleaving chain-switch or signing prompts against one session would invalidate the other
/// attempt's assumptions, so each session holds at most one attempt.
#[derive(Clone, Debug, Default)]
pub struct SessionLocks {
    active: Arc<Mutex<HashSet<Address>>>,
}

impl SessionLocks {
    pub fn try_acquire(&self, session: Address) -> Result<SessionGuard, DeploymentError> {
        if !self.active.lock().insert(session) {
            return Err(DeploymentError::AttemptInProgress(session));
        }
        Ok(SessionGuard {
            session,
            active: self.active.clone(),
        })
    }

    pub fn is_active(&self, session: Address) -> bool {
        self.active.lock().contains(&session)
    }
}

/// Releases its session when dropped.
#[derive(Debug)]
pub struct SessionGuard {
    session: Address,
    active: Arc<Mutex<HashSet<Address>>>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.active.lock().remove(&self.session);
    }
}
