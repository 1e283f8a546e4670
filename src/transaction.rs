//! Scope guard that makes a multi-step operation all-or-nothing.

use tracing::debug;

use crate::events::EventLog;
use crate::registry::Registry;
use crate::traits::{Checkpoint, TokenLedger};

/// Rolls back everything an operation did unless [`commit`](Self::commit)
/// is reached.
///
/// On drop while still armed, including during unwinding, the guard:
///
/// 1. removes pairs registered since it began,
/// 2. truncates the event log,
/// 3. reverts the ledger to its checkpoint.
///
/// Pair state needs no tracking here. Every pair commit leaves an undo
/// action with the ledger, so the revert in step 3 restores each pair
/// written since the checkpoint, including pairs reached by nested calls.
///
/// Guards nest: a pair operation opens its own guard inside a router
/// guard, and both close in LIFO order.
pub(crate) struct Transaction<'a> {
    ledger: &'a dyn TokenLedger,
    checkpoint: Checkpoint,
    events: &'a EventLog,
    events_len: usize,
    registry: Option<(&'a Registry, usize)>,
    armed: bool,
}

impl<'a> Transaction<'a> {
    /// Opens a ledger checkpoint and remembers the event-log length.
    pub(crate) fn begin(ledger: &'a dyn TokenLedger, events: &'a EventLog) -> Self {
        Self {
            checkpoint: ledger.checkpoint(),
            ledger,
            events_len: events.len(),
            events,
            registry: None,
            armed: true,
        }
    }

    /// Also undoes pair registrations made after this call.
    pub(crate) fn with_registry(mut self, registry: &'a Registry) -> Self {
        self.registry = Some((registry, registry.all_pairs_length()));
        self
    }

    /// Keeps all changes.
    pub(crate) fn commit(mut self) {
        self.armed = false;
        self.ledger.commit(self.checkpoint);
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some((registry, len)) = self.registry {
            registry.truncate(len);
        }
        self.events.truncate(self.events_len);
        self.ledger.revert(self.checkpoint);
        debug!(events_len = self.events_len, "operation rolled back");
    }
}
