//! Signals for widget-to-owner notification.
//!
//! A widget exposes a [`Signal`] per event it reports; its owner connects
//! closures (slots) to it. Emitting calls every connected slot with a
//! reference to the payload, synchronously and on the emitting thread.
//!
//! The slot table is snapshotted before slots run, so a slot may connect or
//! disconnect on the signal that is calling it.
//!
//! # Example
//!
//! ```
//! use account_lookup_core::Signal;
//!
//! let resolved = Signal::<(bool, String)>::new();
//!
//! let id = resolved.connect(|(duplicate, text)| {
//!     println!("{text}: duplicate={duplicate}");
//! });
//!
//! resolved.emit((false, "Contoso".to_string()));
//! resolved.disconnect(id);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifies one connection on one signal.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A notification source with any number of connected slots.
///
/// `Signal` is `Send + Sync`, so slots must be as well.
pub struct Signal<Args> {
    slots: Arc<SlotTable<Args>>,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Connect a slot. Keep the returned id to disconnect it later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that stays connected while the returned guard lives.
    ///
    /// The guard holds the slot table weakly and may outlive the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            id: self.connect(slot),
            slots: Arc::downgrade(&self.slots),
        }
    }

    /// Remove a slot. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Call every connected slot with `args`.
    #[tracing::instrument(skip_all, target = "account_lookup_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emit");

        for slot in &snapshot {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

/// Disconnects its slot when dropped. Created by [`Signal::connect_scoped`].
pub struct ConnectionGuard<Args> {
    id: ConnectionId,
    slots: Weak<SlotTable<Args>>,
}

impl<Args> ConnectionGuard<Args> {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().remove(self.id);
        }
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&String) + Send + Sync + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        (log, move |text: &String| sink.lock().push(text.clone()))
    }

    #[test]
    fn test_every_slot_sees_each_emit() {
        let signal = Signal::<String>::new();
        let (first, slot) = recorder();
        signal.connect(slot);
        let (second, slot) = recorder();
        signal.connect(slot);

        signal.emit("Acme".into());
        signal.emit("Fabrikam".into());

        assert_eq!(*first.lock(), ["Acme", "Fabrikam"]);
        assert_eq!(*second.lock(), ["Acme", "Fabrikam"]);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<String>::new();
        let (log, slot) = recorder();
        let id = signal.connect(slot);

        signal.emit("before".into());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit("after".into());

        assert_eq!(*log.lock(), ["before"]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_scoped_connection() {
        let signal = Signal::<String>::new();
        let (log, slot) = recorder();
        let guard = signal.connect_scoped(slot);

        signal.emit("kept".into());
        drop(guard);
        signal.emit("dropped".into());

        assert_eq!(*log.lock(), ["kept"]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_outlives_signal() {
        let signal = Signal::<String>::new();
        let guard = signal.connect_scoped(|_| {});
        drop(signal);
        drop(guard);
    }

    #[test]
    fn test_one_shot_slot_disconnects_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let own_id = Arc::new(Mutex::new(None::<ConnectionId>));
        let calls = Arc::new(Mutex::new(0));

        let (weak, id_cell, counter) = (Arc::downgrade(&signal), own_id.clone(), calls.clone());
        let id = signal.connect(move |_| {
            *counter.lock() += 1;
            if let (Some(signal), Some(id)) = (weak.upgrade(), id_cell.lock().take()) {
                signal.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(*calls.lock(), 1);
    }
}
