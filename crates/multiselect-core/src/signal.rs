//! Signal/slot notifications.
//!
//! A [`Signal<Args>`] holds any number of connected slots (closures) and calls
//! each of them, in connection order, when the signal is emitted. Widgets
//! expose their notifications as public signal fields:
//!
//! ```
//! use multiselect_core::Signal;
//!
//! let selected = Signal::<String>::new();
//!
//! let id = selected.connect(|value| {
//!     println!("selected: {value}");
//! });
//!
//! selected.emit("apple".to_string());
//! selected.disconnect(id);
//! ```
//!
//! Emission is synchronous: `emit` returns after every slot has run. The slot
//! list is snapshotted before the first slot runs, so a slot may connect or
//! disconnect other slots on the same signal without deadlocking; such edits
//! take effect on the next emission.

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};
use static_assertions::assert_impl_all;

use crate::logging::targets;

new_key_type! {
    /// Identifies one signal-slot connection.
    ///
    /// Returned by [`Signal::connect`] and consumed by [`Signal::disconnect`].
    /// Stays valid until the connection is removed or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal with any number of connected slots.
///
/// # Type Parameter
///
/// - `Args`: the value passed to every slot. Use `()` for argument-less
///   signals and a tuple or struct for several values.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
}

struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    /// Connection order; slot keys are reused after removal.
    order: Vec<ConnectionId>,
}

assert_impl_all!(Signal<()>: Send, Sync);
assert_impl_all!(Signal<String>: Send, Sync);

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                order: Vec::new(),
            }),
        }
    }

    /// Connect a slot, returning the id needed to disconnect it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let id = connections.slots.insert(Arc::new(slot));
        connections.order.push(id);
        id
    }

    /// Disconnect a slot.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        connections.order.retain(|&existing| existing != id);
        connections.slots.remove(id).is_some()
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Call every connected slot with `args`.
    #[tracing::instrument(skip_all, target = "multiselect_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = {
            let connections = self.connections.lock();
            connections
                .order
                .iter()
                .filter_map(|id| connections.slots.get(*id).cloned())
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(i));
        }

        assert_eq!(signal.connection_count(), 3);
        signal.emit(());
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_order_survives_reused_keys() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = signal.connect(|_| {});
        let order_clone = order.clone();
        signal.connect(move |_| order_clone.lock().push("second"));
        signal.disconnect(first);
        let order_clone = order.clone();
        signal.connect(move |_| order_clone.lock().push("third"));

        signal.emit(());
        assert_eq!(*order.lock(), vec!["second", "third"]);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(Mutex::new(0));

        let id = Arc::new(Mutex::new(None));
        let signal_clone = signal.clone();
        let id_clone = id.clone();
        let calls_clone = calls.clone();
        let conn = signal.connect(move |_| {
            *calls_clone.lock() += 1;
            if let Some(id) = id_clone.lock().take() {
                signal_clone.disconnect(id);
            }
        });
        *id.lock() = Some(conn);

        signal.emit(());
        signal.emit(());

        assert_eq!(*calls.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_signal_with_struct_args() {
        #[derive(Clone, Debug, PartialEq)]
        struct Picked {
            value: String,
            count: usize,
        }

        let signal = Signal::<Picked>::new();
        let received = Arc::new(Mutex::new(None));

        let received_clone = received.clone();
        signal.connect(move |args| {
            *received_clone.lock() = Some(args.clone());
        });

        signal.emit(Picked {
            value: "b".into(),
            count: 2,
        });

        assert_eq!(
            received.lock().clone(),
            Some(Picked {
                value: "b".into(),
                count: 2
            })
        );
    }
}
