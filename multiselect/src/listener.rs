//! Host-wide pointer listeners with scoped registration.
//!
//! The host owns one [`PointerHub`] and feeds it every pointer-down event.
//! A control registers a listener only while its panel is open and holds
//! the returned [`ListenerGuard`]; dropping the guard deregisters, so a
//! closed or torn-down control can never be reached from the hub.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// A pointer-down event in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: u16,
    pub y: u16,
}

impl PointerEvent {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Identifier of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__pointer_listener_{}", self.0)
    }
}

type Listener = Arc<dyn Fn(&PointerEvent) + Send + Sync>;
type Registry = RwLock<Vec<(ListenerId, Listener)>>;

/// Host-wide dispatcher of pointer-down events.
///
/// Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    listeners: Arc<Registry>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "dropping the guard deregisters the listener immediately"]
    pub fn register<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        let listener: Listener = Arc::new(listener);
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        log::debug!("PointerHub register {}", id);
        ListenerGuard {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver `event` to every registered listener.
    ///
    /// Listeners run without the registry lock held, so a listener may drop
    /// its own guard (or register new ones) while being called. Returns the
    /// number of listeners invoked.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let snapshot: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Keeps a listener registered. Deregisters on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<Registry>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Hub already gone: nothing left to deregister from.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _)| *id != self.id);
        log::debug!("PointerHub deregister {}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn test_guard_drop_deregisters() {
        let hub = PointerHub::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let guard = hub.register(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hub.len(), 1);
        assert_eq!(hub.dispatch(&PointerEvent::new(0, 0)), 1);

        drop(guard);
        assert!(hub.is_empty());
        assert_eq!(hub.dispatch(&PointerEvent::new(0, 0)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_drop_its_own_guard() {
        let hub = PointerHub::new();
        let slot: Arc<Mutex<Option<ListenerGuard>>> = Arc::new(Mutex::new(None));

        let inner_slot = Arc::clone(&slot);
        let guard = hub.register(move |_| {
            inner_slot.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(guard);

        hub.dispatch(&PointerEvent::new(3, 4));
        assert!(hub.is_empty());
    }

    #[test]
    fn test_guard_outliving_hub() {
        let hub = PointerHub::new();
        let guard = hub.register(|_| {});
        drop(hub);
        drop(guard);
    }
}
