use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

use super::subscription::SubscriptionId;

/// Shared handler closure. Registering the same `Rc` twice is a no-op.
pub type Handler<S, P> = Rc<dyn Fn(&S, &P)>;

struct Registration<S, P> {
    id: SubscriptionId,
    handler: Handler<S, P>,
}

/// Ordered list of handlers invoked synchronously on [`trigger`](Self::trigger).
///
/// Handlers run on the triggering thread in registration order. The list
/// lives behind a `RefCell`, so `add`/`remove` take `&self` and a handler may
/// subscribe or unsubscribe on the channel that is currently dispatching.
/// `trigger` works on a snapshot taken before the first handler runs:
/// changes made during a dispatch take effect from the next trigger.
pub struct EventChannel<S, P> {
    handlers: RefCell<Vec<Registration<S, P>>>,
}

impl<S, P> EventChannel<S, P> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// True when nobody is listening
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Whether `id` is still registered here
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.handlers.borrow().iter().any(|r| r.id == id)
    }

    /// Register a closure at the end of the dispatch order
    pub fn add<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&S, &P) + 'static,
    {
        let handler: Handler<S, P> = Rc::new(handler);
        self.add_shared(&handler)
    }

    /// Register a shared handler.
    ///
    /// If the same `Rc` is already registered nothing changes and its
    /// existing id is returned.
    pub fn add_shared(&self, handler: &Handler<S, P>) -> SubscriptionId {
        let mut handlers = self.handlers.borrow_mut();
        if let Some(existing) = handlers.iter().find(|r| Rc::ptr_eq(&r.handler, handler)) {
            debug!("Handler already registered as {}", existing.id);
            return existing.id;
        }

        let id = SubscriptionId::next();
        handlers.push(Registration {
            id,
            handler: Rc::clone(handler),
        });
        debug!("Registered {} ({} handlers)", id, handlers.len());
        id
    }

    /// Unregister a handler. Returns false if `id` was not registered.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(index) = handlers.iter().position(|r| r.id == id) else {
            return false;
        };
        let removed = handlers.remove(index);
        debug!("Removed {} ({} handlers)", id, handlers.len());

        // Release the borrow first: dropping the handler may re-enter the channel
        drop(handlers);
        drop(removed);
        true
    }

    /// Drop every registration
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.handlers.borrow_mut());
        drop(removed);
    }

    /// Invoke every handler, in order, with `sender` and `payload`
    pub fn trigger(&self, sender: &S, payload: &P) {
        let snapshot: Vec<(SubscriptionId, Handler<S, P>)> = self
            .handlers
            .borrow()
            .iter()
            .map(|r| (r.id, Rc::clone(&r.handler)))
            .collect();

        trace!("Triggering {} handlers", snapshot.len());
        for (id, handler) in snapshot {
            trace!("Dispatching to {}", id);
            handler(sender, payload);
        }
    }
}

impl<S, P> Default for EventChannel<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> fmt::Debug for EventChannel<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<SubscriptionId> = self.handlers.borrow().iter().map(|r| r.id).collect();
        f.debug_struct("EventChannel").field("handlers", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};

    struct Button {
        label: &'static str,
    }

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Handler<Button, u32> {
        let log = Rc::clone(log);
        Rc::new(move |_: &Button, _: &u32| log.borrow_mut().push(name))
    }

    #[test]
    fn test_new_channel_is_empty() {
        let channel: EventChannel<Button, u32> = EventChannel::new();
        assert!(channel.is_empty());
        assert_eq!(channel.len(), 0);

        channel.add(|_, _| {});
        assert!(!channel.is_empty());
    }

    #[test]
    fn test_trigger_passes_sender_and_payload() {
        let channel = EventChannel::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        channel.add(move |button: &Button, clicks: &u32| {
            *sink.borrow_mut() = Some((button.label, *clicks));
        });

        channel.trigger(&Button { label: "ok" }, &2);
        assert_eq!(*seen.borrow(), Some(("ok", 2)));
    }

    #[test]
    fn test_trigger_runs_in_registration_order() {
        let channel = EventChannel::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        channel.add_shared(&recorder(&log, "first"));
        channel.add_shared(&recorder(&log, "second"));
        channel.add_shared(&recorder(&log, "third"));

        channel.trigger(&Button { label: "b" }, &0);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicate_shared_handler_is_ignored() {
        let channel = EventChannel::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let handler = recorder(&log, "once");

        let first = channel.add_shared(&handler);
        let second = channel.add_shared(&handler);
        assert_eq!(first, second);
        assert_eq!(channel.len(), 1);

        channel.trigger(&Button { label: "b" }, &0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_removed_handler_is_not_invoked() {
        let channel = EventChannel::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = channel.add(move |_: &Button, _: &u32| c.set(c.get() + 1));

        channel.trigger(&Button { label: "b" }, &0);
        assert!(channel.remove(id));
        channel.trigger(&Button { label: "b" }, &0);

        assert_eq!(count.get(), 1);
        assert!(!channel.contains(id));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let channel: EventChannel<Button, u32> = EventChannel::new();
        let other: EventChannel<Button, u32> = EventChannel::new();
        let id = other.add(|_, _| {});

        assert!(!channel.remove(id));
        assert!(other.contains(id));
    }

    #[test]
    fn test_readd_moves_handler_to_end() {
        let channel = EventChannel::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");

        let id_a = channel.add_shared(&a);
        channel.add_shared(&b);
        channel.remove(id_a);
        let readded = channel.add_shared(&a);

        assert_ne!(readded, id_a);
        channel.trigger(&Button { label: "x" }, &0);
        assert_eq!(*log.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn test_handler_can_unsubscribe_itself_during_trigger() {
        let channel: Rc<EventChannel<Button, u32>> = Rc::new(EventChannel::new());
        let count = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&channel);
        let c = Rc::clone(&count);
        let slot = Rc::clone(&own_id);
        let id = channel.add(move |_, _| {
            c.set(c.get() + 1);
            if let (Some(channel), Some(id)) = (weak.upgrade(), slot.get()) {
                channel.remove(id);
            }
        });
        own_id.set(Some(id));

        channel.trigger(&Button { label: "b" }, &0);
        channel.trigger(&Button { label: "b" }, &0);
        assert_eq!(count.get(), 1);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_handler_added_during_trigger_runs_next_time() {
        let channel: Rc<EventChannel<Button, u32>> = Rc::new(EventChannel::new());
        let late_calls = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&channel);
        let calls = Rc::clone(&late_calls);
        let armed = Cell::new(false);
        channel.add(move |_, _| {
            if armed.replace(true) {
                return;
            }
            if let Some(channel) = weak.upgrade() {
                let calls = Rc::clone(&calls);
                channel.add(move |_, _| calls.set(calls.get() + 1));
            }
        });

        channel.trigger(&Button { label: "b" }, &0);
        assert_eq!(late_calls.get(), 0);
        assert_eq!(channel.len(), 2);

        channel.trigger(&Button { label: "b" }, &0);
        assert_eq!(late_calls.get(), 1);
    }

    /// Unsubscribes another registration when dropped
    struct Unsubscriber {
        channel: std::rc::Weak<EventChannel<Button, u32>>,
        target: SubscriptionId,
    }

    impl Drop for Unsubscriber {
        fn drop(&mut self) {
            if let Some(channel) = self.channel.upgrade() {
                channel.remove(self.target);
            }
        }
    }

    #[test]
    fn test_dropping_removed_handler_can_reenter_channel() {
        let channel: Rc<EventChannel<Button, u32>> = Rc::new(EventChannel::new());
        let sibling = channel.add(|_, _| {});
        let guard = Unsubscriber {
            channel: Rc::downgrade(&channel),
            target: sibling,
        };
        let owner = channel.add(move |_, _| {
            let _held = &guard;
        });

        assert!(channel.remove(owner));
        assert!(!channel.contains(sibling));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_clear_can_reenter_channel() {
        let channel: Rc<EventChannel<Button, u32>> = Rc::new(EventChannel::new());
        let guard = Unsubscriber {
            channel: Rc::downgrade(&channel),
            target: SubscriptionId::next(),
        };
        channel.add(move |_, _| {
            let _held = &guard;
        });

        channel.clear();
        assert!(channel.is_empty());
    }

    #[test]
    fn test_clear() {
        let channel: EventChannel<Button, u32> = EventChannel::new();
        channel.add(|_, _| {});
        channel.add(|_, _| {});
        channel.clear();
        assert!(channel.is_empty());
    }

    proptest! {
        #[test]
        fn prop_len_counts_distinct_handlers(picks in proptest::collection::vec(0usize..6, 0..40)) {
            let pool: Vec<Handler<Button, u32>> = (0..6)
                .map(|_| Rc::new(|_: &Button, _: &u32| {}) as Handler<Button, u32>)
                .collect();
            let channel = EventChannel::new();
            for &i in &picks {
                channel.add_shared(&pool[i]);
            }

            let mut distinct = picks.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(channel.len(), distinct.len());
        }
    }
}
