/// Observable - property-change channel shared by every row
///
/// A row publishes the name of a property that changed; subscribers re-read
/// the property from the row. Delivery is synchronous and in subscription order.

use std::fmt;

/// Named properties a row can publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Value,
    SelectedEntry,
    Description,
    Enabled,
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKey::Value => "value",
            PropertyKey::SelectedEntry => "selectedEntry",
            PropertyKey::Description => "description",
            PropertyKey::Enabled => "enabled",
        };
        f.write_str(name)
    }
}

/// Handle returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(PropertyKey)>;

/// Publish/subscribe channel for property changes
#[derive(Default)]
pub struct Observable {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Observable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; it stays registered until [`Observable::unsubscribe`]
    pub fn subscribe(&mut self, subscriber: impl Fn(PropertyKey) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Publish that `key` changed
    pub fn notify(&self, key: PropertyKey) {
        tracing::trace!("OBSERVABLE: notify {} ({} subscribers)", key, self.subscribers.len());
        for (_, subscriber) in &self.subscribers {
            subscriber(key);
        }
    }
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Commit `new` through `apply` and publish `keys` if it differs from `old`
///
/// Setting a property to its current value is a no-op: no keys are published
/// and `after_changed` is not called. Returns whether a change happened.
pub fn set_observed<T, A, F>(
    observable: &Observable,
    new: T,
    old: &T,
    apply: A,
    keys: &[PropertyKey],
    after_changed: F,
) -> bool
where
    T: PartialEq,
    A: FnOnce(&T),
    F: FnOnce(&T),
{
    if new == *old {
        return false;
    }

    apply(&new);
    for key in keys {
        observable.notify(*key);
    }
    after_changed(&new);
    true
}
