/// ValueRow - a row that owns a typed value
///
/// The value lives behind a [`ValueSource`], usually a live read/write
/// through to a persistence collaborator. The source is private to the row,
/// so the only way to write it is [`ValueRow::set_value`], which always
/// publishes [`PropertyKey::Value`] on a real change.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::observable::{set_observed, Observable, PropertyKey};
use super::RowBase;

/// Backing store a value row reads and writes through
pub trait ValueSource<T> {
    fn get(&self) -> T;
    fn set(&mut self, value: T);
}

/// In-memory backing store
#[derive(Debug, Clone, Default)]
pub struct MemorySource<T>(T);

impl<T> MemorySource<T> {
    pub fn new(value: T) -> Self {
        MemorySource(value)
    }
}

impl<T: Clone> ValueSource<T> for MemorySource<T> {
    fn get(&self) -> T {
        self.0.clone()
    }

    fn set(&mut self, value: T) {
        self.0 = value;
    }
}

/// Shared backing store; the other handle sees every write
impl<T: Clone> ValueSource<T> for Rc<RefCell<T>> {
    fn get(&self) -> T {
        self.borrow().clone()
    }

    fn set(&mut self, value: T) {
        *self.borrow_mut() = value;
    }
}

/// Commit `new` and publish [`PropertyKey::Value`] plus `extra`, if it differs from `old`
///
/// Notification order is `Value`, then each key of `extra`, then
/// `after_changed`. Equal values are a no-op.
pub fn set_value<T, A, F>(
    observable: &Observable,
    new: T,
    old: &T,
    apply: A,
    extra: &[PropertyKey],
    after_changed: F,
) -> bool
where
    T: PartialEq,
    A: FnOnce(&T),
    F: FnOnce(&T),
{
    set_observed(observable, new, old, apply, &[PropertyKey::Value], |v| {
        for key in extra {
            observable.notify(*key);
        }
        after_changed(v);
    })
}

type AfterChanged<T> = Box<dyn FnMut(&T)>;

/// Row state for a row carrying a value of type `T`
pub struct ValueRow<T> {
    base: RowBase,
    source: Box<dyn ValueSource<T>>,
    after_changed: Option<AfterChanged<T>>,
}

impl<T: PartialEq + Clone + 'static> ValueRow<T> {
    pub fn new(base: RowBase, source: impl ValueSource<T> + 'static) -> Self {
        Self {
            base,
            source: Box::new(source),
            after_changed: None,
        }
    }

    /// Run `hook` after every committed change
    pub fn with_after_changed(mut self, hook: impl FnMut(&T) + 'static) -> Self {
        self.after_changed = Some(Box::new(hook));
        self
    }

    pub fn base(&self) -> &RowBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut RowBase {
        &mut self.base
    }

    pub fn value(&self) -> T {
        self.source.get()
    }

    pub fn set_value(&mut self, new: T) -> bool {
        self.set_value_with(new, &[])
    }

    /// Like [`ValueRow::set_value`], also publishing `extra` for derived properties
    pub fn set_value_with(&mut self, new: T, extra: &[PropertyKey]) -> bool {
        let old = self.source.get();
        let source = &mut self.source;
        let after_changed = &mut self.after_changed;
        set_value(
            self.base.observable(),
            new,
            &old,
            |v| source.set(v.clone()),
            extra,
            |v| {
                if let Some(hook) = after_changed {
                    hook(v);
                }
            },
        )
    }
}

impl<T> fmt::Debug for ValueRow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRow")
            .field("base", &self.base)
            .field("after_changed", &self.after_changed.is_some())
            .finish_non_exhaustive()
    }
}
