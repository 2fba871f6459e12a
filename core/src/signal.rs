use std::rc::Rc;
use core::fmt;
use hashbrown::HashMap;

/// Receives values emitted by a [`Signal`].
///
/// Observers run synchronously inside the mutating call that produced the value, so they
/// must not try to mutate the board they observe.
pub trait Observer<T: ?Sized> {
    fn notify(&self, value: &T);
}

impl<T: ?Sized, F: Fn(&T)> Observer<T> for F {
    fn notify(&self, value: &T) {
        self(value)
    }
}

/// One-to-many synchronous notification channel.
///
/// Observers form a set keyed by identity: subscribing the same `Rc` twice has no effect, and
/// delivery order is unspecified.
pub struct Signal<T: ?Sized> {
    observers: HashMap<usize, Rc<dyn Observer<T>>>,
}

impl<T: ?Sized> Signal<T> {
    pub fn new() -> Self {
        Self {
            observers: HashMap::new(),
        }
    }

    /// Returns `false` if `observer` was already subscribed.
    pub fn subscribe(&mut self, observer: &Rc<dyn Observer<T>>) -> bool {
        self.observers
            .insert(observer_key(observer), Rc::clone(observer))
            .is_none()
    }

    /// Returns `false` if `observer` was not subscribed.
    pub fn unsubscribe(&mut self, observer: &Rc<dyn Observer<T>>) -> bool {
        self.observers.remove(&observer_key(observer)).is_some()
    }

    pub fn emit(&self, value: &T) {
        for observer in self.observers.values() {
            observer.notify(value);
        }
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T: ?Sized> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Address of the shared allocation; stable while the signal holds a clone of the `Rc`.
fn observer_key<T: ?Sized>(observer: &Rc<dyn Observer<T>>) -> usize {
    Rc::as_ptr(observer).cast::<()>() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, Rc<dyn Observer<u32>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let observer: Rc<dyn Observer<u32>> = Rc::new(move |value: &u32| {
            sink.borrow_mut().push(*value);
        });
        (seen, observer)
    }

    #[test]
    fn emit_reaches_every_observer() {
        let mut signal = Signal::new();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();

        signal.subscribe(&first);
        signal.subscribe(&second);
        signal.emit(&7);

        assert_eq!(*first_seen.borrow(), vec![7]);
        assert_eq!(*second_seen.borrow(), vec![7]);
    }

    #[test]
    fn subscribing_twice_is_idempotent() {
        let mut signal = Signal::new();
        let (seen, observer) = recorder();

        assert!(signal.subscribe(&observer));
        assert!(!signal.subscribe(&observer));
        signal.emit(&1);

        assert_eq!(signal.len(), 1);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn unsubscribe_and_clear_stop_delivery() {
        let mut signal = Signal::new();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        signal.subscribe(&first);
        signal.subscribe(&second);

        assert!(signal.unsubscribe(&first));
        assert!(!signal.unsubscribe(&first));
        signal.emit(&2);
        signal.clear();
        signal.emit(&3);

        assert!(first_seen.borrow().is_empty());
        assert_eq!(*second_seen.borrow(), vec![2]);
        assert!(signal.is_empty());
    }

    #[test]
    fn clear_releases_observers() {
        let mut signal = Signal::new();
        let (_, observer) = recorder();
        signal.subscribe(&observer);

        assert_eq!(Rc::strong_count(&observer), 2);
        signal.clear();
        assert_eq!(Rc::strong_count(&observer), 1);
    }
}
