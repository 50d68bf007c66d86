use std::fmt;

/// A mutable value with publish-on-change semantics.
///
/// Observers are plain closures invoked synchronously, in registration
/// order, every time the value is reassigned or updated in place. The
/// notification always completes before the mutating call returns.
pub struct Observable<T> {
    value: T,
    observers: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            observers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Registers an observer. It is not called with the current value;
    /// notifications start with the next change.
    pub fn subscribe(&mut self, observer: impl FnMut(&T) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutates the value in place, then notifies. The closure's return value
    /// is passed through so callers can report what changed.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let result = mutate(&mut self.value);
        self.notify();
        result
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
