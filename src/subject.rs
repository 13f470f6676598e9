use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt::{self, Debug, Formatter},
    rc::{Rc, Weak},
};

type Observer<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// A value which remembers the last thing it emitted and replays it to every
/// new subscriber before forwarding later emissions.
///
/// Everything happens synchronously on the calling thread. By the time
/// [`Subject::next()`] returns, every observer that was attached when it was
/// called has seen the new value.
pub struct Subject<T> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<(u64, Observer<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone + 'static> Subject<T> {
    pub fn new(initial: T) -> Self {
        Subject {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// The most recently emitted value.
    pub fn value(&self) -> T { self.inner.value.borrow().clone() }

    /// How many observers are currently attached.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Store `value` and hand it to every attached observer, in the order
    /// they subscribed.
    pub fn next(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();

        // observers are free to (un)subscribe while we iterate
        let snapshot: Vec<(u64, Observer<T>)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();

        for (id, observer) in snapshot {
            if !self.inner.is_attached(id) {
                continue;
            }

            match observer.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(&value),
                Err(_) => {
                    log::warn!(
                        "Skipping observer {} because it is already running",
                        id
                    );
                },
            }
        }
    }

    /// Attach an observer, immediately calling it with the current value.
    ///
    /// The observer stays attached until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe()`] is called.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let observer: Observer<T> = Rc::new(RefCell::new(observer));

        let current = self.value();
        (&mut *observer.borrow_mut())(&current);

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.observers.borrow_mut().push((id, observer));

        let inner: Weak<Inner<T>> = Rc::downgrade(&self.inner);

        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.observers.borrow_mut().retain(|(i, _)| *i != id);
                }
            })),
        }
    }

    /// Subscribe with an observer that just queues every value it sees.
    pub fn watch(&self) -> Receiver<T> {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&queue);
        let subscription = self.subscribe(move |value: &T| {
            sink.borrow_mut().push_back(value.clone());
        });

        Receiver {
            queue,
            _subscription: subscription,
        }
    }
}

impl<T> Inner<T> {
    fn is_attached(&self, id: u64) -> bool {
        self.observers.borrow().iter().any(|(i, _)| *i == id)
    }
}

impl<T: Debug> Debug for Subject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

/// A handle which keeps an observer attached to a [`Subject`].
#[must_use = "The observer is detached as soon as the subscription is dropped"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Stop receiving values.
    pub fn unsubscribe(mut self) { self.run_detach(); }

    /// Keep the observer attached for as long as the subject lives.
    pub fn forget(mut self) { self.detach = None; }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) { self.run_detach(); }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Values seen by a [`Subject::watch()`] subscription, oldest first.
pub struct Receiver<T> {
    queue: Rc<RefCell<VecDeque<T>>>,
    _subscription: Subscription,
}

impl<T> Receiver<T> {
    /// Pop the oldest value which hasn't been read yet.
    pub fn try_recv(&self) -> Option<T> {
        self.queue.borrow_mut().pop_front()
    }

    /// Take every pending value.
    pub fn drain(&self) -> Vec<T> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl<T: Debug> Debug for Receiver<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("pending", &*self.queue.borrow())
            .finish()
    }
}
