use std::{cell::RefCell, fmt, rc::Rc};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), BoxError>;

type Handler<S, T> = Rc<dyn Fn(&S, &T) -> HandlerResult>;

/// Synchronous publish/subscribe channel for one kind of notification.
///
/// Handlers receive the publishing entity and the payload, in the order they
/// subscribed. The first handler error stops delivery and is returned from
/// [`Channel::publish`]. Delivery works on a snapshot of the handler list, so
/// handlers added while a publish is running only see later publishes.
pub struct Channel<S, T> {
    handlers: RefCell<Vec<Handler<S, T>>>,
}

impl<S, T> Channel<S, T> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&S, &T) -> HandlerResult + 'static,
    {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    pub fn publish(&self, sender: &S, payload: &T) -> HandlerResult {
        let handlers = self.handlers.borrow().clone();

        handlers
            .iter()
            .try_for_each(|handler| handler(sender, payload))
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<S, T> Default for Channel<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> fmt::Debug for Channel<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("handlers", &self.len())
            .finish()
    }
}
