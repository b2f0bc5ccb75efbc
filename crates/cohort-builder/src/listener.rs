//! Change notifications for query builder sessions

/// Observer of a [`QueryBuilder`](crate::QueryBuilder) session.
///
/// Both callbacks fire synchronously after every applied mutation; the
/// listener reads the new state back from the session.
pub trait QueryBuilderListener: Send {
    /// The user interacted with the tree
    fn touched(&mut self) {}

    /// The tree value changed
    fn changed(&mut self) {}
}

/// Listener built from two closures
pub struct CallbackListener<T, C>
where
    T: FnMut() + Send,
    C: FnMut() + Send,
{
    on_touched: T,
    on_changed: C,
}

impl<T, C> CallbackListener<T, C>
where
    T: FnMut() + Send,
    C: FnMut() + Send,
{
    pub fn new(on_touched: T, on_changed: C) -> Self {
        Self {
            on_touched,
            on_changed,
        }
    }
}

impl<T, C> QueryBuilderListener for CallbackListener<T, C>
where
    T: FnMut() + Send,
    C: FnMut() + Send,
{
    fn touched(&mut self) {
        (self.on_touched)()
    }

    fn changed(&mut self) {
        (self.on_changed)()
    }
}
