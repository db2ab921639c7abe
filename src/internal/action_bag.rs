//! Internal action bag for ordered release callbacks.

use crate::DisposeResult;

/// A release callback. Runs at most once.
pub(crate) type Action = Box<dyn FnOnce() -> DisposeResult<()> + Send>;

/// Container for release callbacks with FIFO execution order.
#[derive(Default)]
pub(crate) struct ActionBag {
    actions: Vec<Action>,
}

impl ActionBag {
    /// Add an infallible callback.
    pub(crate) fn push_infallible<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.actions.push(Box::new(move || {
            f();
            Ok(())
        }));
    }

    /// Add a fallible callback.
    pub(crate) fn push<F>(&mut self, f: F)
    where
        F: FnOnce() -> DisposeResult<()> + Send + 'static,
    {
        self.actions.push(Box::new(f));
    }

    /// Execute all callbacks in registration order (FIFO).
    ///
    /// The bag is drained up front, so a second call runs nothing. The first
    /// failure stops the sequence; the callbacks after it are dropped unrun.
    pub(crate) fn run_all_in_order(&mut self) -> DisposeResult<()> {
        for action in std::mem::take(&mut self.actions) {
            (action)()?;
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.actions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DisposeError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn runs_fifo_once() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bag = ActionBag::default();
        for i in 0..3 {
            let order = order.clone();
            bag.push_infallible(move || order.lock().unwrap().push(i));
        }
        assert_eq!(bag.len(), 3);

        bag.run_all_in_order().unwrap();
        bag.run_all_in_order().unwrap();
        assert!(bag.is_empty());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn stops_at_first_failure() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bag = ActionBag::default();
        {
            let order = order.clone();
            bag.push_infallible(move || order.lock().unwrap().push("first"));
        }
        bag.push(|| Err(DisposeError::hook("second")));
        {
            let order = order.clone();
            bag.push_infallible(move || order.lock().unwrap().push("third"));
        }

        assert_eq!(bag.run_all_in_order(), Err(DisposeError::hook("second")));
        assert!(bag.is_empty());
        assert_eq!(*order.lock().unwrap(), vec!["first"]);
    }
}
