//! Owned view state plus weak handles for async continuations.
//!
//! A view (chat, upload form, document list, ...) owns a [`ViewState`].
//! Work spawned on its behalf only carries a [`ViewRef`], so a request that
//! completes after the view was dropped cannot touch freed state: the
//! update is skipped and reported as [`ClientError::Detached`].
//!
//! Borrows are scoped to the closure passed to `update`; never hold one
//! across an `.await`.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};
use unibot_types::{ClientError, Result};

pub struct ViewState<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> ViewState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub fn downgrade(&self) -> ViewRef<T> {
        ViewRef {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

pub struct ViewRef<T> {
    inner: Weak<RefCell<T>>,
}

impl<T> Clone for ViewRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> ViewRef<T> {
    /// Apply `f` if the owning view is still alive.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let cell = self.inner.upgrade().ok_or(ClientError::Detached)?;
        let mut state = cell.borrow_mut();
        Ok(f(&mut state))
    }

    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
