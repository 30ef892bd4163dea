use crate::{CopyDefault, Error, Hook, Identity, PoolBuilder, Produce, Result};
use alloc::{collections::VecDeque, rc::Rc, vec::Vec};
use core::{
    any::type_name,
    borrow::Borrow,
    cell::RefCell,
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
    ops::{Deref, DerefMut},
};

/// A recycling object pool for the local thread, it cannot be shared between
/// threads.
///
/// Items handed back with [`Self::toss`] are kept on a LIFO stack and reused
/// by later pulls, most recently tossed first. When the stack is empty the
/// pool's [`Produce`] policy makes a new item from the default value.
///
/// When tracking is enabled, the pool also remembers every item that is
/// currently pulled so that [`Self::toss_all_back`] can recall them in one go.
/// Tossed items are matched against that set with [`Identity`], so the
/// intended element types are handles (`Rc<_>`, ids, small `Copy` values)
/// rather than large owned values.
///
/// The pool never drops an item on its own accord; it only tracks which items
/// are available.
pub struct Pool<T, P = CopyDefault> {
    producer: P,
    state: RefCell<State<T>>,
    on_pull: Option<Hook<T>>,
    on_toss: Option<Hook<T>>,
}

struct State<T> {
    available: Vec<T>,
    // In pull order. `None` when tracking is disabled.
    outstanding: Option<VecDeque<T>>,
    default_value: Option<T>,
}

impl<T> Pool<T> {
    /// Creates an empty pool with outstanding tracking enabled, no default
    /// value and no hooks.
    pub fn new() -> Self {
        PoolBuilder::new().build()
    }

    /// Creates an empty pool that hands out copies of `value` when it has
    /// nothing to recycle.
    pub fn with_default(value: T) -> Self {
        PoolBuilder::new().default_value(value).build()
    }

    /// Returns a builder to customize the pool configuration.
    pub fn builder() -> PoolBuilder<T> {
        PoolBuilder::new()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> Pool<T, P> {
    pub(crate) fn from_parts(
        producer: P,
        default_value: Option<T>,
        track_outstanding: bool,
        on_pull: Option<Hook<T>>,
        on_toss: Option<Hook<T>>,
    ) -> Self {
        Pool {
            producer,
            state: RefCell::new(State {
                available: Vec::new(),
                outstanding: track_outstanding.then(VecDeque::new),
                default_value,
            }),
            on_pull,
            on_toss,
        }
    }

    /// Wraps the pool with a reference counter so several owners on the same
    /// thread can share it.
    pub fn to_rc(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Replaces the default value used when producing new items.
    ///
    /// Takes effect for the next production. Items already in the pool are
    /// not touched.
    pub fn set_default(&self, value: T) {
        self.state.borrow_mut().default_value = Some(value);
    }

    /// Returns whether a default value is set.
    pub fn has_default(&self) -> bool {
        self.state.borrow().default_value.is_some()
    }

    /// Returns whether this pool keeps track of pulled items.
    pub fn is_tracking(&self) -> bool {
        self.state.borrow().outstanding.is_some()
    }

    /// Gets the number of items ready to be recycled from the pool.
    pub fn len(&self) -> usize {
        self.state.borrow().available.len()
    }

    /// Checks if the pool has no items ready to be recycled.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().available.is_empty()
    }

    /// Gets the number of items currently pulled and not yet tossed back, or
    /// `None` if tracking is disabled.
    pub fn outstanding_len(&self) -> Option<usize> {
        self.state.borrow().outstanding.as_ref().map(VecDeque::len)
    }
}

impl<T: Clone + Identity, P: Produce<T>> Pool<T, P> {
    /// Produces `count` new items directly into the pool.
    ///
    /// No hooks run and nothing is recorded as outstanding. If production
    /// fails, the items produced so far stay in the pool.
    pub fn prefill(&self, count: usize) -> Result<()> {
        for _ in 0..count {
            let item = self.produce()?;
            self.state.borrow_mut().available.push(item);
        }
        Ok(())
    }

    /// Gets an item from the pool.
    ///
    /// The most recently tossed item is returned first. If the pool is empty,
    /// a new item is made by the production policy. The item is recorded as
    /// outstanding, then the pull hook runs with it before it is returned.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::PreconditionViolation`] if the pool is empty and
    /// the production policy requires a default value that is not set.
    pub fn pull(&self) -> Result<T> {
        let recycled = self.state.borrow_mut().available.pop();
        let item = match recycled {
            Some(item) => item,
            None => self.produce()?,
        };

        if let Some(outstanding) = self.state.borrow_mut().outstanding.as_mut() {
            outstanding.push_back(item.clone());
        }

        if let Some(on_pull) = &self.on_pull {
            on_pull(&item);
        }
        Ok(item)
    }

    /// Pulls `count` items, appending them to `out` in pull order.
    ///
    /// A count of zero does nothing.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] if `count` is negative, and with
    /// any error [`Self::pull`] can return. Items pulled before a failure
    /// remain in `out`.
    pub fn pull_many(&self, count: isize, out: &mut Vec<T>) -> Result<()> {
        let count = usize::try_from(count).map_err(|_| Error::InvalidArgument { count })?;
        out.reserve(count);
        for _ in 0..count {
            out.push(self.pull()?);
        }
        Ok(())
    }

    /// Gets an item wrapped in a guard that tosses it back when dropped.
    pub fn pull_scoped(&self) -> Result<Pulled<'_, T, P>> {
        self.pull().map(|item| Pulled::new(item, self))
    }

    /// Returns an item to the pool, making it available for reuse.
    ///
    /// The item is pushed onto the stack and dropped from the outstanding
    /// set before the toss hook runs with it, so a panicking hook cannot lose
    /// the item. Finding the item in the outstanding set is a linear scan from
    /// the oldest pull.
    ///
    /// Tossing an item the pool never handed out is accepted; it simply
    /// becomes available. Tossing the same item twice makes it available
    /// twice.
    pub fn toss(&self, item: T) {
        let seen = self.on_toss.as_ref().map(|_| item.clone());

        {
            let mut state = self.state.borrow_mut();
            if let Some(outstanding) = state.outstanding.as_mut() {
                if let Some(index) = outstanding.iter().position(|held| held.is_same(&item)) {
                    outstanding.remove(index);
                }
            }
            state.available.push(item);
        }

        if let (Some(on_toss), Some(item)) = (&self.on_toss, seen) {
            on_toss(&item);
        }
    }

    /// Tosses every item in `items`, in iteration order.
    ///
    /// This is not atomic: if a hook panics part way through, the items
    /// before it have already been tossed.
    pub fn toss_many<I: IntoIterator<Item = T>>(&self, items: I) {
        for item in items {
            self.toss(item);
        }
    }

    /// Tosses back every item that is currently pulled, in pull order.
    ///
    /// Each recalled item is found at the front of the outstanding set, so a
    /// recall is linear in the number of outstanding items. If a toss hook
    /// panics, the items recalled before it stay tossed and the rest stay
    /// outstanding.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidOperation`] if tracking is disabled.
    pub fn toss_all_back(&self) -> Result<()> {
        let snapshot = self
            .state
            .borrow()
            .outstanding
            .clone()
            .ok_or(Error::InvalidOperation {
                operation: "toss_all_back",
            })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            count = snapshot.len(),
            item_type = type_name::<T>(),
            "tossing back all outstanding items"
        );

        self.toss_many(snapshot);

        if let Some(outstanding) = self.state.borrow_mut().outstanding.as_mut() {
            outstanding.clear();
        }
        Ok(())
    }

    fn produce(&self) -> Result<T> {
        #[cfg(feature = "tracing")]
        tracing::debug!(item_type = type_name::<T>(), "pool empty, producing new item");

        // Cloned so a producer may call back into the pool.
        let default_value = self.state.borrow().default_value.clone();
        self.producer.produce(default_value.as_ref())
    }
}

impl<T, P: fmt::Debug> fmt::Debug for Pool<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Pool")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("producer", &self.producer)
            .field("available", &state.available.len())
            .field("outstanding", &state.outstanding.as_ref().map(VecDeque::len))
            .field("has_default", &state.default_value.is_some())
            .finish()
    }
}

/// A guard over an item pulled from a [`Pool`].
///
/// The item is tossed back to the pool when the guard is dropped.
pub struct Pulled<'a, T: Clone + Identity, P: Produce<T>> {
    item: ManuallyDrop<T>,
    pool: &'a Pool<T, P>,
}

impl<'a, T: Clone + Identity, P: Produce<T>> Pulled<'a, T, P> {
    fn new(item: T, pool: &'a Pool<T, P>) -> Self {
        Pulled {
            item: ManuallyDrop::new(item),
            pool,
        }
    }

    /// Consumes the guard and returns the item without tossing it back.
    ///
    /// If the pool tracks outstanding items, the item is still counted as
    /// outstanding and will be recalled by [`Pool::toss_all_back`].
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the item is taken exactly once.
        unsafe { ManuallyDrop::take(&mut this.item) }
    }
}

impl<T: Clone + Identity, P: Produce<T>> Deref for Pulled<'_, T, P> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<T: Clone + Identity, P: Produce<T>> DerefMut for Pulled<'_, T, P> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.item
    }
}

impl<T: Clone + Identity, P: Produce<T>> Drop for Pulled<'_, T, P> {
    fn drop(&mut self) {
        // SAFETY: the item is taken only here or in `into_inner`, which
        // prevents this drop from running.
        let item = unsafe { ManuallyDrop::take(&mut self.item) };
        self.pool.toss(item);
    }
}

impl<T: Clone + Identity + Hash, P: Produce<T>> Hash for Pulled<'_, T, P> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Clone + Identity + fmt::Display, P: Produce<T>> fmt::Display for Pulled<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: Clone + Identity + fmt::Debug, P: Produce<T>> fmt::Debug for Pulled<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: Clone + Identity + PartialEq, P: Produce<T>> PartialEq for Pulled<'_, T, P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Clone + Identity + Eq, P: Produce<T>> Eq for Pulled<'_, T, P> {}

impl<T: Clone + Identity, P: Produce<T>> Borrow<T> for Pulled<'_, T, P> {
    #[inline(always)]
    fn borrow(&self) -> &T {
        self
    }
}

impl<T: Clone + Identity, P: Produce<T>> AsRef<T> for Pulled<'_, T, P> {
    #[inline(always)]
    fn as_ref(&self) -> &T {
        self
    }
}
