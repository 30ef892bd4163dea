use crate::{CopyDefault, Hook, Pool};
use alloc::boxed::Box;
use core::{any::type_name, fmt};

/// Builder for creating an instance of [`Pool`].
///
/// You only need to use this builder if you want to customize the pool
/// configuration. [`Pool::new()`] gives an empty pool that tracks outstanding
/// items, has no default value and no hooks.
///
/// # Examples
///
/// ```
/// use recycle_pool::Pool;
///
/// let pool = Pool::<u32>::builder()
///     .default_value(7)
///     .track_outstanding(false)
///     .on_pull(|item| assert_eq!(*item, 7))
///     .build();
///
/// assert_eq!(pool.pull(), Ok(7));
/// ```
#[must_use]
pub struct PoolBuilder<T, P = CopyDefault> {
    producer: P,
    default_value: Option<T>,
    track_outstanding: bool,
    on_pull: Option<Hook<T>>,
    on_toss: Option<Hook<T>>,
}

impl<T, P: fmt::Debug> fmt::Debug for PoolBuilder<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("producer", &self.producer)
            .field("has_default", &self.default_value.is_some())
            .field("track_outstanding", &self.track_outstanding)
            .field("on_pull", &self.on_pull.is_some())
            .field("on_toss", &self.on_toss.is_some())
            .finish()
    }
}

impl<T> PoolBuilder<T> {
    pub(crate) fn new() -> Self {
        PoolBuilder {
            producer: CopyDefault,
            default_value: None,
            track_outstanding: true,
            on_pull: None,
            on_toss: None,
        }
    }
}

impl<T, P> PoolBuilder<T, P> {
    /// Sets the value new items are produced from when the pool is empty.
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets whether the pool remembers pulled items so they can be recalled
    /// with [`Pool::toss_all_back`]. Enabled by default.
    pub fn track_outstanding(mut self, track: bool) -> Self {
        self.track_outstanding = track;
        self
    }

    /// Sets a callback run with every item handed out by [`Pool::pull`].
    pub fn on_pull(mut self, hook: impl Fn(&T) + 'static) -> Self {
        self.on_pull = Some(Box::new(hook));
        self
    }

    /// Sets a callback run with every item given back by [`Pool::toss`].
    pub fn on_toss(mut self, hook: impl Fn(&T) + 'static) -> Self {
        self.on_toss = Some(Box::new(hook));
        self
    }

    /// Replaces the production policy used when the pool is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use recycle_pool::{Pool, Produce, Result};
    ///
    /// struct Doubled;
    ///
    /// impl Produce<u32> for Doubled {
    ///     fn produce(&self, default_value: Option<&u32>) -> Result<u32> {
    ///         Ok(default_value.map_or(0, |v| v * 2))
    ///     }
    /// }
    ///
    /// let pool = Pool::<u32>::builder()
    ///     .default_value(21)
    ///     .producer(Doubled)
    ///     .build();
    /// assert_eq!(pool.pull(), Ok(42));
    /// ```
    pub fn producer<Q>(self, producer: Q) -> PoolBuilder<T, Q> {
        PoolBuilder {
            producer,
            default_value: self.default_value,
            track_outstanding: self.track_outstanding,
            on_pull: self.on_pull,
            on_toss: self.on_toss,
        }
    }

    /// Builds the pool with the specified configuration.
    #[must_use]
    pub fn build(self) -> Pool<T, P> {
        Pool::from_parts(
            self.producer,
            self.default_value,
            self.track_outstanding,
            self.on_pull,
            self.on_toss,
        )
    }
}
