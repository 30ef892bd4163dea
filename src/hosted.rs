use crate::{hook, Hook, Instantiate, Instantiator, Pool, SetActive, SetEnabled};
use alloc::{boxed::Box, rc::Rc};
use core::{any::type_name, fmt, marker::PhantomData};

/// A pool whose new items are instantiated by a host runtime from a template.
///
/// Built by [`ManagedHandlePoolBuilder`] or [`ActivationPoolBuilder`]; both
/// produce the same pool type and differ only in the hooks they install.
pub type HostedPool<T, H> = Pool<T, Instantiator<H, <H as Instantiate<T>>::Container>>;

/// The host side effect a hosted pool applies on pull (`true`) and toss
/// (`false`).
pub trait StateToggle<T, H> {
    /// Short name of the pool variant, used in diagnostics.
    const VARIANT: &'static str;

    /// Switches `item` on or off through `host`.
    fn apply(host: &H, item: &T, on: bool);
}

/// Toggles the enabled flag of pooled items, see [`SetEnabled`].
#[derive(Debug, Clone, Copy)]
pub struct Enabled;

impl<T, H: SetEnabled<T>> StateToggle<T, H> for Enabled {
    const VARIANT: &'static str = "managed_handle";

    #[inline(always)]
    fn apply(host: &H, item: &T, on: bool) {
        host.set_enabled(item, on);
    }
}

/// Toggles whether pooled items are active, see [`SetActive`].
#[derive(Debug, Clone, Copy)]
pub struct Active;

impl<T, H: SetActive<T>> StateToggle<T, H> for Active {
    const VARIANT: &'static str = "activation";

    #[inline(always)]
    fn apply(host: &H, item: &T, on: bool) {
        host.set_active(item, on);
    }
}

/// Builder for a pool of host managed handles that are enabled when pulled
/// and disabled when tossed.
pub type ManagedHandlePoolBuilder<T, H> = HostedPoolBuilder<T, H, Enabled>;

/// Builder for a pool of host objects that are activated when pulled and
/// deactivated when tossed.
pub type ActivationPoolBuilder<T, H> = HostedPoolBuilder<T, H, Active>;

/// Builder for a [`HostedPool`].
///
/// New items are created by the host from the template set with
/// [`Self::default_value`]. On every pull the item is switched on through the
/// host, on every toss it is switched off; callbacks given with
/// [`Self::on_pull`] and [`Self::on_toss`] run after that.
///
/// Building without a template is allowed but logs a warning: the pool can
/// recycle items tossed into it, but pulling from it while empty fails until
/// a template is set with [`Pool::set_default`].
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use recycle_pool::{Instantiate, ManagedHandlePoolBuilder, SetEnabled};
///
/// #[derive(Default)]
/// struct Scene {
///     enabled: RefCell<Vec<bool>>,
/// }
///
/// impl Instantiate<usize> for Scene {
///     type Container = ();
///
///     fn instantiate(&self, _template: &usize, _parent: Option<&()>) -> usize {
///         let mut enabled = self.enabled.borrow_mut();
///         enabled.push(false);
///         enabled.len() - 1
///     }
/// }
///
/// impl SetEnabled<usize> for Scene {
///     fn set_enabled(&self, item: &usize, enabled: bool) {
///         self.enabled.borrow_mut()[*item] = enabled;
///     }
/// }
///
/// let scene = Rc::new(Scene::default());
/// let pool = ManagedHandlePoolBuilder::new(Rc::clone(&scene))
///     .default_value(0usize)
///     .build();
///
/// let handle = pool.pull().unwrap();
/// assert!(scene.enabled.borrow()[handle]);
/// pool.toss(handle);
/// assert!(!scene.enabled.borrow()[handle]);
/// ```
#[must_use]
pub struct HostedPoolBuilder<T, H: Instantiate<T>, K> {
    host: Rc<H>,
    parent: Option<H::Container>,
    default_value: Option<T>,
    toggle_state: bool,
    track_outstanding: bool,
    on_pull: Option<Hook<T>>,
    on_toss: Option<Hook<T>>,
    _toggle: PhantomData<K>,
}

impl<T, H, K> fmt::Debug for HostedPoolBuilder<T, H, K>
where
    H: Instantiate<T>,
    H::Container: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedPoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("toggle", &format_args!("{}", type_name::<K>()))
            .field("parent", &self.parent)
            .field("has_default", &self.default_value.is_some())
            .field("toggle_state", &self.toggle_state)
            .field("track_outstanding", &self.track_outstanding)
            .finish()
    }
}

impl<T, H: Instantiate<T>, K> HostedPoolBuilder<T, H, K> {
    /// Creates a builder whose pool instantiates and toggles items through
    /// `host`.
    pub fn new(host: Rc<H>) -> Self {
        HostedPoolBuilder {
            host,
            parent: None,
            default_value: None,
            toggle_state: true,
            track_outstanding: true,
            on_pull: None,
            on_toss: None,
            _toggle: PhantomData,
        }
    }

    /// Sets the template new items are instantiated from.
    pub fn default_value(mut self, template: T) -> Self {
        self.default_value = Some(template);
        self
    }

    /// Sets the container new items are placed under.
    pub fn parent(mut self, parent: H::Container) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets whether items are switched on when pulled and off when tossed.
    /// Enabled by default.
    pub fn toggle_state(mut self, toggle: bool) -> Self {
        self.toggle_state = toggle;
        self
    }

    /// Sets whether the pool remembers pulled items so they can be recalled
    /// with [`Pool::toss_all_back`]. Enabled by default.
    pub fn track_outstanding(mut self, track: bool) -> Self {
        self.track_outstanding = track;
        self
    }

    /// Sets a callback run with every pulled item, after it was switched on.
    pub fn on_pull(mut self, hook: impl Fn(&T) + 'static) -> Self {
        self.on_pull = Some(Box::new(hook));
        self
    }

    /// Sets a callback run with every tossed item, after it was switched off.
    pub fn on_toss(mut self, hook: impl Fn(&T) + 'static) -> Self {
        self.on_toss = Some(Box::new(hook));
        self
    }
}

impl<T, H, K> HostedPoolBuilder<T, H, K>
where
    T: 'static,
    H: Instantiate<T> + 'static,
    K: StateToggle<T, H> + 'static,
{
    /// Builds the pool with the specified configuration.
    #[must_use]
    pub fn build(self) -> HostedPool<T, H> {
        #[cfg(feature = "tracing")]
        if self.default_value.is_none() {
            tracing::warn!(
                variant = K::VARIANT,
                item_type = type_name::<T>(),
                "pool built without a template, pulling from it while empty fails until one is set"
            );
        }

        let (on_pull, on_toss) = if self.toggle_state {
            (
                Some(hook::chain(switch::<T, H, K>(&self.host, true), self.on_pull)),
                Some(hook::chain(switch::<T, H, K>(&self.host, false), self.on_toss)),
            )
        } else {
            (self.on_pull, self.on_toss)
        };

        Pool::from_parts(
            Instantiator::new(self.host, self.parent),
            self.default_value,
            self.track_outstanding,
            on_pull,
            on_toss,
        )
    }
}

fn switch<T, H, K>(host: &Rc<H>, on: bool) -> Hook<T>
where
    T: 'static,
    H: 'static,
    K: StateToggle<T, H> + 'static,
{
    let host = Rc::clone(host);
    Box::new(move |item: &T| K::apply(&host, item, on))
}
