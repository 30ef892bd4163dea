//! Capabilities a hosting runtime supplies to the hosted pool variants.
//!
//! The pool never touches runtime specific object state itself. Hosted pools
//! only call through these narrow traits, implemented by whatever owns the
//! objects (a scene graph, an entity store, a widget tree, ...).

use crate::{Error, Produce, Result};
use alloc::rc::Rc;
use core::fmt;

/// Creates a new object from a template.
pub trait Instantiate<T> {
    /// Reference to a container new objects can be placed under.
    type Container;

    /// Creates a new object modelled on `template`, placed under `parent` if
    /// one is given.
    fn instantiate(&self, template: &T, parent: Option<&Self::Container>) -> T;
}

/// Toggles the fine-grained enabled flag of an object, such as a single
/// component on an entity.
pub trait SetEnabled<T> {
    /// Enables or disables `item`.
    fn set_enabled(&self, item: &T, enabled: bool);
}

/// Toggles whether an object as a whole is active.
pub trait SetActive<T> {
    /// Activates or deactivates `item`.
    fn set_active(&self, item: &T, active: bool);
}

/// A production policy that instantiates a fresh object from the pool's
/// default value, used as a template.
///
/// Fails with [`Error::PreconditionViolation`] when no template is set.
pub struct Instantiator<H, C> {
    host: Rc<H>,
    parent: Option<C>,
}

impl<H, C> Instantiator<H, C> {
    /// Creates a producer that instantiates through `host`, placing new
    /// objects under `parent` if given.
    pub fn new(host: Rc<H>, parent: Option<C>) -> Self {
        Instantiator { host, parent }
    }

    /// Returns the container new objects are placed under.
    pub fn parent(&self) -> Option<&C> {
        self.parent.as_ref()
    }
}

impl<T, H, C> Produce<T> for Instantiator<H, C>
where
    H: Instantiate<T, Container = C>,
{
    fn produce(&self, default_value: Option<&T>) -> Result<T> {
        let template = default_value.ok_or_else(Error::template_not_set)?;
        Ok(self.host.instantiate(template, self.parent.as_ref()))
    }
}

impl<H, C: fmt::Debug> fmt::Debug for Instantiator<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instantiator")
            .field("host", &format_args!("{}", core::any::type_name::<H>()))
            .field("parent", &self.parent)
            .finish()
    }
}
