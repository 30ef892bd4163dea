use crate::Result;

/// A trait defining how a pool produces a new item when it has none
/// available.
///
/// The pool hands the producer its current default value, if one has been
/// set. What the producer does with it is up to the implementation: the base
/// [`CopyDefault`] policy hands out a copy of it, while template based
/// producers use it as a model for a brand-new instance.
pub trait Produce<T> {
    /// Creates one item of type `T`.
    ///
    /// Producers that cannot work without a template should fail with
    /// [`Error::PreconditionViolation`](crate::Error::PreconditionViolation)
    /// when `default_value` is `None`.
    fn produce(&self, default_value: Option<&T>) -> Result<T>;
}

/// The base production policy: returns a copy of the pool's default value.
///
/// When no default value is set the type's [`Default`] is returned instead,
/// silently. Pools that must never hand out such an empty value should use a
/// producer that checks for the template, such as
/// [`Instantiator`](crate::Instantiator).
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyDefault;

impl<T: Clone + Default> Produce<T> for CopyDefault {
    #[inline(always)]
    fn produce(&self, default_value: Option<&T>) -> Result<T> {
        Ok(default_value.cloned().unwrap_or_default())
    }
}
