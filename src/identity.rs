use alloc::{rc::Rc, string::String, sync::Arc, vec::Vec};

/// Decides whether two values refer to the same pooled instance.
///
/// The outstanding set of a [`Pool`](crate::Pool) uses this to find the entry
/// a tossed item belongs to. Shared handles compare by address, so two `Rc`s
/// holding equal values are still different instances. Plain values compare
/// with `==`: two equal values cannot be told apart, so either entry may be
/// the one removed.
pub trait Identity {
    /// Returns `true` if `self` and `other` are the same instance.
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline(always)]
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline(always)]
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for &T {
    #[inline(always)]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

impl<T: PartialEq> Identity for Vec<T> {
    #[inline(always)]
    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline(always)]
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool, String,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_compares_by_address() {
        let a = Rc::new(0);
        let b = Rc::new(0);

        assert!(a.is_same(&Rc::clone(&a)));
        assert!(!a.is_same(&b));
    }

    #[test]
    fn values_compare_by_equality() {
        assert!(7u32.is_same(&7));
        assert!(!'a'.is_same(&'b'));
        assert!(String::from("x").is_same(&String::from("x")));
    }
}
