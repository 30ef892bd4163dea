use alloc::boxed::Box;

/// A side-effect callback run with an item on every pull or toss.
pub type Hook<T> = Box<dyn Fn(&T)>;

/// Runs `built_in` first, then `extra` if one was supplied.
pub(crate) fn chain<T: 'static>(built_in: Hook<T>, extra: Option<Hook<T>>) -> Hook<T> {
    match extra {
        Some(extra) => Box::new(move |item: &T| {
            built_in(item);
            extra(item);
        }),
        None => built_in,
    }
}
