//! Shared-ownership aliases switched by the `thread_safe` feature.
//!
//! Without the feature the container is a single-threaded `Rc` handle and producers may
//! capture anything. With it, handles become `Arc` and everything the container stores
//! has to be `Send + Sync`.

use core::any::Any;

#[cfg(feature = "thread_safe")]
pub type RcThreadSafety<T> = alloc::sync::Arc<T>;
#[cfg(not(feature = "thread_safe"))]
pub type RcThreadSafety<T> = alloc::rc::Rc<T>;

#[cfg(feature = "thread_safe")]
pub(crate) type WeakThreadSafety<T> = alloc::sync::Weak<T>;
#[cfg(not(feature = "thread_safe"))]
pub(crate) type WeakThreadSafety<T> = alloc::rc::Weak<T>;

#[cfg(feature = "thread_safe")]
pub(crate) type RcAnyThreadSafety = RcThreadSafety<dyn Any + Send + Sync>;
#[cfg(not(feature = "thread_safe"))]
pub(crate) type RcAnyThreadSafety = RcThreadSafety<dyn Any>;

#[cfg(feature = "thread_safe")]
pub trait SendSafety: Send {}
#[cfg(feature = "thread_safe")]
impl<T: Send + ?Sized> SendSafety for T {}

#[cfg(not(feature = "thread_safe"))]
pub trait SendSafety {}
#[cfg(not(feature = "thread_safe"))]
impl<T: ?Sized> SendSafety for T {}

#[cfg(feature = "thread_safe")]
pub trait SyncSafety: Sync {}
#[cfg(feature = "thread_safe")]
impl<T: Sync + ?Sized> SyncSafety for T {}

#[cfg(not(feature = "thread_safe"))]
pub trait SyncSafety {}
#[cfg(not(feature = "thread_safe"))]
impl<T: ?Sized> SyncSafety for T {}

/// Moves a resolved value behind the type-erased shared pointer stored by providers.
#[inline]
#[must_use]
pub(crate) fn erase<T: SendSafety + SyncSafety + 'static>(value: T) -> RcAnyThreadSafety {
    RcThreadSafety::new(value)
}
