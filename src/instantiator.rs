use alloc::boxed::Box;
use tracing::debug;

use super::{
    any::TypeInfo,
    callable::Callable,
    dependency_resolver::DependencyResolver,
    errors::ResolveErrorKind,
    output::{select, ProducerOutput},
    service::{service_fn, BoxCloneService},
    utils::thread_safety::{erase, RcAnyThreadSafety, SendSafety, SyncSafety},
};
use crate::Container;

pub(crate) type BoxedCloneInstantiator = BoxCloneService<Container, RcAnyThreadSafety, ResolveErrorKind>;

/// Erases a producer: resolve its parameters, call it, read its output slots.
#[must_use]
pub(crate) fn boxed_instantiator<P, Deps>(producer: P) -> BoxedCloneInstantiator
where
    P: Callable<Deps> + Clone + SendSafety + SyncSafety + 'static,
    P::Output: ProducerOutput,
    <P::Output as ProducerOutput>::Provides: SendSafety + SyncSafety,
    Deps: DependencyResolver + 'static,
{
    let type_info = TypeInfo::of::<<P::Output as ProducerOutput>::Provides>();

    BoxCloneService(Box::new(service_fn(
        move |container: Container| -> Result<RcAnyThreadSafety, ResolveErrorKind> {
            let output = container.invoke(producer.clone())?;
            let dependency = select(type_info, output.into_slots())?;

            debug!("Resolved");

            Ok(erase(dependency))
        },
    )))
}

/// Binding the container registers for its own type. Hands out handles that don't own the container,
/// so values keeping one don't keep their own container alive.
#[must_use]
pub(crate) fn boxed_container_instantiator() -> BoxedCloneInstantiator {
    BoxCloneService(Box::new(service_fn(|container: Container| {
        Ok::<_, ResolveErrorKind>(erase(container.downgrade()))
    })))
}

/// Wrapper to create a producer that just returns clones of the passed value.
/// It can be used when the value was created outside the container.
#[inline]
#[must_use]
pub fn instance<T>(val: T) -> impl Callable<(), Output = Result<T, anyhow::Error>> + Clone + SendSafety + SyncSafety + 'static
where
    T: Clone + SendSafety + SyncSafety + 'static,
{
    move || Ok::<_, anyhow::Error>(val.clone())
}
