use core::ops::Deref;

use crate::{
    dependency_resolver::DependencyResolver,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
    Container, ResolveErrorKind,
};

/// Shared handle to the singleton registered for `Dep`.
pub struct Inject<Dep>(pub RcThreadSafety<Dep>);

impl<Dep: SendSafety + SyncSafety + 'static> DependencyResolver for Inject<Dep> {
    type Error = ResolveErrorKind;

    fn resolve(container: &Container) -> Result<Self, Self::Error> {
        container.get().map(Self)
    }
}

impl<Dep> Deref for Inject<Dep> {
    type Target = Dep;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<Dep> Clone for Inject<Dep> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// A container parameter receives a handle to the container doing the resolution.
impl DependencyResolver for Container {
    type Error = ResolveErrorKind;

    fn resolve(container: &Container) -> Result<Self, Self::Error> {
        container.get::<Container>().map(|container| Container::clone(&container))
    }
}
