use core::{
    fmt::{self, Debug, Formatter},
    ptr,
};
use parking_lot::Mutex;
use tracing::{debug, debug_span, error, info_span, warn};

use crate::{
    any::TypeInfo,
    callable::Callable,
    config::Config,
    dependency_resolver::DependencyResolver,
    errors::{CallErrorKind, ResolveErrorKind},
    instantiator::{boxed_container_instantiator, boxed_instantiator},
    output::{ProducerOutput, TargetOutput},
    provider::Provider,
    registry::Registry,
    utils::thread_safety::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety, WeakThreadSafety},
};

/// Handle to a dependency container.
///
/// Clones are cheap and refer to the same container, so a clone can be moved into producers
/// or requested as a parameter: every container registers itself on creation.
///
/// Handles created by [`Container::new`] and their clones own the container. A handle received
/// as a parameter doesn't, so a cached value may keep it without keeping the container and its
/// singletons alive. Once every owning handle is dropped, resolving through such a handle fails
/// with [`ResolveErrorKind::ContainerDropped`].
#[derive(Clone)]
pub struct Container {
    handle: Handle,
}

#[derive(Clone)]
enum Handle {
    Owned(RcThreadSafety<ContainerInner>),
    Injected(WeakThreadSafety<ContainerInner>),
}

pub(crate) struct ContainerInner {
    registry: Mutex<Registry>,
}

impl Container {
    /// Creates an empty container that can already resolve itself.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let container = Self {
            handle: Handle::Owned(RcThreadSafety::new(ContainerInner {
                registry: Mutex::new(Registry::new()),
            })),
        };
        container.bootstrap();
        container
    }

    fn bootstrap(&self) {
        // Every request gets its own non-owning handle
        self.register(Provider::new(
            TypeInfo::of::<Container>(),
            boxed_container_instantiator(),
            Config { cache_provides: false },
        ));
    }

    fn inner(&self) -> Option<RcThreadSafety<ContainerInner>> {
        match &self.handle {
            Handle::Owned(inner) => Some(inner.clone()),
            Handle::Injected(inner) => inner.upgrade(),
        }
    }

    /// Handle to the same container that doesn't keep it alive.
    pub(crate) fn downgrade(&self) -> Self {
        let inner = match &self.handle {
            Handle::Owned(inner) => RcThreadSafety::downgrade(inner),
            Handle::Injected(inner) => inner.clone(),
        };
        Self {
            handle: Handle::Injected(inner),
        }
    }

    /// Registers a producer under the type it produces, replacing a previous producer of that type.
    ///
    /// The produced type comes from the producer's return type, see [`ProducerOutput`].
    /// Fallible producers return `Result<T, anyhow::Error>`; other error types have to be converted
    /// with `?` or `map_err(anyhow::Error::from)` inside the producer.
    /// Its parameters are resolved from the container when the type is requested for the first time,
    /// not at registration, so producers can be registered in any order.
    ///
    /// Registering through a handle whose container is already dropped does nothing.
    ///
    /// Anything that isn't a function of resolvable parameters is rejected at compile time:
    /// ```compile_fail
    /// struct Repo;
    ///
    /// dicon::Container::new().provide(Repo);
    /// ```
    pub fn provide<P, Deps>(&self, producer: P) -> &Self
    where
        P: Callable<Deps> + Clone + SendSafety + SyncSafety + 'static,
        P::Output: ProducerOutput,
        <P::Output as ProducerOutput>::Provides: SendSafety + SyncSafety,
        Deps: DependencyResolver + 'static,
    {
        let type_info = TypeInfo::of::<<P::Output as ProducerOutput>::Provides>();
        self.register(Provider::new(type_info, boxed_instantiator(producer), Config::default()));
        self
    }

    fn register(&self, provider: Provider) {
        let type_info = provider.type_info;
        let Some(inner) = self.inner() else {
            warn!(dependency = type_info.name, "Container is already dropped, provider ignored");
            return;
        };
        let replaced = inner.registry.lock().insert(provider);
        if replaced.is_some() {
            warn!(dependency = type_info.name, "Provider replaced");
        } else {
            debug!(dependency = type_info.name, "Provider registered");
        }
    }

    /// Resolves every parameter of `target` and calls it.
    ///
    /// The target returns `()`, a [`crate::Failure`] or `Result<T, anyhow::Error>`. A plain value
    /// has to be wrapped in `Ok`.
    ///
    /// # Errors
    /// - Returns [`CallErrorKind::Resolve`] if a parameter can't be resolved. The target isn't called then.
    /// - Returns [`CallErrorKind::Target`] with the target's own error if it returned one.
    pub fn with<F, Deps>(&self, target: F) -> Result<<F::Output as TargetOutput>::Output, CallErrorKind>
    where
        F: Callable<Deps>,
        F::Output: TargetOutput,
        Deps: DependencyResolver,
    {
        let span = debug_span!("with");
        let _guard = span.enter();

        let output = self.invoke(target)?;
        output.into_result().map_err(|err| {
            debug!(%err, "Target returned an error");
            CallErrorKind::Target(err)
        })
    }

    /// Resolves every parameter of `callable` in declaration order and calls it,
    /// returning its output as is.
    ///
    /// # Errors
    /// Returns the first resolution error, unchanged. Later parameters aren't resolved then.
    pub fn invoke<F, Deps>(&self, callable: F) -> Result<F::Output, ResolveErrorKind>
    where
        F: Callable<Deps>,
        Deps: DependencyResolver,
    {
        let dependencies = Deps::resolve(self).map_err(Into::into)?;
        Ok(callable.call(dependencies))
    }

    /// Gets the singleton registered for `Dep`, running its producer on first use.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::NoProvider`] if nothing produces `Dep`.
    /// - Returns [`ResolveErrorKind::CyclicDependency`] if `Dep` is requested while it's being resolved.
    /// - Returns [`ResolveErrorKind::EmptyReturn`] and [`ResolveErrorKind::ConflictingReturn`]
    ///   if the producer's output can't be read.
    /// - Returns [`ResolveErrorKind::Producer`] with the producer's own error.
    /// - Returns [`ResolveErrorKind::ContainerDropped`] if the handle outlived its container.
    pub fn get<Dep: SendSafety + SyncSafety + 'static>(&self) -> Result<RcThreadSafety<Dep>, ResolveErrorKind> {
        let type_info = TypeInfo::of::<Dep>();
        let span = info_span!("get", dependency = type_info.short_name());
        let _guard = span.enter();

        let dependency = self.resolve(&type_info)?;
        match dependency.downcast::<Dep>() {
            Ok(dependency) => Ok(dependency),
            Err(incorrect_type) => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: type_info,
                    actual: (*incorrect_type).type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    fn resolve(&self, type_info: &TypeInfo) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let Some(inner) = self.inner() else {
            let err = ResolveErrorKind::ContainerDropped;
            error!("{}", err);
            return Err(err);
        };
        let Some(provider) = inner.registry.lock().get(type_info) else {
            let err = ResolveErrorKind::NoProvider { type_info: *type_info };
            warn!("{}", err);
            return Err(err);
        };
        provider.get(self)
    }

    /// Whether a producer is registered for `Dep`.
    #[must_use]
    pub fn contains<Dep: 'static>(&self) -> bool {
        let Some(inner) = self.inner() else {
            return false;
        };
        let registry = inner.registry.lock();
        registry.contains(&TypeInfo::of::<Dep>())
    }

    /// Whether the producer for `Dep` has already run successfully and its value is cached.
    #[must_use]
    pub fn is_resolved<Dep: 'static>(&self) -> bool {
        let Some(inner) = self.inner() else {
            return false;
        };
        let provider = inner.registry.lock().get(&TypeInfo::of::<Dep>());
        provider.is_some_and(|provider| provider.is_resolved())
    }

    /// Whether both handles refer to the same container.
    #[inline]
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        ptr::eq(this.as_ptr(), other.as_ptr())
    }

    fn as_ptr(&self) -> *const ContainerInner {
        match &self.handle {
            Handle::Owned(inner) => RcThreadSafety::as_ptr(inner),
            Handle::Injected(inner) => inner.as_ptr(),
        }
    }
}

impl Default for Container {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Container");
        if let Some(inner) = self.inner() {
            debug.field("providers", &inner.registry.lock().len());
        }
        debug.finish_non_exhaustive()
    }
}
