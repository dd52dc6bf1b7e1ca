use parking_lot::Mutex;
use tracing::{debug, error};

use crate::{
    any::TypeInfo, config::Config, errors::ResolveErrorKind, instantiator::BoxedCloneInstantiator, service::Service as _,
    utils::thread_safety::RcAnyThreadSafety, Container,
};

pub(crate) enum ProviderState {
    Unresolved,
    /// The instantiator is running somewhere up the current call stack.
    Resolving,
    Resolved(RcAnyThreadSafety),
}

/// One registered producer together with its resolution state.
pub(crate) struct Provider {
    pub(crate) type_info: TypeInfo,
    instantiator: BoxedCloneInstantiator,
    config: Config,
    state: Mutex<ProviderState>,
}

impl Provider {
    #[inline]
    #[must_use]
    pub(crate) fn new(type_info: TypeInfo, instantiator: BoxedCloneInstantiator, config: Config) -> Self {
        Self {
            type_info,
            instantiator,
            config,
            state: Mutex::new(ProviderState::Unresolved),
        }
    }

    /// Returns the cached value or runs the instantiator.
    ///
    /// The state lock is released while the instantiator runs, so a request for the same type
    /// coming back through the container sees [`ProviderState::Resolving`] and fails with
    /// [`ResolveErrorKind::CyclicDependency`] instead of deadlocking or recursing forever.
    /// Any failure, a panicking producer included, puts the provider back to
    /// [`ProviderState::Unresolved`], so a later resolution runs the producer again.
    pub(crate) fn get(&self, container: &Container) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        {
            let mut state = self.state.lock();
            if let ProviderState::Resolved(dependency) = &*state {
                debug!("Found in cache");
                return Ok(dependency.clone());
            }
            if let ProviderState::Resolving = *state {
                let err = ResolveErrorKind::CyclicDependency { type_info: self.type_info };
                error!("{}", err);
                return Err(err);
            }
            *state = ProviderState::Resolving;
        }
        debug!("Not found in cache");

        let _resolving = ResolvingGuard { state: &self.state };
        match self.instantiator.clone().call(container.clone()) {
            Ok(dependency) => {
                if self.config.cache_provides {
                    *self.state.lock() = ProviderState::Resolved(dependency.clone());
                    debug!("Cached");
                }
                Ok(dependency)
            }
            Err(err) => {
                error!("{}", err);
                Err(err)
            }
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn is_resolved(&self) -> bool {
        matches!(*self.state.lock(), ProviderState::Resolved(_))
    }
}

/// Puts a provider left in [`ProviderState::Resolving`] back to [`ProviderState::Unresolved`]
/// once its instantiator returned or unwound.
struct ResolvingGuard<'a> {
    state: &'a Mutex<ProviderState>,
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if let ProviderState::Resolving = *state {
            *state = ProviderState::Unresolved;
        }
    }
}
