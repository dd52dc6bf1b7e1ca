use alloc::collections::BTreeMap;

use crate::{any::TypeInfo, provider::Provider, utils::thread_safety::RcThreadSafety};

/// Providers keyed by the type they produce. At most one provider per type.
#[derive(Default)]
pub(crate) struct Registry {
    providers: BTreeMap<TypeInfo, RcThreadSafety<Provider>>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { providers: BTreeMap::new() }
    }

    /// Returns the replaced provider, if any.
    #[inline]
    pub(crate) fn insert(&mut self, provider: Provider) -> Option<RcThreadSafety<Provider>> {
        self.providers.insert(provider.type_info, RcThreadSafety::new(provider))
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, type_info: &TypeInfo) -> Option<RcThreadSafety<Provider>> {
        self.providers.get(type_info).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, type_info: &TypeInfo) -> bool {
        self.providers.contains_key(type_info)
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.providers.len()
    }
}
