/// Config for a provider
/// ## Fields
/// - `cache_provides`:
///   If `true`, the first successfully produced value is kept and handed out to every later
///   resolution. Every user registration caches; only the container's own binding doesn't,
///   so the registry never keeps its container alive.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Config {
    pub(crate) cache_provides: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { cache_provides: true }
    }
}
