use super::dependency_resolver::ResolveErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum CallErrorKind {
    /// A parameter of the target couldn't be resolved, the target wasn't called.
    #[error(transparent)]
    Resolve(#[from] ResolveErrorKind),
    /// The target itself returned an error.
    #[error(transparent)]
    Target(anyhow::Error),
}
