mod call;
mod dependency_resolver;

pub use call::CallErrorKind;
pub use dependency_resolver::ResolveErrorKind;
