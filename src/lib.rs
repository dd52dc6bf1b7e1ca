//! A minimal dependency injection container.
//!
//! Producers are registered under the type they produce and run lazily, at most once, the first time
//! that type is requested. Targets passed to [`Container::with`] get their parameters resolved the
//! same way, recursively, with dependency cycles reported as errors.
//!
//! ```
//! use dicon::{Container, Inject};
//!
//! struct Database;
//! struct UserRepo(dicon::utils::thread_safety::RcThreadSafety<Database>);
//!
//! let container = Container::new();
//! container
//!     .provide(|Inject(db): Inject<Database>| Ok(UserRepo(db)))
//!     .provide(|| Ok(Database));
//!
//! container
//!     .with(|Inject(repo): Inject<UserRepo>, container: Container| {
//!         assert!(container.is_resolved::<Database>());
//!         let _db = &repo.0;
//!     })
//!     .unwrap();
//! ```

#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod callable;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod inject;
pub(crate) mod instantiator;
pub(crate) mod output;
pub(crate) mod provider;
pub(crate) mod registry;
pub(crate) mod service;

pub mod utils;

pub use any::TypeInfo;
pub use callable::Callable;
pub use container::Container;
pub use dependency_resolver::DependencyResolver;
pub use errors::{CallErrorKind, ResolveErrorKind};
pub use inject::Inject;
pub use instantiator::instance;
pub use output::{Failure, ProducerOutput, Slot, TargetOutput};
