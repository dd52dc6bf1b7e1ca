use core::any::TypeId;

use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Provider not found for type {type_info}")]
    NoProvider { type_info: TypeInfo },
    #[error("Provider for type {type_info} is already resolving: cyclic dependency detected")]
    CyclicDependency { type_info: TypeInfo },
    #[error("Unable to identify correct return value for type {type_info}")]
    EmptyReturn { type_info: TypeInfo },
    #[error("Producer for type {type_info} returned both a value and an error")]
    ConflictingReturn { type_info: TypeInfo },
    #[error("Incorrect provider provides type. Actual: {actual:?}, expected: {expected}")]
    IncorrectType { expected: TypeInfo, actual: TypeId },
    #[error("Container is already dropped")]
    ContainerDropped,
    #[error(transparent)]
    Producer(anyhow::Error),
}

impl ResolveErrorKind {
    /// Type the failing resolution was about, if the error is raised by the container itself.
    #[must_use]
    pub const fn type_info(&self) -> Option<&TypeInfo> {
        match self {
            Self::NoProvider { type_info }
            | Self::CyclicDependency { type_info }
            | Self::EmptyReturn { type_info }
            | Self::ConflictingReturn { type_info } => Some(type_info),
            Self::IncorrectType { expected, .. } => Some(expected),
            Self::ContainerDropped | Self::Producer(_) => None,
        }
    }
}
