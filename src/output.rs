//! Return shapes understood by the container.
//!
//! A producer's return value is read as an ordered list of [`Slot`]s. The first non-nil value
//! slot is the resolved dependency, the first non-nil error slot is the failure; having both
//! at once or neither is an error of its own.

use core::fmt::{self, Debug, Formatter};

use crate::{any::TypeInfo, errors::ResolveErrorKind};

/// One element of a producer's return value.
pub enum Slot<T> {
    Value(T),
    Error(anyhow::Error),
    Nil,
}

impl<T> Slot<T> {
    #[inline]
    #[must_use]
    pub fn value(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Self::Value)
    }

    #[inline]
    #[must_use]
    pub fn error(failure: Failure) -> Self {
        failure.0.map_or(Self::Nil, Self::Error)
    }
}

impl<T> Debug for Slot<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Value(..)"),
            Self::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Self::Nil => f.write_str("Nil"),
        }
    }
}

/// Nullable error slot for producers and consumers returning tuples.
///
/// ```
/// use dicon::{Container, Failure, Inject};
///
/// struct Config(u16);
///
/// let container = Container::new();
/// container.provide(|| (Failure::none(), Some(Config(8080))));
///
/// let port = container.with(|Inject(config): Inject<Config>| Ok(config.0)).unwrap();
/// assert_eq!(port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct Failure(Option<anyhow::Error>);

impl Failure {
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    #[inline]
    #[must_use]
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self(Some(err.into()))
    }

    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Option<anyhow::Error> {
        self.0
    }
}

impl From<anyhow::Error> for Failure {
    #[inline]
    fn from(err: anyhow::Error) -> Self {
        Self(Some(err))
    }
}

impl From<Option<anyhow::Error>> for Failure {
    #[inline]
    fn from(err: Option<anyhow::Error>) -> Self {
        Self(err)
    }
}

/// Return value of a producer.
///
/// [`Self::Provides`] is the type the producer is registered under: the first element of the
/// return shape that isn't an error slot.
pub trait ProducerOutput {
    type Provides: 'static;
    type Slots: IntoIterator<Item = Slot<Self::Provides>>;

    fn into_slots(self) -> Self::Slots;
}

impl<T: 'static> ProducerOutput for Result<T, anyhow::Error> {
    type Provides = T;
    type Slots = [Slot<T>; 2];

    #[inline]
    fn into_slots(self) -> Self::Slots {
        match self {
            Ok(value) => [Slot::Value(value), Slot::Nil],
            Err(err) => [Slot::Nil, Slot::Error(err)],
        }
    }
}

impl<T: 'static> ProducerOutput for Option<T> {
    type Provides = T;
    type Slots = [Slot<T>; 1];

    #[inline]
    fn into_slots(self) -> Self::Slots {
        [Slot::value(self)]
    }
}

impl<T: 'static> ProducerOutput for (Option<T>, Failure) {
    type Provides = T;
    type Slots = [Slot<T>; 2];

    #[inline]
    fn into_slots(self) -> Self::Slots {
        let (value, failure) = self;
        [Slot::value(value), Slot::error(failure)]
    }
}

impl<T: 'static> ProducerOutput for (Failure, Option<T>) {
    type Provides = T;
    type Slots = [Slot<T>; 2];

    #[inline]
    fn into_slots(self) -> Self::Slots {
        let (failure, value) = self;
        [Slot::error(failure), Slot::value(value)]
    }
}

/// Picks the resolved value out of a producer's slots.
pub(crate) fn select<T>(type_info: TypeInfo, slots: impl IntoIterator<Item = Slot<T>>) -> Result<T, ResolveErrorKind> {
    let mut value = None;
    let mut error = None;

    for slot in slots {
        match slot {
            Slot::Value(val) if value.is_none() => value = Some(val),
            Slot::Error(err) if error.is_none() => error = Some(err),
            _ => {}
        }
    }

    match (value, error) {
        (Some(value), None) => Ok(value),
        (None, Some(err)) => Err(ResolveErrorKind::Producer(err)),
        (Some(_), Some(_)) => Err(ResolveErrorKind::ConflictingReturn { type_info }),
        (None, None) => Err(ResolveErrorKind::EmptyReturn { type_info }),
    }
}

/// Return value of a target passed to [`crate::Container::with`].
pub trait TargetOutput {
    type Output;

    #[allow(clippy::missing_errors_doc)]
    fn into_result(self) -> Result<Self::Output, anyhow::Error>;
}

impl TargetOutput for () {
    type Output = ();

    #[inline]
    fn into_result(self) -> Result<Self::Output, anyhow::Error> {
        Ok(())
    }
}

impl<T> TargetOutput for Result<T, anyhow::Error> {
    type Output = T;

    #[inline]
    fn into_result(self) -> Result<Self::Output, anyhow::Error> {
        self
    }
}

impl TargetOutput for Failure {
    type Output = ();

    #[inline]
    fn into_result(self) -> Result<Self::Output, anyhow::Error> {
        self.0.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;
    use anyhow::anyhow;

    use super::{select, Failure, ProducerOutput, Slot, TargetOutput};
    use crate::{any::TypeInfo, errors::ResolveErrorKind};

    #[derive(Debug, PartialEq)]
    struct Repo(u8);

    fn select_output<O: ProducerOutput>(output: O) -> Result<O::Provides, ResolveErrorKind> {
        select(TypeInfo::of::<O::Provides>(), output.into_slots())
    }

    #[test]
    fn test_value_before_error() {
        let value = select_output((Some(Repo(1)), Failure::none())).unwrap();
        assert_eq!(value, Repo(1));
    }

    #[test]
    fn test_error_before_value() {
        let value = select_output((Failure::none(), Some(Repo(2)))).unwrap();
        assert_eq!(value, Repo(2));
    }

    #[test]
    fn test_result_shapes() {
        assert_eq!(select_output(Ok::<_, anyhow::Error>(Repo(3))).unwrap(), Repo(3));

        let err = select_output(Err::<Repo, _>(anyhow!("FEHLER"))).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::Producer(_)));
        assert_eq!(err.to_string(), "FEHLER");
    }

    #[test]
    fn test_error_is_kept_verbatim() {
        let err = select_output((Failure::new(anyhow!("broken")), None::<Repo>)).unwrap_err();
        let ResolveErrorKind::Producer(err) = err else {
            panic!("expected a producer error");
        };
        assert_eq!(err.to_string(), "broken");
    }

    #[test]
    fn test_empty_return() {
        let err = select_output(None::<Repo>).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::EmptyReturn { type_info } if type_info == TypeInfo::of::<Repo>()));

        let err = select_output((None::<Repo>, Failure::none())).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::EmptyReturn { .. }));
    }

    #[test]
    fn test_conflicting_return() {
        let err = select_output((Some(Repo(4)), Failure::new(anyhow!("broken")))).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::ConflictingReturn { .. }));

        let err = select_output((Failure::new(anyhow!("broken")), Some(Repo(4)))).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::ConflictingReturn { .. }));
    }

    #[test]
    fn test_first_slot_of_a_kind_wins() {
        let slots = [Slot::Nil, Slot::Value(Repo(5)), Slot::Value(Repo(6))];
        assert_eq!(select(TypeInfo::of::<Repo>(), slots).unwrap(), Repo(5));
    }

    #[test]
    fn test_failure_conversions() {
        assert!(Failure::none().into_inner().is_none());
        assert!(Failure::from(None).is_none());

        let failure = Failure::from(anyhow!("broken"));
        assert!(!failure.is_none());
        assert_eq!(failure.into_inner().map(|err| err.to_string()).as_deref(), Some("broken"));
    }

    #[test]
    fn test_target_outputs() {
        ().into_result().unwrap();
        assert_eq!(Ok::<_, anyhow::Error>(7).into_result().unwrap(), 7);
        Failure::none().into_result().unwrap();

        let err = Failure::new(anyhow!("target failed")).into_result().unwrap_err();
        assert_eq!(err.to_string(), "target failed");
    }
}
