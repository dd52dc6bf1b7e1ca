use super::base::Service;

/// Turns a fallible closure into a [`Service`]. Instantiators are built from these.
#[inline]
#[must_use]
pub(crate) const fn service_fn<F>(f: F) -> ServiceFn<F> {
    ServiceFn { f }
}

#[derive(Clone)]
pub(crate) struct ServiceFn<F> {
    f: F,
}

impl<F, Request, Response, Error> Service<Request> for ServiceFn<F>
where
    F: FnMut(Request) -> Result<Response, Error>,
{
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Response, Error> {
        (self.f)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{service_fn, Service as _};
    use crate::{any::TypeInfo, errors::ResolveErrorKind, Container};

    struct Missing;

    #[test]
    fn test_keeps_state_between_calls() {
        let mut calls = 0u8;
        let mut service = service_fn(|container: Container| {
            calls += 1;
            Ok::<_, ResolveErrorKind>(container.contains::<Container>())
        });

        assert!(service.call(Container::new()).unwrap());
        assert!(service.call(Container::new()).unwrap());
        drop(service);

        assert_eq!(calls, 2);
    }

    #[test]
    fn test_error_is_returned() {
        let mut service = service_fn(|container: Container| container.get::<Missing>().map(|_| ()));

        let err = service.call(Container::new()).unwrap_err();

        assert!(matches!(err, ResolveErrorKind::NoProvider { type_info } if type_info == TypeInfo::of::<Missing>()));
    }
}
