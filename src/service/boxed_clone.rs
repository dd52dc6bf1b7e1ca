use alloc::boxed::Box;

use super::base::Service;
use crate::utils::thread_safety::{SendSafety, SyncSafety};

/// Type-erased service that can be cloned out of a shared registry entry and called
/// without holding any lock.
pub(crate) struct BoxCloneService<Request, Response, Error>(pub(crate) Box<dyn CloneService<Request, Response = Response, Error = Error>>);

pub(crate) trait CloneService<Request>: Service<Request> + SendSafety + SyncSafety {
    #[must_use]
    fn clone_box(&self) -> Box<dyn CloneService<Request, Response = Self::Response, Error = Self::Error>>;
}

impl<Request, T> CloneService<Request> for T
where
    T: Service<Request> + Clone + SendSafety + SyncSafety + 'static,
{
    #[inline]
    fn clone_box(&self) -> Box<dyn CloneService<Request, Response = T::Response, Error = T::Error>> {
        Box::new(self.clone())
    }
}

impl<Request, Response, Error> Clone for BoxCloneService<Request, Response, Error> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl<Request, Response, Error> Service<Request> for BoxCloneService<Request, Response, Error> {
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
        self.0.call(request)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use core::convert::Infallible;

    use super::{BoxCloneService, Service as _};
    use crate::service::service_fn;

    #[test]
    fn test_clone_keeps_captured_state_apart() {
        let mut counter = 0u8;
        let mut original: BoxCloneService<u8, u8, Infallible> = BoxCloneService(Box::new(service_fn(move |step: u8| {
            counter += step;
            Ok::<_, Infallible>(counter)
        })));

        assert_eq!(original.call(2).unwrap(), 2);

        let mut cloned = original.clone();
        assert_eq!(cloned.call(1).unwrap(), 3);
        assert_eq!(original.call(1).unwrap(), 3);
    }
}
