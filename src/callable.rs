use crate::dependency_resolver::DependencyResolver;

/// A function whose parameters are all resolvable by the container.
///
/// Implemented for every `FnOnce(D1, .., Dn) -> R` with up to 12 parameters where each
/// parameter is a [`DependencyResolver`]. Producers and targets share this protocol, only the
/// way their output is read differs.
pub trait Callable<Deps>: Sized
where
    Deps: DependencyResolver,
{
    type Output;

    fn call(self, dependencies: Deps) -> Self::Output;
}

macro_rules! impl_callable {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, R, $($ty,)*> Callable<($($ty,)*)> for F
        where
            F: FnOnce($($ty,)*) -> R,
            $( $ty: DependencyResolver, )*
        {
            type Output = R;

            #[inline]
            fn call(self, ($($ty,)*): ($($ty,)*)) -> Self::Output {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_callable);
