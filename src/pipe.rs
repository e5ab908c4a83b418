//! The two pipe operators.
//!
//! * [`Sum::pipe`] (also `sum | f`) consumes the first declared alternative:
//!   the result lists `f`'s outputs followed by the untouched alternatives.
//! * [`Sum::pipe_any`] looks for the function's input anywhere in the list and
//!   keeps every original alternative: the result lists `f`'s outputs followed
//!   by the whole original list.
//!
//! Both are total. A value that the function does not accept is re-tagged into
//! the result list unchanged.

use core::{marker::PhantomData, ops::BitOr};

use tracing::trace;

use crate::{
    func::Reified,
    range::SplitList,
    repr::{Concat, Cons, Split, SumList},
    tag::Tag,
    Sum,
};

/// The result list of piping `F` into a carrier whose remaining alternatives
/// are `Rest`.
pub type Piped<F, Rest> = <<F as Reified>::Outputs as Concat<Rest>>::Output;

/// Coverage marker: the input is the alternative at position `U`.
pub struct Exact<U>(PhantomData<U>);

/// Coverage marker: the input is a [`Sum`] over a sub-list of the
/// alternatives, mapped by `UMap`.
pub struct Within<UMap>(PhantomData<UMap>);

/// Type lists in which some alternatives can be handed to a function taking
/// `A`. The marker `M` is inferred.
pub trait Covers<A, M>: SumList {
    /// Converts the held value into `A`, or gives the union back untouched.
    #[doc(hidden)]
    fn extract(repr: Self::Repr) -> Result<A, Self::Repr>;
}

impl<S, A, U: Tag> Covers<A, Exact<U>> for S
where
    S: Split<A, U>,
{
    fn extract(repr: S::Repr) -> Result<A, S::Repr> {
        <S as Split<A, U>>::take(repr).map_err(<S as Split<A, U>>::restore)
    }
}

impl<S, S2, UMap> Covers<Sum<S2>, Within<UMap>> for S
where
    S: SplitList<S2, UMap>,
    S2: SumList,
{
    fn extract(repr: S::Repr) -> Result<Sum<S2>, S::Repr> {
        <S as SplitList<S2, UMap>>::narrow(repr)
            .map(Sum::from_union)
            .map_err(<S as SplitList<S2, UMap>>::restore)
    }
}

impl<Head, Tail: SumList> Sum<(Head, Tail)> {
    /// Positional pipe: applies `f` if the first declared alternative is held.
    ///
    /// The first alternative is replaced by `f`'s outputs in the result list.
    /// A function over any other alternative is rejected at compile time;
    /// reorder the list or use [`Sum::pipe_any`] for those.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sumpipe::{lift, reify, reify2, Sum};
    ///
    /// let non_zero = reify2(|n: u32| if n == 0 { Err("zero") } else { Ok(n) });
    /// let invert = reify(|n: u32| 1.0 / f64::from(n));
    ///
    /// let r: Sum![f64, &str] = lift(4u32).pipe(&non_zero).pipe(&invert);
    /// assert_eq!(r.get::<f64, _>(), Some(&0.25));
    ///
    /// let r: Sum![f64, &str] = lift(0u32).pipe(&non_zero).pipe(&invert);
    /// assert_eq!(r.get::<&str, _>(), Some(&"zero"));
    /// ```
    ///
    /// A step over any alternative but the first does not compile:
    ///
    /// ```compile_fail
    /// use sumpipe::{reify, Sum};
    ///
    /// let s: Sum![u8, char] = Sum::new('c');
    /// let _ = s.pipe(reify(|c: char| c.is_alphabetic()));
    /// ```
    pub fn pipe<F>(self, f: F) -> Sum<Piped<F, Tail>>
    where
        F: Reified<Input = Head>,
        F::Outputs: Concat<Tail>,
    {
        let repr = match self.repr {
            Cons::Here(input) => {
                trace!(input = core::any::type_name::<Head>(), "positional pipe applied");
                <F::Outputs as Concat<Tail>>::lhs(f.call(input).lower())
            }
            Cons::There(rest) => {
                trace!(
                    input = core::any::type_name::<Head>(),
                    held = Tail::type_name(&rest),
                    "positional pipe passed through"
                );
                <F::Outputs as Concat<Tail>>::rhs(rest)
            }
        };
        Sum::from_union(repr)
    }
}

impl<Head, Tail, F> BitOr<F> for Sum<(Head, Tail)>
where
    Tail: SumList,
    F: Reified<Input = Head>,
    F::Outputs: Concat<Tail>,
{
    type Output = Sum<Piped<F, Tail>>;

    fn bitor(self, f: F) -> Self::Output {
        self.pipe(f)
    }
}

impl<S: SumList> Sum<S> {
    /// Any-position pipe: applies `f` to whichever alternative it accepts.
    ///
    /// `f`'s input is either one declared alternative, or a [`Sum`] over
    /// several of them. The result list is `f`'s outputs followed by the full
    /// original list: the matched alternative stays declared, so the result
    /// never has fewer alternatives than `self`.
    ///
    /// When the input type is declared more than once, the marker `M` names a
    /// single slot, and a value held in another slot of the same type passes
    /// through. [`crate::DynSum::pipe_any`] takes the first matching slot
    /// instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sumpipe::{reify, Sum};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Timeout;
    ///
    /// let retry = reify(|_: Timeout| 3u8);
    /// let r: Sum![String, Timeout] = Sum::new(Timeout);
    /// let r: Sum![u8, String, Timeout] = r.pipe_any(&retry);
    /// assert_eq!(r.get::<u8, _>(), Some(&3));
    /// ```
    ///
    /// A step whose input no alternative covers does not compile:
    ///
    /// ```compile_fail
    /// use sumpipe::{reify, Sum};
    ///
    /// let s: Sum![u8, char] = Sum::new(1u8);
    /// let _ = s.pipe_any(reify(|b: bool| !b));
    /// ```
    pub fn pipe_any<F, M>(self, f: F) -> Sum<Piped<F, S>>
    where
        F: Reified,
        F::Outputs: Concat<S>,
        S: Covers<F::Input, M>,
    {
        let held = S::type_name(&self.repr);
        let repr = match S::extract(self.repr) {
            Ok(input) => {
                trace!(input = core::any::type_name::<F::Input>(), held, "any-position pipe applied");
                <F::Outputs as Concat<S>>::lhs(f.call(input).lower())
            }
            Err(repr) => {
                trace!(
                    input = core::any::type_name::<F::Input>(),
                    held,
                    "any-position pipe passed through"
                );
                <F::Outputs as Concat<S>>::rhs(repr)
            }
        };
        Sum::from_union(repr)
    }
}
