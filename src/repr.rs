//! The module dealing with the underlying representation of the [`Sum`] type.
//!
//! # Implementation details
//!
//! A carrier over the type list `(A, (B, (C, ())))` stores a nested union:
//!
//! ```rust,no_run
//! # use sumpipe::repr::{Cons, Nil};
//! type Union3<A, B, C> = Cons<A, Cons<B, Cons<C, Nil>>>;
//! ```
//!
//! The depth of the `There` chain is the position of the held alternative, so
//! the value and its tag can never disagree. Every list operation below is a
//! structural recursion over this shape, selected at compile time by the
//! position tags of [`crate::tag`].
//!
//! [`Sum`]: crate::Sum

use core::fmt;

use crate::{
    tag::{Tag, UInt, UTerm},
    Rem,
};

/// The terminator of the underlying union. It has no values.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nil {}

/// One level of the underlying union: either the alternative at this
/// position, or one of the alternatives after it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cons<H, T> {
    Here(H),
    There(T),
}

impl fmt::Debug for Nil {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Display for Nil {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl<H: fmt::Debug, T: fmt::Debug> fmt::Debug for Cons<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cons::Here(value) => value.fmt(f),
            Cons::There(next) => next.fmt(f),
        }
    }
}

impl<H: fmt::Display, T: fmt::Display> fmt::Display for Cons<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cons::Here(value) => value.fmt(f),
            Cons::There(next) => next.fmt(f),
        }
    }
}

/// The trait that type lists implement to support its corresponding union
/// representation for the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
pub trait SumList {
    /// The underlying representation of the `Sum` type.
    type Repr;

    /// Number of declared alternatives.
    const ARITY: usize;

    /// Position of the alternative held by `repr`.
    fn index(repr: &Self::Repr) -> usize;

    /// Type name of the alternative held by `repr`.
    fn type_name(repr: &Self::Repr) -> &'static str;
}

impl SumList for () {
    type Repr = Nil;

    const ARITY: usize = 0;

    fn index(repr: &Nil) -> usize {
        match *repr {}
    }

    fn type_name(repr: &Nil) -> &'static str {
        match *repr {}
    }
}

impl<Head, Tail> SumList for (Head, Tail)
where
    Tail: SumList,
{
    type Repr = Cons<Head, Tail::Repr>;

    const ARITY: usize = 1 + Tail::ARITY;

    fn index(repr: &Self::Repr) -> usize {
        match repr {
            Cons::Here(_) => 0,
            Cons::There(next) => 1 + Tail::index(next),
        }
    }

    fn type_name(repr: &Self::Repr) -> &'static str {
        match repr {
            Cons::Here(_) => core::any::type_name::<Head>(),
            Cons::There(next) => Tail::type_name(next),
        }
    }
}

/// The trait that type lists implement to support manipulating the
/// alternative `T` declared at position `U`.
pub trait Split<T, U: Tag>: SumList {
    /// The type list left after removing position `U`.
    type Remainder: SumList;

    #[doc(hidden)]
    fn inject(data: T) -> Self::Repr;

    /// Takes the value out if position `U` is held, otherwise re-tags the
    /// value into the remainder union.
    #[doc(hidden)]
    fn take(repr: Self::Repr) -> Result<T, <Self::Remainder as SumList>::Repr>;

    /// Inverse of a failed [`Split::take`].
    #[doc(hidden)]
    fn restore(rem: <Self::Remainder as SumList>::Repr) -> Self::Repr;

    #[doc(hidden)]
    fn get(repr: &Self::Repr) -> Option<&T>;

    #[doc(hidden)]
    fn get_mut(repr: &mut Self::Repr) -> Option<&mut T>;
}

impl<Head, Tail> Split<Head, UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    type Remainder = Tail;

    fn inject(data: Head) -> Self::Repr {
        Cons::Here(data)
    }

    fn take(repr: Self::Repr) -> Result<Head, Tail::Repr> {
        match repr {
            Cons::Here(data) => Ok(data),
            Cons::There(next) => Err(next),
        }
    }

    fn restore(rem: Tail::Repr) -> Self::Repr {
        Cons::There(rem)
    }

    fn get(repr: &Self::Repr) -> Option<&Head> {
        match repr {
            Cons::Here(data) => Some(data),
            Cons::There(_) => None,
        }
    }

    fn get_mut(repr: &mut Self::Repr) -> Option<&mut Head> {
        match repr {
            Cons::Here(data) => Some(data),
            Cons::There(_) => None,
        }
    }
}

impl<Head, Tail, T, U: Tag> Split<T, UInt<U>> for (Head, Tail)
where
    Tail: Split<T, U>,
{
    type Remainder = (Head, Rem<Tail, T, U>);

    fn inject(data: T) -> Self::Repr {
        Cons::There(Tail::inject(data))
    }

    fn take(repr: Self::Repr) -> Result<T, <Self::Remainder as SumList>::Repr> {
        match repr {
            Cons::Here(head) => Err(Cons::Here(head)),
            Cons::There(next) => Tail::take(next).map_err(Cons::There),
        }
    }

    fn restore(rem: <Self::Remainder as SumList>::Repr) -> Self::Repr {
        match rem {
            Cons::Here(head) => Cons::Here(head),
            Cons::There(next) => Cons::There(Tail::restore(next)),
        }
    }

    fn get(repr: &Self::Repr) -> Option<&T> {
        match repr {
            Cons::Here(_) => None,
            Cons::There(next) => Tail::get(next),
        }
    }

    fn get_mut(repr: &mut Self::Repr) -> Option<&mut T> {
        match repr {
            Cons::Here(_) => None,
            Cons::There(next) => Tail::get_mut(next),
        }
    }
}

/// Replaces the alternative `T` at position `U` with `T2`.
pub trait Substitute<T, T2, U: Tag>: SumList {
    /// The type list with position `U` replaced.
    type Output: SumList;

    #[doc(hidden)]
    fn substitute<F>(repr: Self::Repr, f: F) -> <Self::Output as SumList>::Repr
    where
        F: FnOnce(T) -> T2;
}

impl<Head, Tail, T2> Substitute<Head, T2, UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    type Output = (T2, Tail);

    fn substitute<F>(repr: Self::Repr, f: F) -> Cons<T2, Tail::Repr>
    where
        F: FnOnce(Head) -> T2,
    {
        match repr {
            Cons::Here(data) => Cons::Here(f(data)),
            Cons::There(next) => Cons::There(next),
        }
    }
}

impl<Head, Tail, T, T2, U: Tag> Substitute<T, T2, UInt<U>> for (Head, Tail)
where
    Tail: Substitute<T, T2, U>,
{
    type Output = (Head, Tail::Output);

    fn substitute<F>(repr: Self::Repr, f: F) -> <Self::Output as SumList>::Repr
    where
        F: FnOnce(T) -> T2,
    {
        match repr {
            Cons::Here(head) => Cons::Here(head),
            Cons::There(next) => Cons::There(Tail::substitute(next, f)),
        }
    }
}

/// Appends the list `Rhs` after `Self`.
///
/// Both pipe operators build their result lists with it: the function's
/// outputs go first, followed by whatever alternatives survive.
pub trait Concat<Rhs: SumList>: SumList {
    /// The list `Self ++ Rhs`.
    type Output: SumList;

    /// Re-tags a union of `Self` into `Self ++ Rhs`.
    fn lhs(repr: Self::Repr) -> <Self::Output as SumList>::Repr;

    /// Re-tags a union of `Rhs` into `Self ++ Rhs`.
    fn rhs(repr: Rhs::Repr) -> <Self::Output as SumList>::Repr;
}

impl<Rhs: SumList> Concat<Rhs> for () {
    type Output = Rhs;

    fn lhs(repr: Nil) -> Rhs::Repr {
        match repr {}
    }

    fn rhs(repr: Rhs::Repr) -> Rhs::Repr {
        repr
    }
}

impl<Head, Tail, Rhs> Concat<Rhs> for (Head, Tail)
where
    Tail: Concat<Rhs>,
    Rhs: SumList,
{
    type Output = (Head, Tail::Output);

    fn lhs(repr: Self::Repr) -> <Self::Output as SumList>::Repr {
        match repr {
            Cons::Here(head) => Cons::Here(head),
            Cons::There(next) => Cons::There(Tail::lhs(next)),
        }
    }

    fn rhs(repr: Rhs::Repr) -> <Self::Output as SumList>::Repr {
        Cons::There(Tail::rhs(repr))
    }
}

/// Folds every alternative into a common type `R`.
pub trait Unify<R>: SumList {
    #[doc(hidden)]
    fn unify(repr: Self::Repr) -> R;
}

impl<R> Unify<R> for () {
    fn unify(repr: Nil) -> R {
        match repr {}
    }
}

impl<R, Head, Tail> Unify<R> for (Head, Tail)
where
    Head: Into<R>,
    Tail: Unify<R>,
{
    fn unify(repr: Self::Repr) -> R {
        match repr {
            Cons::Here(head) => head.into(),
            Cons::There(next) => Tail::unify(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::*;

    type L3 = (u8, (char, (&'static str, ())));

    #[test]
    fn take_and_restore() {
        let repr = <L3 as Split<char, U1>>::inject('x');
        assert_eq!(L3::index(&repr), 1);
        assert_eq!(L3::type_name(&repr), "char");

        let rem = <L3 as Split<u8, U0>>::take(repr).unwrap_err();
        assert_eq!(<(char, (&str, ())) as SumList>::index(&rem), 0);

        let repr = <L3 as Split<u8, U0>>::restore(rem);
        assert_eq!(<L3 as Split<char, U1>>::get(&repr), Some(&'x'));
        assert_eq!(<L3 as Split<char, U1>>::take(repr), Ok('x'));
    }

    #[test]
    fn concat_keeps_positions() {
        type Out = <(bool, ()) as Concat<L3>>::Output;
        assert_eq!(<Out as SumList>::ARITY, 4);

        let left = <(bool, ()) as Concat<L3>>::lhs(Cons::Here(true));
        assert_eq!(<Out as SumList>::index(&left), 0);

        let right = <(bool, ()) as Concat<L3>>::rhs(<L3 as Split<&str, U2>>::inject("s"));
        assert_eq!(<Out as SumList>::index(&right), 3);
    }

    #[test]
    fn substitute_only_touches_its_position() {
        let repr = <L3 as Split<u8, U0>>::inject(7);
        let repr = <L3 as Substitute<u8, u32, U0>>::substitute(repr, |n| u32::from(n) * 1000);
        assert_eq!(repr, Cons::Here(7000u32));

        let repr = <L3 as Split<char, U1>>::inject('c');
        let repr = <L3 as Substitute<u8, u32, U0>>::substitute(repr, |_| unreachable!());
        assert!(matches!(repr, Cons::There(Cons::Here('c'))));
    }
}
