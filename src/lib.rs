#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![deny(rust_2024_compatibility)]
#![allow(edition_2024_expr_fragment_specifier)]

extern crate alloc;
#[cfg(test)]
extern crate std;

use alloc::vec::Vec;
use core::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

#[macro_use]
mod macros;
pub mod dynamic;
pub mod error;
pub mod func;
pub mod pipe;
pub mod range;
pub mod repr;
pub mod tag;
pub mod witness;

pub use self::{
    dynamic::{DynFn, DynSum},
    error::PipeError,
    func::{reify, reify2, Reified, Reified1, Reified2},
    pipe::Piped,
    witness::{Witness, Witnessed, Witnesses},
};
use self::{
    repr::Cons,
    tag::{Tag, U0, U1},
};

/// The union type behind a carrier over `S`; what [`Sum::lower`] returns.
pub type Repr<S> = <S as repr::SumList>::Repr;

/// A carrier holding exactly one value of one of the alternatives listed in
/// `S`.
///
/// Usually named through the [`Sum!`] macro: `Sum![A, B, C]` is
/// `Sum<(A, (B, (C, ())))>`. Carriers are values; every operation consumes its
/// receiver and returns a new carrier.
pub struct Sum<S: repr::SumList> {
    repr: Repr<S>,
}

/// Lifts a bare value into a carrier with one alternative.
pub fn lift<T>(value: T) -> Sum![T] {
    Sum::new::<T, U0>(value)
}

impl<T> From<T> for Sum![T] {
    /// Construct a `Sum` of one type from a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sumpipe::Sum;
    ///
    /// let s: Sum![i32] = 42.into();
    /// assert_eq!(*s, 42);
    /// ```
    fn from(value: T) -> Self {
        lift(value)
    }
}

impl<B, C> From<Result<B, C>> for Sum![B, C] {
    fn from(value: Result<B, C>) -> Self {
        match value {
            Ok(b) => Sum::new::<B, U0>(b),
            Err(c) => Sum::new::<C, U1>(c),
        }
    }
}

impl<T> Deref for Sum![T] {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match &self.repr {
            Cons::Here(value) => value,
            Cons::There(nil) => match *nil {},
        }
    }
}

impl<T> DerefMut for Sum![T] {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.repr {
            Cons::Here(value) => value,
            Cons::There(nil) => match *nil {},
        }
    }
}

impl<T> Sum![T] {
    pub fn into_inner(self) -> T {
        match self.repr {
            Cons::Here(value) => value,
            Cons::There(nil) => match nil {},
        }
    }
}

impl Sum![] {
    pub fn unreachable(self) -> ! {
        match self.repr {}
    }
}

impl<S: repr::SumList> Sum<S> {
    /// Number of declared alternatives.
    pub const ARITY: usize = S::ARITY;

    pub fn arity(&self) -> usize {
        S::ARITY
    }

    /// Position of the alternative currently held.
    pub fn index(&self) -> usize {
        S::index(&self.repr)
    }

    pub fn type_name(&self) -> &'static str {
        S::type_name(&self.repr)
    }

    pub fn from_union(union: Repr<S>) -> Self {
        Sum { repr: union }
    }

    /// Drops the carrier bookkeeping and returns the bare union.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sumpipe::{repr::Cons, Sum};
    ///
    /// let s: Sum![u8, char] = Sum::new('x');
    /// match s.lower() {
    ///     Cons::Here(n) => panic!("unexpected {n}"),
    ///     Cons::There(rest) => assert!(matches!(rest, Cons::Here('x'))),
    /// }
    /// ```
    pub fn lower(self) -> Repr<S> {
        self.repr
    }

    /// Lowers into a type every alternative converts into.
    pub fn lower_into<R>(self) -> R
    where
        S: repr::Unify<R>,
    {
        S::unify(self.repr)
    }
}

impl<S: Witnessed> Sum<S> {
    /// Witnesses of every declared alternative, in declaration order.
    pub fn witnesses() -> Vec<Witness> {
        S::witness_list()
    }

    /// Witness of the alternative currently held.
    pub fn witness(&self) -> Witness {
        S::witness_of(&self.repr)
    }

    pub fn as_any(&self) -> &dyn Any {
        S::as_any(&self.repr)
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        S::as_any_mut(&mut self.repr)
    }
}

impl<S: repr::SumList> Sum<S> {
    pub fn new<T, U>(value: T) -> Self
    where
        S: repr::Split<T, U>,
        U: Tag,
    {
        Sum {
            repr: S::inject(value),
        }
    }

    pub fn get<T, U>(&self) -> Option<&T>
    where
        S: repr::Split<T, U>,
        U: Tag,
    {
        S::get(&self.repr)
    }

    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        S: repr::Split<T, U>,
        U: Tag,
    {
        S::get_mut(&mut self.repr)
    }

    pub fn inspect<T, U, F>(self, f: F) -> Self
    where
        S: repr::Split<T, U>,
        U: Tag,
        F: FnOnce(&T),
    {
        if let Some(value) = self.get() {
            f(value);
        }
        self
    }
}

pub type Rem<S, T, U> = <S as repr::Split<T, U>>::Remainder;
pub type Substitute<S, T, T2, U> = <S as repr::Substitute<T, T2, U>>::Output;

impl<S: repr::SumList> Sum<S> {
    /// Takes out the alternative `T`, or re-tags the value into the remaining
    /// alternatives.
    pub fn try_unwrap<T, U>(self) -> Result<T, Sum<Rem<S, T, U>>>
    where
        S: repr::Split<T, U>,
        U: Tag,
    {
        S::take(self.repr).map_err(Sum::from_union)
    }

    /// Transforms the alternative `T` in place, keeping its position.
    pub fn map<T, T2, U>(self, f: impl FnOnce(T) -> T2) -> Sum<Substitute<S, T, T2, U>>
    where
        S: repr::Substitute<T, T2, U>,
        U: Tag,
    {
        Sum::from_union(S::substitute(self.repr, f))
    }
}

pub type NarrowRem<S, S2, UMap> = <S as range::SplitList<S2, UMap>>::Remainder;

impl<S: repr::SumList> Sum<S> {
    pub fn narrow<S2, UMap>(self) -> Result<Sum<S2>, Sum<NarrowRem<S, S2, UMap>>>
    where
        S: range::SplitList<S2, UMap>,
        S2: repr::SumList,
    {
        S::narrow(self.repr)
            .map(Sum::from_union)
            .map_err(Sum::from_union)
    }

    pub fn broaden<S2, UMap>(self) -> Sum<S2>
    where
        S2: range::SplitList<S, UMap>,
    {
        Sum::from_union(S2::broaden(self.repr))
    }
}

impl<S: repr::SumList> fmt::Debug for Sum<S>
where
    Repr<S>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt(f)
    }
}

impl<S: repr::SumList> fmt::Display for Sum<S>
where
    Repr<S>: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt(f)
    }
}

impl<S: repr::SumList> Clone for Sum<S>
where
    Repr<S>: Clone,
{
    fn clone(&self) -> Self {
        Sum {
            repr: self.repr.clone(),
        }
    }
}

impl<S: repr::SumList> PartialEq for Sum<S>
where
    Repr<S>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl<S: repr::SumList> Eq for Sum<S> where Repr<S>: Eq {}

impl<S: repr::SumList> PartialOrd for Sum<S>
where
    Repr<S>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.repr.partial_cmp(&other.repr)
    }
}

impl<S: repr::SumList> Ord for Sum<S>
where
    Repr<S>: Ord,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.repr.cmp(&other.repr)
    }
}

impl<S: repr::SumList> Hash for Sum<S>
where
    Repr<S>: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state)
    }
}

impl<S: repr::SumList> Copy for Sum<S> where Repr<S>: Copy {}

#[cfg(test)]
mod tests {
    use std::{
        format,
        string::{String, ToString},
    };

    use super::*;
    use crate::tag::*;

    #[test]
    fn basic() {
        type T0 = (u32, ());
        type T1 = (u32, (String, ()));
        type T2 = (u32, (String, (u32, ())));

        let sum: Sum<T0> = 12345.into();
        assert_eq!(sum.get(), Some(&12345));

        let mut sum: Sum<T1> = sum.broaden();
        assert_eq!(sum.get::<u32, _>(), Some(&12345));
        assert_eq!(sum.get::<_, U1>(), None);

        sum = Sum::new("Hello World!".to_string());
        assert_eq!(sum.get(), Some(&"Hello World!".to_string()));

        let sum: Sum<T2> = sum.broaden::<_, T![U2, U1]>();
        assert_eq!(sum.get(), Some(&"Hello World!".to_string()));

        let sum: Sum<T1> = sum.narrow::<_, T![U0, U0]>().unwrap();
        let sum: Sum<(String, ())> = sum.narrow::<T0, _>().unwrap_err();
        assert_eq!(*sum, "Hello World!");
    }

    #[test]
    fn lift_then_lower() {
        let s = lift(String::from("CO"));
        assert_eq!(Sum::<(String, ())>::ARITY, 1);
        assert_eq!(s.clone().into_inner(), "CO");
        assert!(matches!(s.lower(), Cons::Here(v) if v == "CO"));
    }

    #[test]
    fn lower_into_common_type() {
        let s: Sum![u8, u16, u32] = Sum::new(7u16);
        assert_eq!(s.lower_into::<u64>(), 7);
    }

    #[test]
    fn from_result() {
        let ok: Sum![u8, char] = Ok::<u8, char>(1).into();
        let err: Sum![u8, char] = Err::<u8, char>('e').into();
        assert_eq!(ok.index(), 0);
        assert_eq!(err.get::<char, _>(), Some(&'e'));
    }

    #[test]
    fn try_unwrap_and_map() {
        let s: Sum![u8, char, bool] = Sum::new('m');
        let rest = s.try_unwrap::<u8, _>().unwrap_err();
        assert_eq!(rest.get::<char, _>(), Some(&'m'));

        let s: Sum![u8, char, bool] = Sum::new(true);
        let mapped: Sum![u8, char, &str] = s.map(|b: bool| if b { "yes" } else { "no" });
        assert_eq!(mapped.get::<&str, _>(), Some(&"yes"));

        let mut s: Sum![u8, char] = Sum::new(1u8);
        if let Some(n) = s.get_mut::<u8, _>() {
            *n += 1;
        }
        let seen = s.inspect(|n: &u8| assert_eq!(*n, 2));
        assert_eq!(seen.index(), 0);
    }

    #[test]
    fn formatting_and_ordering() {
        let a: Sum![u8, &str] = Sum::new(3u8);
        let b: Sum![u8, &str] = Sum::new("three");
        assert_eq!(format!("{a:?} {b}"), "3 three");
        assert!(a < b);
        assert_eq!(a, Sum::new(3u8));
        assert_eq!(a.type_name(), "u8");
    }

    #[test]
    fn witnesses_of_declared_and_held() {
        let s: Sum![u8, char] = Sum::new('w');
        assert_eq!(s.witness(), Witness::of::<char>());
        assert_eq!(
            Sum::<T![u8, char]>::witnesses(),
            [Witness::of::<u8>(), Witness::of::<char>()]
        );
        assert_eq!(s.as_any().downcast_ref::<char>(), Some(&'w'));
    }

    #[test]
    fn carriers_are_send_and_sync() {
        fn shareable<T: Send + Sync>(_: &T) {}

        let s: Sum![u8, String] = Sum::new(String::from("shared"));
        shareable(&s);
        std::thread::scope(|scope| {
            scope.spawn(|| assert_eq!(s.get::<String, _>().map(String::as_str), Some("shared")));
        });
    }
}
