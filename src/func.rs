//! Reified functions: plain functions that carry their declared input and
//! output alternatives in their type.

use alloc::vec::Vec;
use core::{any::Any, fmt, marker::PhantomData};

use crate::{
    repr::SumList,
    tag::{U0, U1},
    witness::{Witness, Witnessed},
    Sum,
};

/// A function from one declared input to one of its declared outputs.
///
/// Dispatch is not its business: a carrier decides whether to call it.
pub trait Reified {
    type Input;

    /// The alternatives the function may produce, in declaration order.
    type Outputs: SumList;

    fn call(&self, input: Self::Input) -> Sum<Self::Outputs>;

    fn input_witness() -> Witness
    where
        Self: Sized,
        Self::Input: Any,
    {
        Witness::of::<Self::Input>()
    }

    fn output_witnesses() -> Vec<Witness>
    where
        Self: Sized,
        Self::Outputs: Witnessed,
    {
        Self::Outputs::witness_list()
    }
}

impl<R: Reified + ?Sized> Reified for &R {
    type Input = R::Input;
    type Outputs = R::Outputs;

    fn call(&self, input: Self::Input) -> Sum<Self::Outputs> {
        (**self).call(input)
    }
}

/// A single-output step `A -> B`.
pub struct Reified1<A, B, F> {
    f: F,
    marker: PhantomData<fn(A) -> B>,
}

impl<A, B, F> Reified1<A, B, F>
where
    F: Fn(A) -> B,
{
    pub fn new(f: F) -> Self {
        Reified1 {
            f,
            marker: PhantomData,
        }
    }
}

impl<A, B, F> Reified for Reified1<A, B, F>
where
    F: Fn(A) -> B,
{
    type Input = A;
    type Outputs = (B, ());

    fn call(&self, input: A) -> Sum<(B, ())> {
        Sum::new::<B, U0>((self.f)(input))
    }
}

/// A dual-output step `A -> B | C`, written as a function returning
/// `Result<B, C>`.
pub struct Reified2<A, B, C, F> {
    f: F,
    marker: PhantomData<fn(A) -> Result<B, C>>,
}

impl<A, B, C, F> Reified2<A, B, C, F>
where
    F: Fn(A) -> Result<B, C>,
{
    pub fn new(f: F) -> Self {
        Reified2 {
            f,
            marker: PhantomData,
        }
    }
}

impl<A, B, C, F> Reified for Reified2<A, B, C, F>
where
    F: Fn(A) -> Result<B, C>,
{
    type Input = A;
    type Outputs = (B, (C, ()));

    fn call(&self, input: A) -> Sum<(B, (C, ()))> {
        match (self.f)(input) {
            Ok(b) => Sum::new::<B, U0>(b),
            Err(c) => Sum::new::<C, U1>(c),
        }
    }
}

impl<A, B, F> fmt::Debug for Reified1<A, B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reified1({} -> {})",
            core::any::type_name::<A>(),
            core::any::type_name::<B>()
        )
    }
}

impl<A, B, C, F> fmt::Debug for Reified2<A, B, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reified2({} -> {} | {})",
            core::any::type_name::<A>(),
            core::any::type_name::<B>(),
            core::any::type_name::<C>()
        )
    }
}

/// Reifies a single-output function.
///
/// # Examples
///
/// ```rust
/// use sumpipe::{lift, reify, Sum};
///
/// let len = reify(|s: String| s.len());
/// let n: Sum![usize] = lift(String::from("four")).pipe(&len);
/// assert_eq!(n.into_inner(), 4);
/// ```
pub fn reify<A, B, F>(f: F) -> Reified1<A, B, F>
where
    F: Fn(A) -> B,
{
    Reified1::new(f)
}

/// Reifies a success-or-error function.
///
/// # Examples
///
/// ```rust
/// use sumpipe::{lift, reify2, Sum};
///
/// let parse = reify2(|s: &'static str| s.parse::<u16>());
/// let port: Sum![u16, std::num::ParseIntError] = lift("80").pipe(&parse);
/// assert_eq!(port.get::<u16, _>(), Some(&80));
/// ```
pub fn reify2<A, B, C, F>(f: F) -> Reified2<A, B, C, F>
where
    F: Fn(A) -> Result<B, C>,
{
    Reified2::new(f)
}
