//! Type-level positions of alternatives in a type list.
//!
//! Positions are usually inferred. Name one explicitly only when the same type
//! is declared more than once in a list.

use core::marker::PhantomData;

/// Position 0.
pub struct UTerm;

/// The position right after `U`.
pub struct UInt<U>(PhantomData<U>);

pub trait Tag {
    /// Zero-based position this tag stands for.
    const INDEX: usize;
}

impl Tag for UTerm {
    const INDEX: usize = 0;
}

impl<U: Tag> Tag for UInt<U> {
    const INDEX: usize = 1 + U::INDEX;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
