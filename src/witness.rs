//! Runtime descriptors of declared alternatives.
//!
//! Static carriers never need these for dispatch; the positions are resolved
//! at compile time. Witnesses exist for introspection and for the dynamic
//! fallback in [`crate::dynamic`].
//!
//! Declared alternatives are assumed to be disjoint. Nothing here checks that:
//! when a type occurs twice in a list, lookups resolve to its first position.

use alloc::{boxed::Box, vec::Vec};
use core::{
    any::{self, Any, TypeId},
    fmt,
};

use crate::repr::{Cons, Nil, SumList};

/// A runtime descriptor of one declared type.
///
/// A witness built with [`Witness::of_sum`] also covers each of the sum's
/// alternatives, which is how a function declared over several alternatives at
/// once is described.
#[derive(Clone)]
pub struct Witness {
    id: TypeId,
    name: &'static str,
    members: Vec<Witness>,
}

impl Witness {
    pub fn of<T: Any>() -> Self {
        Witness {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
            members: Vec::new(),
        }
    }

    /// A witness for [`crate::Sum<S>`] that covers every alternative of `S`.
    pub fn of_sum<S: Witnessed>() -> Self {
        Witness {
            id: TypeId::of::<crate::Sum<S>>(),
            name: any::type_name::<crate::Sum<S>>(),
            members: S::witness_list(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The alternatives covered by a sum witness; empty for an exact one.
    pub fn members(&self) -> &[Witness] {
        &self.members
    }

    /// Whether `value` is of this type, or of one of the covered alternatives.
    pub fn matches(&self, value: &dyn Any) -> bool {
        value.type_id() == self.id || self.members.iter().any(|m| m.matches(value))
    }

    /// Whether every value described by `from` can stand where `to` is
    /// expected.
    pub fn is_assignable(from: &Witness, to: &Witness) -> bool {
        if from.id == to.id {
            return true;
        }
        if !from.members.is_empty() {
            return from.members.iter().all(|m| Witness::is_assignable(m, to));
        }
        to.members.iter().any(|m| Witness::is_assignable(from, m))
    }
}

impl PartialEq for Witness {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Witness {}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Witness({self})")
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            return f.write_str(self.name);
        }
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

/// An ordered list of witnesses, printed as `[A, B, C]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witnesses(pub Vec<Witness>);

impl fmt::Display for Witnesses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{w}")?;
        }
        f.write_str("]")
    }
}

/// Type lists whose alternatives can all be described at runtime.
pub trait Witnessed: SumList + 'static {
    #[doc(hidden)]
    fn push_witnesses(out: &mut Vec<Witness>);

    /// Witnesses of every declared alternative, in declaration order.
    fn witness_list() -> Vec<Witness> {
        let mut out = Vec::with_capacity(Self::ARITY);
        Self::push_witnesses(&mut out);
        out
    }

    /// Witness of the alternative held by `repr`.
    fn witness_of(repr: &Self::Repr) -> Witness;

    #[doc(hidden)]
    fn as_any(repr: &Self::Repr) -> &dyn Any;

    #[doc(hidden)]
    fn as_any_mut(repr: &mut Self::Repr) -> &mut dyn Any;

    #[doc(hidden)]
    fn into_any(repr: Self::Repr) -> Box<dyn Any>;

    /// Tags a type-erased value with the first alternative it matches.
    #[doc(hidden)]
    fn from_any(value: Box<dyn Any>) -> Result<Self::Repr, Box<dyn Any>>;
}

impl Witnessed for () {
    fn push_witnesses(_: &mut Vec<Witness>) {}

    fn witness_of(repr: &Nil) -> Witness {
        match *repr {}
    }

    fn as_any(repr: &Nil) -> &dyn Any {
        match *repr {}
    }

    fn as_any_mut(repr: &mut Nil) -> &mut dyn Any {
        match *repr {}
    }

    fn into_any(repr: Nil) -> Box<dyn Any> {
        match repr {}
    }

    fn from_any(value: Box<dyn Any>) -> Result<Nil, Box<dyn Any>> {
        Err(value)
    }
}

impl<Head: Any, Tail: Witnessed> Witnessed for (Head, Tail) {
    fn push_witnesses(out: &mut Vec<Witness>) {
        out.push(Witness::of::<Head>());
        Tail::push_witnesses(out);
    }

    fn witness_of(repr: &Self::Repr) -> Witness {
        match repr {
            Cons::Here(_) => Witness::of::<Head>(),
            Cons::There(next) => Tail::witness_of(next),
        }
    }

    fn as_any(repr: &Self::Repr) -> &dyn Any {
        match repr {
            Cons::Here(value) => value,
            Cons::There(next) => Tail::as_any(next),
        }
    }

    fn as_any_mut(repr: &mut Self::Repr) -> &mut dyn Any {
        match repr {
            Cons::Here(value) => value,
            Cons::There(next) => Tail::as_any_mut(next),
        }
    }

    fn into_any(repr: Self::Repr) -> Box<dyn Any> {
        match repr {
            Cons::Here(value) => Box::new(value),
            Cons::There(next) => Tail::into_any(next),
        }
    }

    fn from_any(value: Box<dyn Any>) -> Result<Self::Repr, Box<dyn Any>> {
        match value.downcast::<Head>() {
            Ok(head) => Ok(Cons::Here(*head)),
            Err(value) => Tail::from_any(value).map(Cons::There),
        }
    }
}
