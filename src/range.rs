//! Sub-lists of alternatives.
//!
//! A position map `UMap` is a type list of tags, one per element of the
//! sub-list, each naming where that element sits in what remains of the full
//! list after the previous elements were split off.

use crate::{
    repr::{Cons, Nil, Split, SumList},
    tag::Tag,
    NarrowRem, Rem,
};

/// The trait that type lists implement to be able to split the sub-list
/// `TList` out of themselves.
pub trait SplitList<TList: SumList, UList>: SumList {
    /// The remainder type list from splitting type list `Self` with type list
    /// `TList` and its position map `UList`.
    type Remainder: SumList;

    /// Re-tags the value into `TList` if it holds one of its alternatives.
    #[doc(hidden)]
    fn narrow(repr: Self::Repr) -> Result<TList::Repr, <Self::Remainder as SumList>::Repr>;

    #[doc(hidden)]
    fn broaden(sub: TList::Repr) -> Self::Repr;

    /// Inverse of a failed [`SplitList::narrow`].
    #[doc(hidden)]
    fn restore(rem: <Self::Remainder as SumList>::Repr) -> Self::Repr;
}

impl<T: SumList> SplitList<(), ()> for T {
    type Remainder = T;

    fn narrow(repr: T::Repr) -> Result<Nil, T::Repr> {
        Err(repr)
    }

    fn broaden(sub: Nil) -> T::Repr {
        match sub {}
    }

    fn restore(rem: T::Repr) -> T::Repr {
        rem
    }
}

impl<SubHead, SubTail, SuperHead, SuperTail, HeadIndex: Tag, TailIndex>
    SplitList<(SubHead, SubTail), (HeadIndex, TailIndex)> for (SuperHead, SuperTail)
where
    SubTail: SumList,
    SuperTail: SumList,
    Self: Split<SubHead, HeadIndex>,
    Rem<Self, SubHead, HeadIndex>: SplitList<SubTail, TailIndex>,
{
    type Remainder = NarrowRem<Rem<Self, SubHead, HeadIndex>, SubTail, TailIndex>;

    fn narrow(
        repr: Self::Repr,
    ) -> Result<Cons<SubHead, SubTail::Repr>, <Self::Remainder as SumList>::Repr> {
        match <Self as Split<SubHead, HeadIndex>>::take(repr) {
            Ok(head) => Ok(Cons::Here(head)),
            Err(rem) => {
                <Rem<Self, SubHead, HeadIndex> as SplitList<SubTail, TailIndex>>::narrow(rem)
                    .map(Cons::There)
            }
        }
    }

    fn broaden(sub: Cons<SubHead, SubTail::Repr>) -> Self::Repr {
        match sub {
            Cons::Here(head) => <Self as Split<SubHead, HeadIndex>>::inject(head),
            Cons::There(next) => {
                let rem = <Rem<Self, SubHead, HeadIndex> as SplitList<SubTail, TailIndex>>::broaden(
                    next,
                );
                <Self as Split<SubHead, HeadIndex>>::restore(rem)
            }
        }
    }

    fn restore(rem: <Self::Remainder as SumList>::Repr) -> Self::Repr {
        let rem = <Rem<Self, SubHead, HeadIndex> as SplitList<SubTail, TailIndex>>::restore(rem);
        <Self as Split<SubHead, HeadIndex>>::restore(rem)
    }
}
