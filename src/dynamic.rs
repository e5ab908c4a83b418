//! Runtime-checked carriers, for alternatives that are only known at runtime.
//!
//! [`DynSum`] keeps its declared alternatives as a list of [`Witness`]es next
//! to a type-erased value. The pipe operators follow the same rules as the
//! static ones on [`Sum`], but the declaration checks that the compiler does
//! for `Sum` happen here when the pipe is made, and fail with a [`PipeError`].
//!
//! Unlike [`Sum`], these types hold unbounded trait objects and are neither
//! `Send` nor `Sync`; keep them on one thread.

use alloc::{boxed::Box, vec::Vec};
use core::{any::Any, fmt};

use tracing::{debug, trace};

use crate::{
    error::PipeError,
    func::Reified,
    witness::{Witness, Witnessed, Witnesses},
    Sum,
};

type Apply = Box<dyn Fn(Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>>>;

/// A type-erased reified function.
pub struct DynFn {
    input: Witness,
    outputs: Vec<Witness>,
    apply: Apply,
}

impl DynFn {
    /// Erases a function over a single declared input.
    pub fn new<F>(f: F) -> Self
    where
        F: Reified + 'static,
        F::Input: Any,
        F::Outputs: Witnessed,
    {
        DynFn {
            input: F::input_witness(),
            outputs: F::output_witnesses(),
            apply: Box::new(move |value: Box<dyn Any>| -> Result<Box<dyn Any>, Box<dyn Any>> {
                let input = value.downcast::<F::Input>()?;
                Ok(F::Outputs::into_any(f.call(*input).lower()))
            }),
        }
    }

    /// Erases a function whose input is a sum over several alternatives. The
    /// function accepts a value of any of them.
    pub fn covering<S, F>(f: F) -> Self
    where
        S: Witnessed,
        F: Reified<Input = Sum<S>> + 'static,
        F::Outputs: Witnessed,
    {
        DynFn {
            input: Witness::of_sum::<S>(),
            outputs: F::output_witnesses(),
            apply: Box::new(move |value: Box<dyn Any>| -> Result<Box<dyn Any>, Box<dyn Any>> {
                let input = S::from_any(value)?;
                Ok(F::Outputs::into_any(f.call(Sum::from_union(input)).lower()))
            }),
        }
    }

    pub fn input(&self) -> &Witness {
        &self.input
    }

    pub fn outputs(&self) -> &[Witness] {
        &self.outputs
    }

    /// Fails with [`PipeError::Rejected`] when `value` does not downcast to the
    /// declared input.
    fn call(&self, value: Box<dyn Any>, held: &Witness) -> Result<Box<dyn Any>, PipeError> {
        (self.apply)(value).map_err(|_| PipeError::Rejected {
            input: self.input.clone(),
            held: held.clone(),
        })
    }
}

impl fmt::Debug for DynFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynFn")
            .field("input", &self.input)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}

/// A carrier whose declared alternatives are checked at runtime.
pub struct DynSum {
    witnesses: Vec<Witness>,
    value: Box<dyn Any>,
}

impl DynSum {
    pub fn lift<T: Any>(value: T) -> Self {
        DynSum {
            witnesses: alloc::vec![Witness::of::<T>()],
            value: Box::new(value),
        }
    }

    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    pub fn arity(&self) -> usize {
        self.witnesses.len()
    }

    /// Position and witness of the alternative currently held. When
    /// alternatives overlap the first match wins.
    pub fn held(&self) -> Option<(usize, &Witness)> {
        self.witnesses
            .iter()
            .enumerate()
            .find(|(_, w)| w.matches(&*self.value))
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let DynSum { witnesses, value } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(DynSum { witnesses, value }),
        }
    }

    /// Drops the witness bookkeeping and returns the bare value.
    pub fn lower(self) -> Box<dyn Any> {
        self.value
    }

    /// Positional pipe. `f`'s declared input must be exactly the first
    /// declared alternative.
    pub fn pipe(self, f: &DynFn) -> Result<Self, PipeError> {
        let DynSum {
            witnesses: alternatives,
            value,
        } = self;

        let position = alternatives.iter().position(|w| w == f.input());
        match position {
            Some(0) => {}
            Some(position) => {
                debug!(input = %f.input(), position, "positional pipe rejected");
                return Err(PipeError::NotFirst {
                    input: f.input().clone(),
                    position,
                    alternatives: Witnesses(alternatives),
                });
            }
            None => {
                debug!(input = %f.input(), "positional pipe rejected");
                return Err(PipeError::NotDeclared {
                    input: f.input().clone(),
                    alternatives: Witnesses(alternatives),
                });
            }
        }

        let value = if alternatives[0].matches(&*value) {
            trace!(input = %f.input(), "positional pipe applied");
            f.call(value, &alternatives[0])?
        } else {
            trace!(input = %f.input(), "positional pipe passed through");
            value
        };

        let mut witnesses = f.outputs().to_vec();
        witnesses.extend(alternatives.into_iter().skip(1));
        Ok(DynSum { witnesses, value })
    }

    /// Any-position pipe. The first alternative that is both held and
    /// assignable to `f`'s input is transformed; all alternatives stay
    /// declared.
    pub fn pipe_any(self, f: &DynFn) -> Result<Self, PipeError> {
        let DynSum {
            witnesses: alternatives,
            value,
        } = self;

        if !alternatives
            .iter()
            .any(|w| Witness::is_assignable(w, f.input()))
        {
            debug!(input = %f.input(), "any-position pipe rejected");
            return Err(PipeError::NotCovered {
                input: f.input().clone(),
                alternatives: Witnesses(alternatives),
            });
        }

        let matched = alternatives
            .iter()
            .find(|w| w.matches(&*value) && Witness::is_assignable(w, f.input()));
        let value = match matched {
            Some(held) => {
                trace!(input = %f.input(), held = %held, "any-position pipe applied");
                f.call(value, held)?
            }
            None => {
                trace!(input = %f.input(), "any-position pipe passed through");
                value
            }
        };

        let mut witnesses = f.outputs().to_vec();
        witnesses.extend(alternatives);
        Ok(DynSum { witnesses, value })
    }
}

impl<S: Witnessed> From<Sum<S>> for DynSum {
    fn from(sum: Sum<S>) -> Self {
        DynSum {
            witnesses: S::witness_list(),
            value: S::into_any(sum.lower()),
        }
    }
}

impl fmt::Debug for DynSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("DynSum");
        d.field("witnesses", &Witnesses(self.witnesses.clone()));
        match self.held() {
            Some((_, held)) => d.field("held", held),
            None => d.field("held", &"<unknown>"),
        };
        d.finish()
    }
}
