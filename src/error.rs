use crate::witness::{Witness, Witnesses};

/// A function's declared input does not fit the carrier it was piped into.
///
/// Static carriers reject these at compile time; only [`crate::DynSum`]
/// reports them at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipeError {
    #[error(
        "declared input `{input}` is alternative #{position} of {alternatives}, \
         but a positional pipe only consumes the first"
    )]
    NotFirst {
        input: Witness,
        position: usize,
        alternatives: Witnesses,
    },

    #[error("declared input `{input}` is not present in the carrier's alternatives {alternatives}")]
    NotDeclared {
        input: Witness,
        alternatives: Witnesses,
    },

    #[error("declared input `{input}` is not assignable from any of the carrier's alternatives {alternatives}")]
    NotCovered {
        input: Witness,
        alternatives: Witnesses,
    },

    /// The erased function could not downcast the value it was handed. Carriers
    /// built through [`crate::DynSum::lift`] or `From<Sum<S>>` only hold exact
    /// witnesses and never produce this.
    #[error("function declared over `{input}` rejected a value of `{held}`")]
    Rejected { input: Witness, held: Witness },
}
