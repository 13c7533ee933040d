//! Structural comparison of two parsed requirement sets.

mod engine;
mod result;

pub use engine::{compare, DiffEngine};
pub use result::{
    ChangeKind, DiffResult, DiffSide, DiffSummary, DuplicateIdWarning, FieldChange,
    ModifiedRequirement,
};
