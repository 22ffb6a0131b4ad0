//! Article form state
//!
//! Holds the values bound to the create/edit inputs and the dynamic list of
//! tag slots. Validation rules live in [`crate::validation`].

mod state;

pub use self::state::{FormState, TagSlot, TextField};
