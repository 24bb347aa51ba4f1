//! Validated multi-field form state.
//!
//! A form is a mapping from field name to `{value, is_valid}` plus an
//! aggregate validity. Validators run at the input boundary
//! ([`InputReducer`]); the form reducer only aggregates the verdicts it is
//! handed.
//!
//! ```text
//! keystroke ──→ InputReducer (runs validators) ──→ (value, is_valid)
//!                                                      │
//!                                    FormReducer ←─────┘  (AND over all fields)
//! ```

mod engine;
mod input;
mod intent;
mod reducer;
mod state;
pub mod validator;
mod value;

pub use engine::FormEngine;
pub use input::{InputIntent, InputReducer, InputState};
pub use intent::FormIntent;
pub use reducer::{initialize, replace_fields, update_field, FormReducer};
pub use state::{Field, Fields, FormState, FormValue};
pub use validator::{validate, ValidatedValue, Validator};
pub use value::FieldValue;
