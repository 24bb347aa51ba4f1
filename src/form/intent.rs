use crate::form::state::{Fields, FormValue};
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FormIntent<V> {
    /// One input reported a new value together with its validator verdict.
    /// Inserts the field when the name is not present yet.
    Input {
        name: String,
        value: V,
        is_valid: bool,
    },
    /// Replace the whole field set. `is_valid` is stored as given.
    SetData { inputs: Fields<V>, is_valid: bool },
}

impl<V: FormValue> Intent for FormIntent<V> {}
