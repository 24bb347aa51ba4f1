use std::marker::PhantomData;

use crate::form::state::FormValue;
use crate::form::validator::{validate, ValidatedValue, Validator};
use crate::mvi::{Intent, Reducer, UiState};

/// Local state of a single input before it reports to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState<V> {
    pub value: V,
    pub is_touched: bool,
    pub is_valid: bool,
}

impl<V: Default> Default for InputState<V> {
    fn default() -> Self {
        Self {
            value: V::default(),
            is_touched: false,
            is_valid: false,
        }
    }
}

impl<V: FormValue + Default> UiState for InputState<V> {}

impl<V> InputState<V> {
    /// Seed an input with a value already known to be valid or invalid.
    pub fn new(value: V, is_valid: bool) -> Self {
        Self {
            value,
            is_touched: false,
            is_valid,
        }
    }

    /// An error is only shown once the user has left the input.
    pub fn show_error(&self) -> bool {
        !self.is_valid && self.is_touched
    }
}

#[derive(Debug, Clone)]
pub enum InputIntent<V> {
    Change {
        value: V,
        validators: Vec<Validator>,
    },
    /// Input lost focus.
    Touch,
}

impl<V: FormValue> Intent for InputIntent<V> {}

pub struct InputReducer<V>(PhantomData<fn() -> V>);

impl<V> Reducer for InputReducer<V>
where
    V: FormValue + Default + ValidatedValue,
{
    type State = InputState<V>;
    type Intent = InputIntent<V>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            InputIntent::Change { value, validators } => {
                let is_valid = validate(&value, &validators);
                InputState {
                    value,
                    is_valid,
                    ..state
                }
            }
            InputIntent::Touch => InputState {
                is_touched: true,
                ..state
            },
        }
    }
}
