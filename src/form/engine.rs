use crate::form::intent::FormIntent;
use crate::form::reducer::FormReducer;
use crate::form::state::{Fields, FormState, FormValue};
use crate::mvi::Reducer;

/// Owner of one form's current state.
///
/// Pages hold a `FormEngine` and feed it intents; every transition goes
/// through [`FormReducer`].
#[derive(Debug, Clone)]
pub struct FormEngine<V> {
    state: FormState<V>,
}

impl<V: FormValue> FormEngine<V> {
    pub fn new(inputs: Fields<V>, is_valid: bool) -> Self {
        Self {
            state: FormState::new(inputs, is_valid),
        }
    }

    pub fn state(&self) -> &FormState<V> {
        &self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn dispatch(&mut self, intent: FormIntent<V>) {
        let state = std::mem::take(&mut self.state);
        self.state = FormReducer::<V>::reduce(state, intent);
    }

    /// Record one input's value and verdict.
    pub fn input(&mut self, name: impl Into<String>, value: V, is_valid: bool) {
        self.dispatch(FormIntent::Input {
            name: name.into(),
            value,
            is_valid,
        });
    }

    /// Swap the whole field set, e.g. after loading data or switching modes.
    pub fn set_data(&mut self, inputs: Fields<V>, is_valid: bool) {
        self.dispatch(FormIntent::SetData { inputs, is_valid });
    }
}

impl<V: FormValue> From<FormState<V>> for FormEngine<V> {
    fn from(state: FormState<V>) -> Self {
        Self { state }
    }
}
