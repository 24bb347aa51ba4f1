use std::marker::PhantomData;

use crate::form::intent::FormIntent;
use crate::form::state::{Field, Fields, FormState, FormValue};
use crate::mvi::Reducer;

pub struct FormReducer<V>(PhantomData<fn() -> V>);

impl<V: FormValue> Reducer for FormReducer<V> {
    type State = FormState<V>;
    type Intent = FormIntent<V>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Input {
                name,
                value,
                is_valid,
            } => {
                let mut inputs = state.inputs;
                inputs.insert(name, Field::new(value, is_valid));
                let is_valid = inputs.values().all(|field| field.is_valid);
                FormState { inputs, is_valid }
            }
            FormIntent::SetData { inputs, is_valid } => FormState { inputs, is_valid },
        }
    }
}

/// Build the initial state. The aggregate is taken as given, not derived.
pub fn initialize<V>(inputs: Fields<V>, is_valid: bool) -> FormState<V> {
    FormState::new(inputs, is_valid)
}

/// Upsert one field and recompute the aggregate over the whole mapping.
pub fn update_field<V: FormValue>(
    state: FormState<V>,
    name: impl Into<String>,
    value: V,
    is_valid: bool,
) -> FormState<V> {
    FormReducer::<V>::reduce(
        state,
        FormIntent::Input {
            name: name.into(),
            value,
            is_valid,
        },
    )
}

/// Discard every field and install `inputs` with the caller's aggregate.
pub fn replace_fields<V: FormValue>(
    state: FormState<V>,
    inputs: Fields<V>,
    is_valid: bool,
) -> FormState<V> {
    FormReducer::<V>::reduce(state, FormIntent::SetData { inputs, is_valid })
}
