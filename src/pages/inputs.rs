use std::collections::HashMap;

use crate::form::{
    FormValue, InputIntent, InputReducer, InputState, ValidatedValue, Validator,
};
use crate::mvi::Reducer;
use crate::pages::PageError;

/// Static description of one input on a page.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub validators: &'static [Validator],
    pub error_text: &'static str,
}

/// The inputs currently rendered on a page, each with its local state.
pub(crate) struct InputSet<V> {
    mounted: HashMap<&'static str, (&'static FieldSpec, InputState<V>)>,
}

impl<V> InputSet<V>
where
    V: FormValue + Default + ValidatedValue,
{
    pub(crate) fn new() -> Self {
        Self {
            mounted: HashMap::new(),
        }
    }

    pub(crate) fn mount(&mut self, spec: &'static FieldSpec, initial: InputState<V>) {
        self.mounted.insert(spec.name, (spec, initial));
    }

    pub(crate) fn unmount(&mut self, name: &str) {
        self.mounted.remove(name);
    }

    pub(crate) fn is_mounted(&self, name: &str) -> bool {
        self.mounted.contains_key(name)
    }

    /// Run the field's validators over `value`; returns the verdict.
    pub(crate) fn change(&mut self, name: &str, value: V) -> Result<bool, PageError> {
        let (spec, state) = self
            .mounted
            .get_mut(name)
            .ok_or_else(|| PageError::UnknownField(name.to_string()))?;

        let next = InputReducer::<V>::reduce(
            std::mem::take(state),
            InputIntent::Change {
                value,
                validators: spec.validators.to_vec(),
            },
        );
        let is_valid = next.is_valid;
        *state = next;
        Ok(is_valid)
    }

    pub(crate) fn touch(&mut self, name: &str) -> Result<(), PageError> {
        let (_, state) = self
            .mounted
            .get_mut(name)
            .ok_or_else(|| PageError::UnknownField(name.to_string()))?;
        *state = InputReducer::<V>::reduce(std::mem::take(state), InputIntent::Touch);
        Ok(())
    }

    pub(crate) fn state(&self, name: &str) -> Option<&InputState<V>> {
        self.mounted.get(name).map(|(_, state)| state)
    }

    /// Error text to show under the input, once it has been touched.
    pub(crate) fn error_text(&self, name: &str) -> Option<&'static str> {
        self.mounted
            .get(name)
            .filter(|(_, state)| state.show_error())
            .map(|(spec, _)| spec.error_text)
    }
}
