use std::collections::HashMap;

use crate::form::validator::ValidatedValue;
use crate::mvi::UiState;

/// Bound shared by every value a form can hold.
pub trait FormValue: Clone + PartialEq + Send + 'static {}

impl<T> FormValue for T where T: Clone + PartialEq + Send + 'static {}

/// One named slot of form data.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<V> {
    pub value: V,
    pub is_valid: bool,
}

impl<V> Field<V> {
    pub fn new(value: V, is_valid: bool) -> Self {
        Self { value, is_valid }
    }

    pub fn valid(value: V) -> Self {
        Self::new(value, true)
    }

    pub fn invalid(value: V) -> Self {
        Self::new(value, false)
    }
}

/// Field name to field mapping. No ordering is implied.
pub type Fields<V> = HashMap<String, Field<V>>;

/// Canonical state of one form.
///
/// After every single-field update `is_valid` equals the AND of all field
/// verdicts. Construction and bulk replacement take the aggregate verbatim
/// from the caller, so until the next update it may differ from
/// [`FormState::fields_valid`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<V> {
    pub(crate) inputs: Fields<V>,
    pub(crate) is_valid: bool,
}

impl<V: FormValue> Default for FormState<V> {
    /// An empty form is vacuously valid.
    fn default() -> Self {
        Self {
            inputs: HashMap::new(),
            is_valid: true,
        }
    }
}

impl<V: FormValue> UiState for FormState<V> {}

impl<V> FormState<V> {
    pub fn new(inputs: Fields<V>, is_valid: bool) -> Self {
        Self { inputs, is_valid }
    }

    pub fn inputs(&self) -> &Fields<V> {
        &self.inputs
    }

    pub fn into_inputs(self) -> Fields<V> {
        self.inputs
    }

    pub fn field(&self, name: &str) -> Option<&Field<V>> {
        self.inputs.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&V> {
        self.inputs.get(name).map(|field| &field.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Stored aggregate validity.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Literal AND of the current field verdicts, ignoring the stored aggregate.
    pub fn fields_valid(&self) -> bool {
        self.inputs.values().all(|field| field.is_valid)
    }
}

impl<V: Clone> FormState<V> {
    /// Copy of the current mapping minus `names`, for composing the next
    /// shape of a form before a bulk replace.
    pub fn inputs_without(&self, names: &[&str]) -> Fields<V> {
        self.inputs
            .iter()
            .filter(|(name, _)| !names.contains(&name.as_str()))
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect()
    }

    /// Copy of the current mapping with `extra` fields added or overwritten.
    pub fn inputs_with<I>(&self, extra: I) -> Fields<V>
    where
        I: IntoIterator<Item = (String, Field<V>)>,
    {
        let mut inputs = self.inputs.clone();
        inputs.extend(extra);
        inputs
    }
}

impl<V: ValidatedValue> FormState<V> {
    /// Text content of a field, if it holds text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(|value| value.as_text())
    }
}
