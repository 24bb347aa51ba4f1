use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::form::{Field, Fields, FormEngine, FormState, InputState, Validator};
use crate::http::{HttpRequest, RequestError, RequestLifecycle};
use crate::pages::inputs::{FieldSpec, InputSet};
use crate::pages::PageError;
use crate::session::Session;

static TITLE: FieldSpec = FieldSpec {
    name: "title",
    validators: &[Validator::Require],
    error_text: "Please enter a valid title.",
};

static DESCRIPTION: FieldSpec = FieldSpec {
    name: "description",
    validators: &[Validator::MinLength(5)],
    error_text: "Please enter a valid description (min. 5 characters).",
};

/// A place as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
}

#[derive(Deserialize)]
struct PlaceResponse {
    place: Place,
}

/// What the page would render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    /// Nothing loaded and no error to explain why.
    NotFound,
    /// Nothing loaded; the error message is shown instead.
    Failed(String),
    Ready,
}

/// Edit form for one existing place.
///
/// The form starts empty; [`load`](Self::load) fetches the place and seeds
/// both fields as valid. Inputs only exist once a place is loaded.
pub struct UpdatePlacePage {
    api: ApiConfig,
    place_id: String,
    form: FormEngine<String>,
    inputs: InputSet<String>,
    http: RequestLifecycle,
    loaded: Option<Place>,
}

impl UpdatePlacePage {
    pub fn new(api: ApiConfig, place_id: impl Into<String>) -> Result<Self, RequestError> {
        let http = RequestLifecycle::from_config(&api)?;
        Ok(Self::with_lifecycle(api, place_id, http))
    }

    pub fn with_lifecycle(
        api: ApiConfig,
        place_id: impl Into<String>,
        http: RequestLifecycle,
    ) -> Self {
        let mut fields = Fields::new();
        fields.insert(TITLE.name.to_string(), Field::invalid(String::new()));
        fields.insert(DESCRIPTION.name.to_string(), Field::invalid(String::new()));

        Self {
            api,
            place_id: place_id.into(),
            // Overwritten by load() before any input can be edited.
            form: FormEngine::new(fields, true),
            inputs: InputSet::new(),
            http,
            loaded: None,
        }
    }

    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn place(&self) -> Option<&Place> {
        self.loaded.as_ref()
    }

    pub fn form(&self) -> &FormState<String> {
        self.form.state()
    }

    pub fn request(&self) -> &RequestLifecycle {
        &self.http
    }

    pub fn status(&self) -> PageStatus {
        if self.http.is_loading() {
            return PageStatus::Loading;
        }
        match (&self.loaded, self.http.error_message()) {
            (Some(_), _) => PageStatus::Ready,
            (None, Some(message)) => PageStatus::Failed(message),
            (None, None) => PageStatus::NotFound,
        }
    }

    fn place_path(&self) -> String {
        self.api.endpoint(&format!("/places/{}", self.place_id))
    }

    /// Fetch the place and seed the form from it. On failure nothing is
    /// seeded and the error stays visible through [`status`](Self::status).
    pub async fn load(&mut self) -> Result<&Place, PageError> {
        let request = HttpRequest::get(self.place_path());
        let response: PlaceResponse = self.http.send(request).await?;
        let place = response.place;

        let mut fields = Fields::new();
        fields.insert(TITLE.name.to_string(), Field::valid(place.title.clone()));
        fields.insert(
            DESCRIPTION.name.to_string(),
            Field::valid(place.description.clone()),
        );
        self.form.set_data(fields, true);

        self.inputs
            .mount(&TITLE, InputState::new(place.title.clone(), true));
        self.inputs
            .mount(&DESCRIPTION, InputState::new(place.description.clone(), true));

        tracing::debug!(place_id = %self.place_id, "place loaded");
        Ok(self.loaded.insert(place))
    }

    /// Feed a new value into an input; returns its validity.
    pub fn input(&mut self, name: &str, value: impl Into<String>) -> Result<bool, PageError> {
        let value = value.into();
        let is_valid = self.inputs.change(name, value.clone())?;
        self.form.input(name, value, is_valid);
        Ok(is_valid)
    }

    pub fn touch(&mut self, name: &str) -> Result<(), PageError> {
        self.inputs.touch(name)
    }

    pub fn field_error(&self, name: &str) -> Option<&'static str> {
        self.inputs.error_text(name)
    }

    /// Save the edited title and description on behalf of `session`.
    ///
    /// Returns the route to navigate to afterwards: the user's places list.
    pub async fn submit(&self, session: &Session) -> Result<String, PageError> {
        if self.loaded.is_none() {
            return Err(PageError::NotLoaded);
        }
        if !self.form.is_valid() {
            return Err(PageError::InvalidForm);
        }

        let title = self.text(TITLE.name)?;
        let description = self.text(DESCRIPTION.name)?;

        let request = HttpRequest::patch(self.place_path())
            .json(json!({ "title": title, "description": description }))
            .authorized(session);
        let _: Value = self.http.send(request).await?;

        tracing::info!(place_id = %self.place_id, "place updated");
        Ok(format!("/{}/places", session.user_id))
    }

    pub fn clear_error(&self) {
        self.http.clear_error();
    }

    fn text(&self, name: &str) -> Result<String, PageError> {
        self.form
            .state()
            .value(name)
            .cloned()
            .ok_or_else(|| PageError::MissingField(name.to_string()))
    }
}
