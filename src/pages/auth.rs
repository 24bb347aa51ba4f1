use serde_json::json;

use crate::config::ApiConfig;
use crate::form::{Field, FieldValue, Fields, FormEngine, FormState, InputState, Validator};
use crate::http::{HttpRequest, MultipartBody, RequestError, RequestLifecycle};
use crate::pages::inputs::{FieldSpec, InputSet};
use crate::pages::PageError;
use crate::session::Session;

static EMAIL: FieldSpec = FieldSpec {
    name: "email",
    validators: &[Validator::Email],
    error_text: "Please enter a valid email address.",
};

static PASSWORD: FieldSpec = FieldSpec {
    name: "password",
    validators: &[Validator::MinLength(6)],
    error_text: "Please enter a valid password, at least 6 characters.",
};

static NAME: FieldSpec = FieldSpec {
    name: "name",
    validators: &[Validator::Require],
    error_text: "Please enter a name.",
};

static IMAGE: FieldSpec = FieldSpec {
    name: "image",
    validators: &[Validator::File],
    error_text: "Please provide an image.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Login => write!(f, "login"),
            AuthMode::Signup => write!(f, "signup"),
        }
    }
}

/// Login / signup page.
///
/// Starts in login mode with `email` and `password`. Switching to signup
/// adds `name` and `image`; switching back drops them. Values typed into
/// `email` and `password` survive every switch.
pub struct AuthPage {
    api: ApiConfig,
    mode: AuthMode,
    form: FormEngine<FieldValue>,
    inputs: InputSet<FieldValue>,
    http: RequestLifecycle,
}

impl AuthPage {
    pub fn new(api: ApiConfig) -> Result<Self, RequestError> {
        let http = RequestLifecycle::from_config(&api)?;
        Ok(Self::with_lifecycle(api, http))
    }

    pub fn with_lifecycle(api: ApiConfig, http: RequestLifecycle) -> Self {
        let mut inputs = InputSet::new();
        inputs.mount(&EMAIL, InputState::default());
        inputs.mount(&PASSWORD, InputState::default());

        let mut fields = Fields::new();
        fields.insert(EMAIL.name.to_string(), Field::invalid(FieldValue::default()));
        fields.insert(PASSWORD.name.to_string(), Field::invalid(FieldValue::default()));

        Self {
            api,
            mode: AuthMode::Login,
            form: FormEngine::new(fields, false),
            inputs,
            http,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn form(&self) -> &FormState<FieldValue> {
        self.form.state()
    }

    pub fn request(&self) -> &RequestLifecycle {
        &self.http
    }

    /// Whether the input is rendered in the current mode.
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.is_mounted(name)
    }

    pub fn input_state(&self, name: &str) -> Option<&InputState<FieldValue>> {
        self.inputs.state(name)
    }

    /// Feed a new value into an input; returns its validity.
    pub fn input(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool, PageError> {
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

    pub fn switch_mode(&mut self) {
        match self.mode {
            AuthMode::Signup => {
                let state = self.form.state();
                let is_valid = [EMAIL.name, PASSWORD.name]
                    .iter()
                    .all(|name| state.field(name).is_some_and(|field| field.is_valid));
                let fields = state.inputs_without(&[NAME.name, IMAGE.name]);

                self.form.set_data(fields, is_valid);
                self.inputs.unmount(NAME.name);
                self.inputs.unmount(IMAGE.name);
                self.mode = AuthMode::Login;
            }
            AuthMode::Login => {
                let fields = self.form.state().inputs_with([
                    (NAME.name.to_string(), Field::invalid(FieldValue::default())),
                    (IMAGE.name.to_string(), Field::invalid(FieldValue::no_file())),
                ]);

                self.form.set_data(fields, false);
                self.inputs.mount(&NAME, InputState::default());
                self.inputs
                    .mount(&IMAGE, InputState::new(FieldValue::no_file(), false));
                self.mode = AuthMode::Signup;
            }
        }
        tracing::debug!(mode = %self.mode, "auth mode switched");
    }

    /// Log in or sign up with the current form values.
    ///
    /// Refused without a network call while the form is invalid.
    pub async fn submit(&self) -> Result<Session, PageError> {
        if !self.form.is_valid() {
            return Err(PageError::InvalidForm);
        }

        let email = self.text(EMAIL.name)?;
        let password = self.text(PASSWORD.name)?;

        let request = match self.mode {
            AuthMode::Login => HttpRequest::post(self.api.endpoint("/users/login"))
                .json(json!({ "email": email, "password": password })),
            AuthMode::Signup => {
                let name = self.text(NAME.name)?;
                let image = self
                    .form
                    .state()
                    .value(IMAGE.name)
                    .and_then(FieldValue::upload)
                    .cloned()
                    .ok_or_else(|| PageError::MissingField(IMAGE.name.to_string()))?;

                let body = MultipartBody::new()
                    .text("email", email)
                    .text("name", name)
                    .text("password", password)
                    .file("image", image);
                HttpRequest::post(self.api.endpoint("/users/signup")).multipart(body)
            }
        };

        let session: Session = self.http.send(request).await?;
        tracing::info!(user_id = %session.user_id, mode = %self.mode, "authenticated");
        Ok(session)
    }

    pub fn clear_error(&self) {
        self.http.clear_error();
    }

    fn text(&self, name: &str) -> Result<String, PageError> {
        self.form
            .state()
            .text(name)
            .map(str::to_string)
            .ok_or_else(|| PageError::MissingField(name.to_string()))
    }
}
