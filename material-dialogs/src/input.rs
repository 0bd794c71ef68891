//! Text input dialog content.
//!
//! ## Usage
//!
//! Call [`input`] from the dialog content on every composition pass and
//! route keystrokes to [`InputView::type_text`]. While the validator rejects
//! the text the dialog's positive button is disabled and the error message
//! is shown.
use derive_setters::Setters;
use material_dialogs_ui::{CallbackWith, State};
use tracing::{debug, warn};

use crate::{
    dialog::{DialogError, DialogScope, MaterialDialog},
    notify::{NotifyMode, bind_selection},
};

/// Configuration for [`input`].
#[derive(Clone, Setters)]
pub struct InputArgs {
    /// Floating label of the text field.
    #[setters(into)]
    pub label: String,
    /// Placeholder shown while the field is empty.
    #[setters(into)]
    pub placeholder: String,
    /// Text present when the dialog opens.
    #[setters(into)]
    pub prefill: String,
    /// Message shown while the text is invalid.
    #[setters(into)]
    pub error_message: String,
    /// Accepts or rejects the current text.
    #[setters(skip)]
    pub is_text_valid: CallbackWith<String, bool>,
    /// Report the text only when the positive button fires.
    pub wait_for_positive_button: bool,
    /// Submit the dialog from the keyboard's done action.
    pub submit_on_ime_action: bool,
}

impl Default for InputArgs {
    fn default() -> Self {
        Self {
            label: String::new(),
            placeholder: String::new(),
            prefill: String::new(),
            error_message: String::new(),
            is_text_valid: CallbackWith::always(),
            wait_for_positive_button: true,
            submit_on_ime_action: false,
        }
    }
}

impl InputArgs {
    /// Sets the validator.
    pub fn is_text_valid<F>(mut self, validator: F) -> Self
    where
        F: Fn(String) -> bool + Send + Sync + 'static,
    {
        self.is_text_valid = CallbackWith::new(validator);
        self
    }
}

/// Text and validity of an input dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    text: String,
    valid: bool,
}

impl InputState {
    /// Creates the state for `text` validated as `valid`.
    pub fn new(text: impl Into<String>, valid: bool) -> Self {
        Self {
            text: text.into(),
            valid,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the validator accepted the current text.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Replaces the text and its validity.
    pub fn set_text(&mut self, text: impl Into<String>, valid: bool) {
        self.text = text.into();
        self.valid = valid;
    }
}

/// Snapshot of an input field plus the handlers that mutate it.
#[derive(Debug, Clone)]
pub struct InputView {
    dialog: MaterialDialog,
    state: State<InputState>,
    validator: CallbackWith<String, bool>,
    label: String,
    placeholder: String,
    text: String,
    error: Option<String>,
    submit_on_ime_action: bool,
}

impl InputView {
    /// Handle to the remembered text.
    pub fn state(&self) -> State<InputState> {
        self.state
    }

    /// Field label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Field placeholder.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Text at composition time.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Error message, present while the text is invalid.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the field text, revalidates it and updates the positive
    /// button. Returns whether the new text is valid.
    pub fn type_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let valid = self.validator.call(text.clone());
        if !valid {
            debug!(%text, "input rejected by validator");
        }
        match self.state.try_with_mut(|state| state.set_text(text, valid)) {
            Ok(()) => {
                self.dialog.set_positive_enabled(self.state, valid);
                valid
            }
            Err(err) => {
                warn!(%err, "input state is gone");
                false
            }
        }
    }

    /// Keyboard done action: submits the dialog when configured to.
    pub fn ime_action(&self) -> Result<bool, DialogError> {
        if !self.submit_on_ime_action {
            return Ok(false);
        }
        self.dialog.submit().map(|()| true)
    }
}

/// A single-line text field. The text is reported on confirmation, or on
/// every valid change when `wait_for_positive_button` is off.
pub fn input(
    dialog: &DialogScope,
    args: impl Into<InputArgs>,
    on_input: impl Into<CallbackWith<String>>,
) -> InputView {
    let args: InputArgs = args.into();
    let state = dialog.remember(|| {
        let valid = args.is_text_valid.call(args.prefill.clone());
        InputState::new(args.prefill.clone(), valid)
    });

    let valid = state.with(InputState::is_valid);
    dialog.set_positive_enabled(state, valid);
    bind_selection(
        dialog,
        state,
        NotifyMode::from_wait_for_positive_button(args.wait_for_positive_button),
        valid_text,
        on_input.into(),
    );

    let (text, valid) = state.with(|state| (state.text().to_string(), state.is_valid()));
    InputView {
        dialog: dialog.dialog().clone(),
        state,
        validator: args.is_text_valid,
        label: args.label,
        placeholder: args.placeholder,
        text,
        error: (!valid).then_some(args.error_message),
        submit_on_ime_action: args.submit_on_ime_action,
    }
}

fn valid_text(state: &InputState) -> Option<String> {
    state.is_valid().then(|| state.text.clone())
}
