//! Material dialog state: visibility, buttons and deferred callbacks.
//!
//! ## Usage
//!
//! Create one [`MaterialDialog`] per dialog, call [`MaterialDialog::compose`]
//! every frame with the dialog content, and route button presses to
//! [`MaterialDialog::submit`] and [`MaterialDialog::dismiss`]. State
//! remembered through the [`DialogScope`] lives until the dialog hides.
use std::{
    collections::{HashMap, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
    sync::Arc,
};

use derive_setters::Setters;
use material_dialogs_ui::{Callback, Color, Scope, State};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by dialog button actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DialogError {
    /// The action was issued while the dialog was hidden.
    #[error("dialog is not showing")]
    NotShowing,
    /// The positive button was pressed while some content disabled it.
    #[error("positive button is disabled")]
    PositiveDisabled,
}

/// Configuration for [`MaterialDialog`].
#[derive(Clone, Setters)]
pub struct MaterialDialogArgs {
    /// Optional title shown above the content.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Optional message shown below the title.
    #[setters(strip_option, into)]
    pub message: Option<String>,
    /// Text of the positive button; `None` hides the button.
    #[setters(strip_option, into)]
    pub positive_button: Option<String>,
    /// Text of the negative button; `None` hides the button.
    #[setters(strip_option, into)]
    pub negative_button: Option<String>,
    /// Whether button presses hide the dialog.
    pub auto_dismiss: bool,
    /// Background color passed down to picker grids.
    pub background_color: Color,
    /// Called on close requests (scrim click, back press) instead of hiding.
    #[setters(skip)]
    pub on_close_request: Option<Callback>,
}

impl MaterialDialogArgs {
    /// Sets the close-request handler.
    pub fn on_close_request<F>(mut self, on_close_request: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close_request = Some(Callback::new(on_close_request));
        self
    }
}

impl Default for MaterialDialogArgs {
    fn default() -> Self {
        Self {
            title: None,
            message: None,
            positive_button: None,
            negative_button: None,
            auto_dismiss: true,
            background_color: Color::WHITE,
            on_close_request: None,
        }
    }
}

struct DialogInner {
    args: MaterialDialogArgs,
    showing: bool,
    scope: Option<Arc<Scope>>,
    callbacks: Vec<(u64, Callback)>,
    positive_enabled: HashMap<u64, bool>,
}

impl DialogInner {
    fn is_positive_enabled(&self) -> bool {
        self.positive_enabled.values().all(|enabled| *enabled)
    }
}

/// A dialog with optional title, message and positive/negative buttons.
///
/// The handle is cheap to clone; clones control the same dialog.
#[derive(Clone)]
pub struct MaterialDialog {
    inner: Arc<Mutex<DialogInner>>,
}

impl std::fmt::Debug for MaterialDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MaterialDialog")
            .field("title", &inner.args.title)
            .field("showing", &inner.showing)
            .field("callbacks", &inner.callbacks.len())
            .finish()
    }
}

impl Default for MaterialDialog {
    fn default() -> Self {
        Self::new(MaterialDialogArgs::default())
    }
}

impl MaterialDialog {
    /// Creates a hidden dialog.
    pub fn new(args: impl Into<MaterialDialogArgs>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DialogInner {
                args: args.into(),
                showing: false,
                scope: None,
                callbacks: Vec::new(),
                positive_enabled: HashMap::new(),
            })),
        }
    }

    /// Shows the dialog. Content state is created on the next composition.
    pub fn show(&self) {
        let mut inner = self.inner.lock();
        if inner.showing {
            return;
        }
        inner.showing = true;
        inner.scope = Some(Arc::new(Scope::new()));
        info!(title = ?inner.args.title, "dialog shown");
    }

    /// Hides the dialog and drops everything its content remembered.
    pub fn hide(&self) {
        let scope = {
            let mut inner = self.inner.lock();
            if !inner.showing {
                return;
            }
            inner.showing = false;
            inner.callbacks.clear();
            inner.positive_enabled.clear();
            info!(title = ?inner.args.title, "dialog hidden");
            inner.scope.take()
        };
        drop(scope);
    }

    /// Returns whether the dialog is showing.
    pub fn is_showing(&self) -> bool {
        self.inner.lock().showing
    }

    /// Runs one composition pass of the dialog content.
    ///
    /// Returns `None` without calling `content` while the dialog is hidden.
    pub fn compose<R>(&self, content: impl FnOnce(&DialogScope) -> R) -> Option<R> {
        let scope = {
            let inner = self.inner.lock();
            if !inner.showing {
                return None;
            }
            Arc::clone(inner.scope.as_ref()?)
        };
        scope.begin_frame();
        let dialog_scope = DialogScope {
            dialog: self.clone(),
            scope,
        };
        Some(content(&dialog_scope))
    }

    /// Presses the positive button: runs every registered callback once, in
    /// registration order, then hides the dialog if `auto_dismiss` is set.
    pub fn submit(&self) -> Result<(), DialogError> {
        let (callbacks, auto_dismiss) = {
            let inner = self.inner.lock();
            if !inner.showing {
                return Err(DialogError::NotShowing);
            }
            if !inner.is_positive_enabled() {
                return Err(DialogError::PositiveDisabled);
            }
            let callbacks: Vec<Callback> = inner
                .callbacks
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect();
            (callbacks, inner.args.auto_dismiss)
        };

        debug!(count = callbacks.len(), "running dialog callbacks");
        for callback in callbacks {
            callback.call();
        }
        if auto_dismiss {
            self.hide();
        }
        Ok(())
    }

    /// Presses the negative button: hides the dialog if `auto_dismiss` is set
    /// without running callbacks.
    pub fn dismiss(&self) -> Result<(), DialogError> {
        let auto_dismiss = {
            let inner = self.inner.lock();
            if !inner.showing {
                return Err(DialogError::NotShowing);
            }
            inner.args.auto_dismiss
        };
        if auto_dismiss {
            self.hide();
        }
        Ok(())
    }

    /// Handles a close request (scrim click, back press).
    pub fn close_request(&self) {
        let handler = {
            let inner = self.inner.lock();
            if !inner.showing {
                return;
            }
            inner.args.on_close_request.clone()
        };
        match handler {
            Some(handler) => handler.call(),
            None => self.hide(),
        }
    }

    /// Enables or disables the positive button on behalf of `key`. The button
    /// is enabled only while every key is enabled.
    pub fn set_positive_enabled<K: Hash>(&self, key: K, enabled: bool) {
        let key = key_hash(&key);
        let mut inner = self.inner.lock();
        if inner.showing {
            inner.positive_enabled.insert(key, enabled);
        }
    }

    /// Returns whether the positive button accepts presses.
    pub fn is_positive_enabled(&self) -> bool {
        self.inner.lock().is_positive_enabled()
    }

    /// Dialog title.
    pub fn title(&self) -> Option<String> {
        self.inner.lock().args.title.clone()
    }

    /// Dialog message.
    pub fn message(&self) -> Option<String> {
        self.inner.lock().args.message.clone()
    }

    /// Positive button text.
    pub fn positive_button(&self) -> Option<String> {
        self.inner.lock().args.positive_button.clone()
    }

    /// Negative button text.
    pub fn negative_button(&self) -> Option<String> {
        self.inner.lock().args.negative_button.clone()
    }

    /// Background color for content.
    pub fn background_color(&self) -> Color {
        self.inner.lock().args.background_color
    }

    /// Returns and clears whether content state changed since the last call.
    pub fn take_invalidated(&self) -> bool {
        let scope = self.inner.lock().scope.clone();
        scope.is_some_and(|scope| scope.take_invalidated())
    }
}

/// Handle passed to dialog content during [`MaterialDialog::compose`].
pub struct DialogScope {
    dialog: MaterialDialog,
    scope: Arc<Scope>,
}

impl DialogScope {
    /// The dialog being composed. Clone it into event handlers that need to
    /// hide or submit the dialog.
    pub fn dialog(&self) -> &MaterialDialog {
        &self.dialog
    }

    /// Remember a value for as long as the dialog stays shown, identified by
    /// call order.
    pub fn remember<F, T>(&self, init: F) -> State<T>
    where
        F: FnOnce() -> T,
        T: Send + Sync + 'static,
    {
        self.scope.remember(init)
    }

    /// Remember a value for as long as the dialog stays shown, identified by
    /// `key`.
    pub fn remember_with_key<K, F, T>(&self, key: K, init: F) -> State<T>
    where
        K: Hash,
        F: FnOnce() -> T,
        T: Send + Sync + 'static,
    {
        self.scope.remember_with_key(key, init)
    }

    /// Registers a callback run when the positive button fires. A callback
    /// registered again under the same key replaces the previous one and
    /// keeps its position.
    pub fn register_callback<K: Hash>(&self, key: K, callback: impl Into<Callback>) {
        let key = key_hash(&key);
        let callback = callback.into();
        let mut inner = self.dialog.inner.lock();
        match inner.callbacks.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = callback,
            None => inner.callbacks.push((key, callback)),
        }
    }

    /// Enables or disables the positive button on behalf of `key`.
    pub fn set_positive_enabled<K: Hash>(&self, key: K, enabled: bool) {
        self.dialog.set_positive_enabled(key, enabled);
    }
}

fn key_hash<K: Hash>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let count = Arc::new(AtomicUsize::new(0));
        let callback = {
            let count = Arc::clone(&count);
            Callback::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        (count, callback)
    }

    #[test]
    fn compose_only_runs_while_showing() {
        let dialog = MaterialDialog::new(MaterialDialogArgs::default().title("Hello"));
        assert_eq!(dialog.compose(|_| 1), None);
        dialog.show();
        assert_eq!(dialog.compose(|_| 1), Some(1));
        assert_eq!(dialog.title().as_deref(), Some("Hello"));
    }

    #[test]
    fn hiding_drops_remembered_state() {
        let dialog = MaterialDialog::default();
        dialog.show();
        let state = dialog
            .compose(|scope| scope.remember(|| 41))
            .expect("dialog is showing");
        state.set(42);
        assert_eq!(
            dialog.compose(|scope| scope.remember(|| 0).get()),
            Some(42)
        );

        dialog.hide();
        assert!(!state.is_alive());

        dialog.show();
        assert_eq!(
            dialog.compose(|scope| scope.remember(|| 0).get()),
            Some(0)
        );
    }

    #[test]
    fn submit_runs_each_callback_once_and_hides() {
        let dialog = MaterialDialog::default();
        let (count, callback) = counter();
        dialog.show();
        for _ in 0..3 {
            dialog.compose(|scope| scope.register_callback("picker", callback.clone()));
        }

        assert_eq!(dialog.submit(), Ok(()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!dialog.is_showing());
        assert_eq!(dialog.submit(), Err(DialogError::NotShowing));
    }

    #[test]
    fn disabled_positive_button_refuses_submit() {
        let dialog = MaterialDialog::default();
        let (count, callback) = counter();
        dialog.show();
        dialog.compose(|scope| {
            scope.register_callback(1, callback.clone());
            scope.set_positive_enabled("input", false);
            scope.set_positive_enabled("list", true);
        });

        assert!(!dialog.is_positive_enabled());
        assert_eq!(dialog.submit(), Err(DialogError::PositiveDisabled));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(dialog.is_showing());

        dialog.compose(|scope| scope.set_positive_enabled("input", true));
        assert_eq!(dialog.submit(), Ok(()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dismiss_skips_callbacks() {
        let dialog = MaterialDialog::default();
        let (count, callback) = counter();
        dialog.show();
        dialog.compose(|scope| scope.register_callback(0, callback.clone()));
        assert_eq!(dialog.dismiss(), Ok(()));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!dialog.is_showing());
    }

    #[test]
    fn without_auto_dismiss_dialog_stays_open() {
        let dialog = MaterialDialog::new(MaterialDialogArgs::default().auto_dismiss(false));
        dialog.show();
        assert_eq!(dialog.submit(), Ok(()));
        assert!(dialog.is_showing());
        assert_eq!(dialog.dismiss(), Ok(()));
        assert!(dialog.is_showing());
    }

    #[test]
    fn close_request_prefers_handler() {
        let (count, _) = counter();
        let handler_count = Arc::clone(&count);
        let dialog = MaterialDialog::new(MaterialDialogArgs::default().on_close_request(
            move || {
                handler_count.fetch_add(1, Ordering::SeqCst);
            },
        ));
        dialog.show();
        dialog.close_request();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(dialog.is_showing());

        let plain = MaterialDialog::default();
        plain.show();
        plain.close_request();
        assert!(!plain.is_showing());
    }
}
