//! Change notification shared by every picker.
//!
//! A picker reports its selection either once, when the dialog's positive
//! button fires ([`NotifyMode::OnPositiveButton`]), or on every accepted
//! change ([`NotifyMode::Immediate`]). Immediate delivery skips values equal
//! to the last delivered one.

use std::fmt::Debug;

use material_dialogs_ui::{CallbackWith, State, Subscription};
use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::dialog::DialogScope;

/// When a picker reports its selection to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// Deliver the selection once, when the positive button fires.
    #[default]
    OnPositiveButton,
    /// Deliver every accepted change as it happens.
    Immediate,
}

impl NotifyMode {
    /// Maps the `wait_for_positive_button` flag used by picker args.
    pub fn from_wait_for_positive_button(wait: bool) -> Self {
        if wait {
            NotifyMode::OnPositiveButton
        } else {
            NotifyMode::Immediate
        }
    }
}

struct ImmediateBinding<V> {
    sink: Mutex<CallbackWith<V>>,
    last: Mutex<Option<V>>,
    subscription: Mutex<Option<Subscription>>,
}

impl<V> ImmediateBinding<V>
where
    V: Clone + PartialEq,
{
    /// Records `value` and returns whether it differs from the last one.
    fn accept(&self, value: &V) -> bool {
        let mut last = self.last.lock();
        if last.as_ref() == Some(value) {
            return false;
        }
        *last = Some(value.clone());
        true
    }
}

/// Connects a picker state to the caller's change callback.
///
/// Must be called on every composition pass of the picker. `read` extracts
/// the reportable value; `None` means "nothing selected" and is never
/// delivered.
pub(crate) fn bind_selection<S, V>(
    dialog: &DialogScope,
    state: State<S>,
    mode: NotifyMode,
    read: fn(&S) -> Option<V>,
    on_change: CallbackWith<V>,
) where
    S: Send + Sync + 'static,
    V: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    match mode {
        NotifyMode::OnPositiveButton => {
            dialog.register_callback(state, move || {
                match state.try_with(read) {
                    Ok(Some(value)) => on_change.call(value),
                    Ok(None) => trace!("nothing selected on confirmation"),
                    Err(err) => warn!(%err, "picker state gone before confirmation"),
                }
            });
        }
        NotifyMode::Immediate => {
            let binding = dialog.remember_with_key(("immediate", state), || ImmediateBinding {
                sink: Mutex::new(on_change.clone()),
                last: Mutex::new(None),
                subscription: Mutex::new(None),
            });
            binding.with(|binding| *binding.sink.lock() = on_change);
            attach_immediate(binding, state, read);
        }
    }
}

fn attach_immediate<S, V>(
    binding: State<ImmediateBinding<V>>,
    state: State<S>,
    read: fn(&S) -> Option<V>,
) where
    S: Send + Sync + 'static,
    V: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    if binding.with(|binding| binding.subscription.lock().is_some()) {
        return;
    }

    let notify = move || {
        let Ok(Some(value)) = state.try_with(read) else {
            return;
        };
        let Ok(Some(value)) = binding.try_with(|binding| binding.accept(&value).then_some(value))
        else {
            return;
        };
        let Ok(sink) = binding.try_with(|binding| binding.sink.lock().clone()) else {
            return;
        };
        trace!(?value, "delivering selection change");
        sink.call(value);
    };

    // The initial value is reported once, on first composition.
    notify();

    match state.subscribe(notify) {
        Ok(subscription) => {
            binding.with(|binding| *binding.subscription.lock() = Some(subscription));
        }
        Err(err) => warn!(%err, "cannot observe picker state"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dialog::MaterialDialog;

    #[derive(Default)]
    struct Counter {
        value: Option<u32>,
    }

    fn read(counter: &Counter) -> Option<u32> {
        counter.value
    }

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, CallbackWith<u32>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            CallbackWith::new(move |value| seen.lock().push(value))
        };
        (seen, sink)
    }

    #[test]
    fn immediate_mode_delivers_distinct_changes() {
        let dialog = MaterialDialog::default();
        dialog.show();
        let (seen, sink) = recorder();

        let compose = || {
            dialog
                .compose(|scope| {
                    let state = scope.remember(Counter::default);
                    bind_selection(scope, state, NotifyMode::Immediate, read, sink.clone());
                    state
                })
                .expect("dialog is showing")
        };

        let state = compose();
        assert!(seen.lock().is_empty());

        state.with_mut(|c| c.value = Some(1));
        compose();
        state.with_mut(|c| c.value = Some(1));
        state.with_mut(|c| c.value = Some(2));
        compose();

        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn deferred_mode_waits_for_submit() {
        let dialog = MaterialDialog::default();
        dialog.show();
        let (seen, sink) = recorder();

        let state = dialog
            .compose(|scope| {
                let state = scope.remember(|| Counter { value: Some(5) });
                bind_selection(
                    scope,
                    state,
                    NotifyMode::OnPositiveButton,
                    read,
                    sink.clone(),
                );
                state
            })
            .expect("dialog is showing");

        state.with_mut(|c| c.value = Some(6));
        state.with_mut(|c| c.value = Some(7));
        assert!(seen.lock().is_empty());

        dialog.submit().expect("submit succeeds");
        assert_eq!(*seen.lock(), vec![7]);
    }

    #[test]
    fn wait_flag_maps_to_mode() {
        assert_eq!(
            NotifyMode::from_wait_for_positive_button(true),
            NotifyMode::OnPositiveButton
        );
        assert_eq!(
            NotifyMode::from_wait_for_positive_button(false),
            NotifyMode::Immediate
        );
    }
}
