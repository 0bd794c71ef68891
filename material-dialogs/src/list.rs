//! List dialogs: plain item lists, single choice and multi choice.
//!
//! Plain lists report a click immediately. Choice lists keep their selection
//! in the dialog scope and report it like the pickers do, on confirmation or
//! on every change.
use std::collections::BTreeSet;

use derive_setters::Setters;
use material_dialogs_ui::{CallbackWith, State};
use tracing::{debug, warn};

use crate::{
    dialog::{DialogScope, MaterialDialog},
    notify::{NotifyMode, bind_selection},
};

/// One row of a list dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Position in the list.
    pub index: usize,
    /// Text of the row.
    pub label: String,
    /// Disabled rows are dimmed and refuse clicks.
    pub enabled: bool,
    /// Whether the row's radio button or checkbox is checked.
    pub selected: bool,
}

fn list_rows(
    items: &[String],
    disabled: &BTreeSet<usize>,
    is_selected: impl Fn(usize) -> bool,
) -> Vec<ListItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, label)| ListItem {
            index,
            label: label.clone(),
            enabled: !disabled.contains(&index),
            selected: is_selected(index),
        })
        .collect()
}

fn collect_items<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// Configuration for [`list_items`].
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct ListItemsArgs {
    /// Rows of the list.
    #[setters(skip)]
    pub items: Vec<String>,
    /// Hide the dialog after a row is clicked.
    pub close_on_click: bool,
    /// Rows that refuse clicks.
    pub disabled_indices: Vec<usize>,
}

impl Default for ListItemsArgs {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            close_on_click: true,
            disabled_indices: Vec::new(),
        }
    }
}

impl ListItemsArgs {
    /// Creates args for the given rows.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: collect_items(items),
            ..Self::default()
        }
    }
}

/// A plain list produced by [`list_items`].
#[derive(Debug, Clone)]
pub struct ListView {
    dialog: MaterialDialog,
    items: Vec<ListItem>,
    close_on_click: bool,
    on_click: CallbackWith<(usize, String)>,
}

impl ListView {
    /// Rows to draw.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Clicks a row: reports `(index, label)` and hides the dialog when
    /// `close_on_click` is set.
    pub fn click(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        if !item.enabled {
            debug!(index, "disabled list item clicked");
            return false;
        }
        self.on_click.call((item.index, item.label.clone()));
        if self.close_on_click {
            self.dialog.hide();
        }
        true
    }
}

/// A plain list of rows. Clicks are reported immediately.
pub fn list_items(
    dialog: &DialogScope,
    args: impl Into<ListItemsArgs>,
    on_click: impl Into<CallbackWith<(usize, String)>>,
) -> ListView {
    let args: ListItemsArgs = args.into();
    let disabled: BTreeSet<usize> = args.disabled_indices.iter().copied().collect();
    ListView {
        dialog: dialog.dialog().clone(),
        items: list_rows(&args.items, &disabled, |_| false),
        close_on_click: args.close_on_click,
        on_click: on_click.into(),
    }
}

/// Selection of a single choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleChoiceState {
    len: usize,
    selected: Option<usize>,
    disabled: BTreeSet<usize>,
}

impl SingleChoiceState {
    /// Creates the state for `len` rows. An initial selection that is out of
    /// bounds or disabled is dropped.
    pub fn new(len: usize, initial: Option<usize>, disabled: impl IntoIterator<Item = usize>) -> Self {
        let disabled: BTreeSet<usize> = disabled.into_iter().collect();
        let selected = initial.filter(|index| {
            let valid = *index < len && !disabled.contains(index);
            if !valid {
                warn!(index, "initial selection is not selectable, ignoring");
            }
            valid
        });
        Self {
            len,
            selected,
            disabled,
        }
    }

    /// The selected row.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether `index` can be selected.
    pub fn is_enabled(&self, index: usize) -> bool {
        index < self.len && !self.disabled.contains(&index)
    }

    /// Selects a row. Disabled and out-of-bounds rows are refused.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.is_enabled(index) {
            debug!(index, "single choice refused");
            return false;
        }
        self.selected = Some(index);
        true
    }
}

/// Configuration for [`list_items_single_choice`].
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct SingleChoiceArgs {
    /// Rows of the list.
    #[setters(skip)]
    pub items: Vec<String>,
    /// Row checked when the dialog opens.
    #[setters(strip_option)]
    pub initial_selection: Option<usize>,
    /// Rows that refuse clicks.
    pub disabled_indices: Vec<usize>,
    /// Report the selection only when the positive button fires.
    pub wait_for_positive_button: bool,
}

impl Default for SingleChoiceArgs {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            initial_selection: None,
            disabled_indices: Vec::new(),
            wait_for_positive_button: true,
        }
    }
}

impl SingleChoiceArgs {
    /// Creates args for the given rows.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: collect_items(items),
            ..Self::default()
        }
    }
}

/// A single choice list produced by [`list_items_single_choice`].
#[derive(Debug, Clone)]
pub struct SingleChoiceView {
    dialog: MaterialDialog,
    state: State<SingleChoiceState>,
    items: Vec<ListItem>,
}

impl SingleChoiceView {
    /// Handle to the remembered selection.
    pub fn state(&self) -> State<SingleChoiceState> {
        self.state
    }

    /// Rows to draw.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Checks a row and enables the positive button.
    pub fn click(&self, index: usize) -> bool {
        let accepted = self
            .state
            .try_with_mut(|state| state.select(index))
            .unwrap_or(false);
        if accepted {
            self.dialog.set_positive_enabled(self.state, true);
        }
        accepted
    }
}

/// A list with one checked row. The positive button stays disabled until a
/// row is checked.
pub fn list_items_single_choice(
    dialog: &DialogScope,
    args: impl Into<SingleChoiceArgs>,
    on_choice_change: impl Into<CallbackWith<usize>>,
) -> SingleChoiceView {
    let args: SingleChoiceArgs = args.into();
    let state = dialog.remember(|| {
        SingleChoiceState::new(
            args.items.len(),
            args.initial_selection,
            args.disabled_indices.iter().copied(),
        )
    });

    let selected = state.with(SingleChoiceState::selected);
    dialog.set_positive_enabled(state, selected.is_some());
    bind_selection(
        dialog,
        state,
        NotifyMode::from_wait_for_positive_button(args.wait_for_positive_button),
        SingleChoiceState::selected,
        on_choice_change.into(),
    );

    let items = state.with(|snapshot| {
        list_rows(&args.items, &snapshot.disabled, |index| {
            snapshot.selected == Some(index)
        })
    });
    SingleChoiceView {
        dialog: dialog.dialog().clone(),
        state,
        items,
    }
}

/// Selection of a multi choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiChoiceState {
    len: usize,
    selected: BTreeSet<usize>,
    disabled: BTreeSet<usize>,
}

impl MultiChoiceState {
    /// Creates the state for `len` rows. Initial indices that are out of
    /// bounds or disabled are dropped.
    pub fn new(
        len: usize,
        initial: impl IntoIterator<Item = usize>,
        disabled: impl IntoIterator<Item = usize>,
    ) -> Self {
        let disabled: BTreeSet<usize> = disabled.into_iter().collect();
        let selected = initial
            .into_iter()
            .filter(|index| *index < len && !disabled.contains(index))
            .collect();
        Self {
            len,
            selected,
            disabled,
        }
    }

    /// Checked rows in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Whether `index` is checked.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Whether `index` can be toggled.
    pub fn is_enabled(&self, index: usize) -> bool {
        index < self.len && !self.disabled.contains(&index)
    }

    /// Checks or unchecks a row. Disabled and out-of-bounds rows are refused.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.is_enabled(index) {
            debug!(index, "multi choice toggle refused");
            return false;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        true
    }
}

/// Configuration for [`list_items_multi_choice`].
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct MultiChoiceArgs {
    /// Rows of the list.
    #[setters(skip)]
    pub items: Vec<String>,
    /// Rows checked when the dialog opens.
    pub initial_selection: Vec<usize>,
    /// Rows that refuse clicks.
    pub disabled_indices: Vec<usize>,
    /// Report the selection only when the positive button fires.
    pub wait_for_positive_button: bool,
}

impl Default for MultiChoiceArgs {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            initial_selection: Vec::new(),
            disabled_indices: Vec::new(),
            wait_for_positive_button: true,
        }
    }
}

impl MultiChoiceArgs {
    /// Creates args for the given rows.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: collect_items(items),
            ..Self::default()
        }
    }
}

/// A multi choice list produced by [`list_items_multi_choice`].
#[derive(Debug, Clone)]
pub struct MultiChoiceView {
    state: State<MultiChoiceState>,
    items: Vec<ListItem>,
}

impl MultiChoiceView {
    /// Handle to the remembered selection.
    pub fn state(&self) -> State<MultiChoiceState> {
        self.state
    }

    /// Rows to draw.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Toggles a row's checkbox.
    pub fn click(&self, index: usize) -> bool {
        self.state
            .try_with_mut(|state| state.toggle(index))
            .unwrap_or(false)
    }
}

/// A list of checkboxes. The sorted checked indices are reported.
pub fn list_items_multi_choice(
    dialog: &DialogScope,
    args: impl Into<MultiChoiceArgs>,
    on_checked_change: impl Into<CallbackWith<Vec<usize>>>,
) -> MultiChoiceView {
    let args: MultiChoiceArgs = args.into();
    let state = dialog.remember(|| {
        MultiChoiceState::new(
            args.items.len(),
            args.initial_selection.iter().copied(),
            args.disabled_indices.iter().copied(),
        )
    });

    bind_selection(
        dialog,
        state,
        NotifyMode::from_wait_for_positive_button(args.wait_for_positive_button),
        checked_indices,
        on_checked_change.into(),
    );

    let items = state.with(|snapshot| {
        list_rows(&args.items, &snapshot.disabled, |index| {
            snapshot.is_selected(index)
        })
    });
    MultiChoiceView { state, items }
}

fn checked_indices(state: &MultiChoiceState) -> Option<Vec<usize>> {
    Some(state.selected_indices())
}
