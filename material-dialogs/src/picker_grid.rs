//! Cell grids rendered by the date and month pickers.
//!
//! A grid is plain data: a column count, row-major cells and the index the
//! picker scrolls to when it first appears. Renderers draw the cells and
//! route clicks back through the picker view.

use chrono::{Datelike, NaiveDate, Weekday};
use material_dialogs_ui::CallbackWith;

use crate::{
    calendar::{DATE_COLUMNS, build_month_grid},
    date_picker::DatePickerState,
};

/// Columns used by the year and month grids.
pub const PICKER_COLUMNS: usize = 3;

/// A single selectable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell<V> {
    /// Value reported when the cell is clicked.
    pub value: V,
    /// Text shown in the cell.
    pub label: String,
    /// Whether the cell holds the current selection.
    pub selected: bool,
    /// Whether the cell is drawn with the "today" border.
    pub is_today: bool,
    /// Disabled cells are dimmed and refuse clicks.
    pub enabled: bool,
}

/// Row-major grid of optional cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerGrid<V> {
    columns: usize,
    cells: Vec<Option<GridCell<V>>>,
    initial_scroll_index: usize,
}

impl<V> PickerGrid<V> {
    pub(crate) fn new(
        columns: usize,
        cells: Vec<Option<GridCell<V>>>,
        initial_scroll_index: usize,
    ) -> Self {
        let columns = columns.max(1);
        let initial_scroll_index = initial_scroll_index.min(cells.len().saturating_sub(1));
        Self {
            columns,
            cells,
            initial_scroll_index,
        }
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows, counting a partially filled last row.
    pub fn rows(&self) -> usize {
        self.cells.len().div_ceil(self.columns)
    }

    /// Number of cell positions, including empty ones.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the grid has no cell positions.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cell positions, row-major.
    pub fn cells(&self) -> &[Option<GridCell<V>>] {
        &self.cells
    }

    /// The cell at `index`, if the position is filled.
    pub fn cell(&self, index: usize) -> Option<&GridCell<V>> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// One row of cell positions.
    pub fn row(&self, row: usize) -> &[Option<GridCell<V>>] {
        let start = (row * self.columns).min(self.cells.len());
        let end = (start + self.columns).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Index the grid scrolls to when it first appears.
    pub fn initial_scroll_index(&self) -> usize {
        self.initial_scroll_index
    }

    /// Index of the selected cell, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|cell| cell.selected))
    }
}

/// Every year of the picker's range, three per row.
///
/// The cell for the viewed year is selected and the grid starts scrolled to
/// it. A viewed year outside the range scrolls to the nearest end.
pub fn year_grid(state: &DatePickerState) -> PickerGrid<i32> {
    let range = state.year_range();
    let view_year = state.view_date().year();
    let today_year = state.today().year();
    let cells: Vec<_> = range
        .clone()
        .map(|year| {
            Some(GridCell {
                value: year,
                label: year.to_string(),
                selected: year == view_year,
                is_today: year == today_year,
                enabled: true,
            })
        })
        .collect();
    let initial = i64::from(view_year) - i64::from(*range.start());
    let initial = initial.clamp(0, cells.len().saturating_sub(1) as i64) as usize;
    PickerGrid::new(PICKER_COLUMNS, cells, initial)
}

/// The twelve months of the viewed year, three per row.
///
/// `names` holds the twelve month labels, January first. A month is enabled
/// when `validator` accepts the first day of that month in the viewed year.
/// The initial scroll index is the viewed month's 1-based number, clamped
/// to the last cell.
pub fn month_grid(
    state: &DatePickerState,
    validator: &CallbackWith<NaiveDate, bool>,
    names: &[String],
) -> PickerGrid<u32> {
    let view_date = state.view_date();
    let selected_month = state.selected().month();
    let today_month = state.today().month();
    let cells: Vec<_> = (1..=12u32)
        .map(|month| {
            let enabled = view_date
                .with_month(month)
                .is_some_and(|candidate| validator.call(candidate));
            let label = names
                .get(month as usize - 1)
                .cloned()
                .unwrap_or_else(|| month.to_string());
            Some(GridCell {
                value: month,
                label,
                selected: month == selected_month,
                is_today: month == today_month,
                enabled,
            })
        })
        .collect();
    PickerGrid::new(PICKER_COLUMNS, cells, view_date.month() as usize)
}

/// The displayed month laid out by week, seven columns by six rows.
pub fn day_grid(
    state: &DatePickerState,
    validator: &CallbackWith<NaiveDate, bool>,
    first_day_of_week: Weekday,
) -> PickerGrid<NaiveDate> {
    let selected = state.selected();
    let today = state.today();
    let range = state.year_range();
    let cells: Vec<_> = build_month_grid(state.displayed_month(), first_day_of_week)
        .into_iter()
        .map(|date| {
            date.map(|date| GridCell {
                value: date,
                label: date.day().to_string(),
                selected: date == selected,
                is_today: date == today,
                enabled: range.contains(&date.year()) && validator.call(date),
            })
        })
        .collect();
    let initial = cells
        .iter()
        .position(|cell| cell.as_ref().is_some_and(|cell| cell.selected))
        .unwrap_or(0);
    PickerGrid::new(DATE_COLUMNS, cells, initial)
}
