//! Date and month pickers for dialogs.
//!
//! ## Usage
//!
//! Call [`date_picker`] or [`month_picker`] from the dialog content on every
//! composition pass. The picker state is remembered in the dialog scope and
//! dropped when the dialog hides. The returned view describes what to draw
//! and carries the click handlers.
use std::{ops::RangeInclusive, sync::Arc};

use chrono::{Datelike, Local, NaiveDate, Weekday};
use derive_setters::Setters;
use material_dialogs_ui::{CallbackWith, Color, State};
use tracing::{debug, warn};

use crate::{
    calendar::{YearMonth, first_of_month, with_year_clamped},
    dialog::DialogScope,
    locale::{MonthNames, format_headline, weekday_labels},
    notify::{NotifyMode, bind_selection},
    picker_grid::{PickerGrid, day_grid, month_grid, year_grid},
};

/// Colors used by the date and month pickers.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct DatePickerColors {
    /// Background of the title header.
    pub header_background_color: Color,
    /// Text color of the title header.
    pub header_text_color: Color,
    /// Text color of the year selector row.
    pub calendar_header_text_color: Color,
    /// Background of the selected cell.
    pub date_active_background_color: Color,
    /// Background of unselected cells.
    pub date_inactive_background_color: Color,
    /// Text color of the selected cell.
    pub date_active_text_color: Color,
    /// Text color of unselected cells.
    pub date_inactive_text_color: Color,
    /// Border drawn around today's cell.
    pub today_border_color: Color,
}

impl DatePickerColors {
    /// Cell background for the given selection state.
    pub fn date_background_color(&self, selected: bool) -> Color {
        if selected {
            self.date_active_background_color
        } else {
            self.date_inactive_background_color
        }
    }

    /// Cell text color for the given selection state.
    pub fn date_text_color(&self, selected: bool) -> Color {
        if selected {
            self.date_active_text_color
        } else {
            self.date_inactive_text_color
        }
    }

    /// Cell border color; only today's cell has a visible border.
    pub fn date_border_color(&self, is_today: bool) -> Color {
        if is_today {
            self.today_border_color
        } else {
            Color::TRANSPARENT
        }
    }
}

impl Default for DatePickerColors {
    fn default() -> Self {
        DatePickerDefaults::colors()
    }
}

/// Defaults for date picker behavior.
pub struct DatePickerDefaults;

impl DatePickerDefaults {
    /// Default selectable year range.
    pub const YEAR_RANGE: RangeInclusive<i32> = 1900..=2100;

    /// Default title of [`date_picker`].
    pub const DATE_TITLE: &'static str = "SELECT DATE";

    /// Default title of [`month_picker`].
    pub const MONTH_TITLE: &'static str = "SELECT MONTH";

    /// Baseline Material colors.
    pub fn colors() -> DatePickerColors {
        let primary = Color::from_argb(0xFF62_00EE);
        DatePickerColors {
            header_background_color: primary,
            header_text_color: Color::WHITE,
            calendar_header_text_color: Color::BLACK,
            date_active_background_color: primary,
            date_inactive_background_color: Color::TRANSPARENT,
            date_active_text_color: Color::WHITE,
            date_inactive_text_color: Color::BLACK,
            today_border_color: primary,
        }
    }
}

/// Holds the selection and navigation state of a date or month picker.
#[derive(Debug, Clone)]
pub struct DatePickerState {
    selected: NaiveDate,
    today: NaiveDate,
    displayed_month: YearMonth,
    year_picker_showing: bool,
    year_range: RangeInclusive<i32>,
    colors: DatePickerColors,
    dialog_background: Color,
}

impl DatePickerState {
    /// Creates a picker state. A reversed `year_range` is normalized and
    /// both bounds are clamped to the years a [`NaiveDate`] can hold.
    ///
    /// An initial date outside the range is kept as the selection; the day
    /// grid then starts on the nearest month inside the range.
    pub fn new(initial_date: NaiveDate, today: NaiveDate, year_range: RangeInclusive<i32>) -> Self {
        let year_range = normalize_year_range(year_range);
        if !year_range.contains(&initial_date.year()) {
            warn!(
                %initial_date,
                start = year_range.start(),
                end = year_range.end(),
                "initial date lies outside the selectable year range"
            );
        }
        let displayed_month = clamp_month_to_range(YearMonth::of(initial_date), &year_range);
        Self {
            selected: initial_date,
            today,
            displayed_month,
            year_picker_showing: false,
            year_range,
            colors: DatePickerDefaults::colors(),
            dialog_background: Color::WHITE,
        }
    }

    /// Replaces the picker colors.
    pub fn with_colors(mut self, colors: DatePickerColors) -> Self {
        self.colors = colors;
        self
    }

    /// Replaces the background drawn behind the grids.
    pub fn with_dialog_background(mut self, color: Color) -> Self {
        self.dialog_background = color;
        self
    }

    /// The current selection.
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// The date marked as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves the today marker.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// First day of the selected month; the page shown by the month and
    /// year grids.
    pub fn view_date(&self) -> NaiveDate {
        first_of_month(self.selected)
    }

    /// Month shown by the day grid.
    pub fn displayed_month(&self) -> YearMonth {
        self.displayed_month
    }

    /// Whether the year grid replaces the month or day grid.
    pub fn is_year_picker_showing(&self) -> bool {
        self.year_picker_showing
    }

    /// Selectable years, `start <= end`.
    pub fn year_range(&self) -> &RangeInclusive<i32> {
        &self.year_range
    }

    /// Picker colors.
    pub fn colors(&self) -> &DatePickerColors {
        &self.colors
    }

    /// Background behind the grids.
    pub fn dialog_background(&self) -> Color {
        self.dialog_background
    }

    /// Rebases the selection onto `year` and closes the year grid.
    ///
    /// Month and day are kept; Feb 29 becomes Feb 28 in a common year.
    /// Years outside the range are refused.
    pub fn select_year(&mut self, year: i32) -> bool {
        if !self.year_range.contains(&year) {
            debug!(year, "year outside range refused");
            return false;
        }
        let Some(date) = with_year_clamped(self.selected, year) else {
            debug!(year, "year not representable");
            return false;
        };
        self.selected = date;
        self.displayed_month = YearMonth::of(date);
        self.year_picker_showing = false;
        true
    }

    /// Selects `month` of the viewed year if `validator` accepts the
    /// candidate date (the first of that month).
    pub fn select_month<F>(&mut self, month: u32, validator: F) -> bool
    where
        F: FnOnce(NaiveDate) -> bool,
    {
        let Some(candidate) = self.view_date().with_month(month) else {
            debug!(month, "invalid month refused");
            return false;
        };
        if !validator(candidate) {
            debug!(%candidate, "month refused by validator");
            return false;
        }
        self.selected = candidate;
        self.displayed_month = clamp_month_to_range(YearMonth::of(candidate), &self.year_range);
        true
    }

    /// Selects a day if its year is in range and `validator` accepts it.
    pub fn select_date<F>(&mut self, date: NaiveDate, validator: F) -> bool
    where
        F: FnOnce(NaiveDate) -> bool,
    {
        if !self.year_range.contains(&date.year()) {
            debug!(%date, "date outside year range refused");
            return false;
        }
        if !validator(date) {
            debug!(%date, "date refused by validator");
            return false;
        }
        self.selected = date;
        self.displayed_month = YearMonth::of(date);
        true
    }

    /// Flips between the year grid and the month or day grid.
    pub fn toggle_year_picker(&mut self) {
        self.year_picker_showing = !self.year_picker_showing;
    }

    /// Shows or hides the year grid.
    pub fn set_year_picker_showing(&mut self, showing: bool) {
        self.year_picker_showing = showing;
    }

    /// Updates the displayed month, clamped to the year range.
    pub fn set_displayed_month(&mut self, month: YearMonth) {
        self.displayed_month = clamp_month_to_range(month, &self.year_range);
    }

    /// Pages the day grid forward, staying within the year range.
    pub fn next_month(&mut self) -> bool {
        if !self.can_navigate_next() {
            return false;
        }
        self.displayed_month = self.displayed_month.add_months(1);
        true
    }

    /// Pages the day grid backward, staying within the year range.
    pub fn previous_month(&mut self) -> bool {
        if !self.can_navigate_prev() {
            return false;
        }
        self.displayed_month = self.displayed_month.add_months(-1);
        true
    }

    /// Whether [`Self::next_month`] would move.
    pub fn can_navigate_next(&self) -> bool {
        let end = *self.year_range.end();
        let month = self.displayed_month;
        month.year() < end || (month.year() == end && month.month() < 12)
    }

    /// Whether [`Self::previous_month`] would move.
    pub fn can_navigate_prev(&self) -> bool {
        let start = *self.year_range.start();
        let month = self.displayed_month;
        month.year() > start || (month.year() == start && month.month() > 1)
    }
}

/// Configuration options for [`date_picker`] and [`month_picker`].
///
/// Initial-state fields are read only when the picker state is created,
/// on the first composition after the dialog is shown.
#[derive(Clone, Setters)]
pub struct DatePickerArgs {
    /// Initial selection. Defaults to `today`.
    #[setters(strip_option)]
    pub initial_date: Option<NaiveDate>,
    /// Date marked as today.
    pub today: NaiveDate,
    /// Optional override for the header title.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Picker colors.
    pub colors: DatePickerColors,
    /// Selectable years.
    pub year_range: RangeInclusive<i32>,
    /// Report the selection only when the positive button fires.
    pub wait_for_positive_button: bool,
    /// Dates for which this returns `false` are shown disabled.
    #[setters(skip)]
    pub allowed_date_validator: CallbackWith<NaiveDate, bool>,
    /// Locale tag used for month and weekday names.
    #[setters(into)]
    pub locale: String,
    /// First column of the day grid.
    pub first_day_of_week: Weekday,
    /// Month name tables.
    #[setters(skip)]
    pub month_names: Arc<MonthNames>,
}

impl Default for DatePickerArgs {
    fn default() -> Self {
        Self {
            initial_date: None,
            today: Local::now().date_naive(),
            title: None,
            colors: DatePickerDefaults::colors(),
            year_range: DatePickerDefaults::YEAR_RANGE,
            wait_for_positive_button: true,
            allowed_date_validator: CallbackWith::always(),
            locale: "en-US".to_string(),
            first_day_of_week: Weekday::Mon,
            month_names: Arc::new(MonthNames::builtin()),
        }
    }
}

impl DatePickerArgs {
    /// Sets the validity predicate for dates.
    pub fn allowed_date_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(NaiveDate) -> bool + Send + Sync + 'static,
    {
        self.allowed_date_validator = CallbackWith::new(validator);
        self
    }

    /// Sets the month name tables.
    pub fn month_names(mut self, month_names: impl Into<Arc<MonthNames>>) -> Self {
        self.month_names = month_names.into();
        self
    }
}

/// A page of the day grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPage {
    /// Header such as `March 2024`.
    pub month_label: String,
    /// Abbreviated weekday names, one per column.
    pub weekday_labels: Vec<String>,
    /// The days of the displayed month.
    pub grid: PickerGrid<NaiveDate>,
    /// Whether the previous-month arrow is enabled.
    pub can_navigate_prev: bool,
    /// Whether the next-month arrow is enabled.
    pub can_navigate_next: bool,
}

/// What the picker body shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePickerBody {
    /// The year grid.
    Years(PickerGrid<i32>),
    /// The month grid of [`month_picker`].
    Months(PickerGrid<u32>),
    /// The day grid of [`date_picker`].
    Days(DayPage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerKind {
    Date,
    Month,
}

/// Snapshot of a picker produced by one composition pass, plus the click
/// handlers that mutate its state.
#[derive(Debug, Clone)]
pub struct DatePickerView {
    state: State<DatePickerState>,
    validator: CallbackWith<NaiveDate, bool>,
    title: String,
    headline: String,
    year_label: String,
    year_picker_showing: bool,
    colors: DatePickerColors,
    background: Color,
    body: DatePickerBody,
}

impl DatePickerView {
    /// Handle to the remembered picker state.
    pub fn state(&self) -> State<DatePickerState> {
        self.state
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Formatted selection shown under the title.
    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// Label of the year selector, the viewed year.
    pub fn year_label(&self) -> &str {
        &self.year_label
    }

    /// Whether the year selector arrow points up.
    pub fn is_year_picker_showing(&self) -> bool {
        self.year_picker_showing
    }

    /// Picker colors.
    pub fn colors(&self) -> &DatePickerColors {
        &self.colors
    }

    /// Background behind the grids.
    pub fn background(&self) -> Color {
        self.background
    }

    /// The active grid.
    pub fn body(&self) -> &DatePickerBody {
        &self.body
    }

    /// Clicks the year selector row.
    pub fn toggle_year_picker(&self) {
        self.update(|state| {
            state.toggle_year_picker();
            true
        });
    }

    /// Clicks a cell of the year grid.
    pub fn click_year(&self, index: usize) -> bool {
        let DatePickerBody::Years(grid) = &self.body else {
            return false;
        };
        let Some(year) = grid.cell(index).map(|cell| cell.value) else {
            return false;
        };
        self.update(|state| state.select_year(year))
    }

    /// Clicks a cell of the month grid. Disabled cells are ignored.
    pub fn click_month(&self, index: usize) -> bool {
        let DatePickerBody::Months(grid) = &self.body else {
            return false;
        };
        let Some(cell) = grid.cell(index) else {
            return false;
        };
        if !cell.enabled {
            debug!(month = cell.value, "disabled month clicked");
            return false;
        }
        let month = cell.value;
        let validator = self.validator.clone();
        self.update(|state| state.select_month(month, |date| validator.call(date)))
    }

    /// Clicks a cell of the day grid. Disabled and empty cells are ignored.
    pub fn click_day(&self, index: usize) -> bool {
        let DatePickerBody::Days(page) = &self.body else {
            return false;
        };
        let Some(cell) = page.grid.cell(index) else {
            return false;
        };
        if !cell.enabled {
            debug!(date = %cell.value, "disabled day clicked");
            return false;
        }
        let date = cell.value;
        let validator = self.validator.clone();
        self.update(|state| state.select_date(date, |date| validator.call(date)))
    }

    /// Pages the day grid forward.
    pub fn next_month(&self) -> bool {
        self.update(DatePickerState::next_month)
    }

    /// Pages the day grid backward.
    pub fn previous_month(&self) -> bool {
        self.update(DatePickerState::previous_month)
    }

    fn update(&self, f: impl FnOnce(&mut DatePickerState) -> bool) -> bool {
        self.state.try_with_mut(f).unwrap_or_else(|err| {
            warn!(%err, "picker state is gone");
            false
        })
    }
}

/// A calendar picker: year grid or day grid of the displayed month.
///
/// `on_date_change` receives the selection on confirmation, or on every
/// change when `wait_for_positive_button` is off.
pub fn date_picker(
    dialog: &DialogScope,
    args: impl Into<DatePickerArgs>,
    on_date_change: impl Into<CallbackWith<NaiveDate>>,
) -> DatePickerView {
    compose_picker(dialog, args.into(), on_date_change.into(), PickerKind::Date)
}

/// A month picker: year grid or the twelve months of the viewed year.
///
/// Picking a month reports the first day of that month.
pub fn month_picker(
    dialog: &DialogScope,
    args: impl Into<DatePickerArgs>,
    on_date_change: impl Into<CallbackWith<NaiveDate>>,
) -> DatePickerView {
    compose_picker(dialog, args.into(), on_date_change.into(), PickerKind::Month)
}

fn compose_picker(
    dialog: &DialogScope,
    args: DatePickerArgs,
    on_date_change: CallbackWith<NaiveDate>,
    kind: PickerKind,
) -> DatePickerView {
    let background = dialog.dialog().background_color();
    let state = dialog.remember(|| {
        DatePickerState::new(
            args.initial_date.unwrap_or(args.today),
            args.today,
            args.year_range.clone(),
        )
        .with_colors(args.colors)
        .with_dialog_background(background)
    });

    bind_selection(
        dialog,
        state,
        NotifyMode::from_wait_for_positive_button(args.wait_for_positive_button),
        selected_date,
        on_date_change,
    );

    state.with(|snapshot| build_view(state, snapshot, &args, kind))
}

fn selected_date(state: &DatePickerState) -> Option<NaiveDate> {
    Some(state.selected())
}

fn build_view(
    state: State<DatePickerState>,
    snapshot: &DatePickerState,
    args: &DatePickerArgs,
    kind: PickerKind,
) -> DatePickerView {
    let validator = &args.allowed_date_validator;
    let view_date = snapshot.view_date();
    let title = args.title.clone().unwrap_or_else(|| {
        match kind {
            PickerKind::Date => DatePickerDefaults::DATE_TITLE,
            PickerKind::Month => DatePickerDefaults::MONTH_TITLE,
        }
        .to_string()
    });
    let headline = match kind {
        PickerKind::Date => format_headline(snapshot.selected(), &args.locale),
        PickerKind::Month => format!(
            "{} {}",
            args.month_names
                .name(&args.locale, snapshot.selected().month()),
            snapshot.selected().year()
        ),
    };

    let body = if snapshot.is_year_picker_showing() {
        DatePickerBody::Years(year_grid(snapshot))
    } else {
        match kind {
            PickerKind::Month => {
                let names = args.month_names.names_for(&args.locale);
                DatePickerBody::Months(month_grid(snapshot, validator, &names))
            }
            PickerKind::Date => {
                let displayed = snapshot.displayed_month();
                DatePickerBody::Days(DayPage {
                    month_label: format!(
                        "{} {}",
                        args.month_names.name(&args.locale, displayed.month()),
                        displayed.year()
                    ),
                    weekday_labels: weekday_labels(&args.locale, args.first_day_of_week),
                    grid: day_grid(snapshot, validator, args.first_day_of_week),
                    can_navigate_prev: snapshot.can_navigate_prev(),
                    can_navigate_next: snapshot.can_navigate_next(),
                })
            }
        }
    };

    DatePickerView {
        state,
        validator: validator.clone(),
        title,
        headline,
        year_label: view_date.year().to_string(),
        year_picker_showing: snapshot.is_year_picker_showing(),
        colors: *snapshot.colors(),
        background: snapshot.dialog_background(),
        body,
    }
}

/// Orders the bounds and clamps them to the years chrono can represent, so
/// the year grid never holds more than about half a million cells.
fn normalize_year_range(range: RangeInclusive<i32>) -> RangeInclusive<i32> {
    let (min, max) = (NaiveDate::MIN.year(), NaiveDate::MAX.year());
    let (start, end) = range.into_inner();
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    start.clamp(min, max)..=end.clamp(min, max)
}

fn clamp_month_to_range(month: YearMonth, year_range: &RangeInclusive<i32>) -> YearMonth {
    let start = *year_range.start();
    let end = *year_range.end();
    if month.year() < start {
        YearMonth::new(start, 1).unwrap_or(month)
    } else if month.year() > end {
        YearMonth::new(end, 12).unwrap_or(month)
    } else {
        month
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::dialog::{MaterialDialog, MaterialDialogArgs};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn is_weekday(date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn recorder() -> (Arc<Mutex<Vec<NaiveDate>>>, CallbackWith<NaiveDate>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            CallbackWith::new(move |date: NaiveDate| seen.lock().push(date))
        };
        (seen, sink)
    }

    fn march_args() -> DatePickerArgs {
        DatePickerArgs::default()
            .initial_date(date(2024, 3, 15))
            .today(date(2024, 3, 1))
    }

    fn dialog() -> MaterialDialog {
        let dialog = MaterialDialog::new(
            MaterialDialogArgs::default()
                .positive_button("Ok")
                .negative_button("Cancel"),
        );
        dialog.show();
        dialog
    }

    #[test]
    fn select_year_rebases_and_hides_year_grid() {
        let mut state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), 1900..=2100);
        state.toggle_year_picker();
        assert!(state.is_year_picker_showing());

        assert!(state.select_year(1999));
        assert_eq!(state.selected(), date(1999, 3, 15));
        assert!(!state.is_year_picker_showing());
        assert_eq!(state.displayed_month(), YearMonth::of(date(1999, 3, 1)));
    }

    #[test]
    fn select_year_clamps_leap_day_and_refuses_out_of_range() {
        let mut state = DatePickerState::new(date(2024, 2, 29), date(2024, 1, 1), 2000..=2030);
        assert!(state.select_year(2023));
        assert_eq!(state.selected(), date(2023, 2, 28));

        state.set_year_picker_showing(true);
        assert!(!state.select_year(1999));
        assert_eq!(state.selected(), date(2023, 2, 28));
        assert!(state.is_year_picker_showing());
    }

    #[test]
    fn select_year_covers_the_whole_range() {
        let mut state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), 1990..=2010);
        for year in 1990..=2010 {
            state.set_year_picker_showing(true);
            assert!(state.select_year(year));
            assert_eq!(state.selected(), date(year, 3, 15));
            assert!(!state.is_year_picker_showing());
        }
    }

    #[test]
    fn validator_refuses_saturday() {
        let mut state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), 1900..=2100);
        // March 16th 2024 is a Saturday.
        assert!(!state.select_date(date(2024, 3, 16), is_weekday));
        assert_eq!(state.selected(), date(2024, 3, 15));
        assert!(state.select_date(date(2024, 3, 18), is_weekday));
        assert_eq!(state.selected(), date(2024, 3, 18));
    }

    #[test]
    fn select_month_uses_view_date_and_validator() {
        let mut state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), 1900..=2100);
        // June 1st 2024 is a Saturday.
        assert!(!state.select_month(6, is_weekday));
        assert_eq!(state.selected(), date(2024, 3, 15));
        assert!(!state.select_month(13, |_| true));

        assert!(state.select_month(7, is_weekday));
        assert_eq!(state.selected(), date(2024, 7, 1));
        assert_eq!(state.view_date(), date(2024, 7, 1));
    }

    #[test]
    fn reversed_range_is_normalized() {
        let state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), 2100..=1900);
        assert_eq!(state.year_range(), &(1900..=2100));
    }

    #[test]
    fn year_range_is_clamped_to_representable_years() {
        let (min, max) = (NaiveDate::MIN.year(), NaiveDate::MAX.year());
        let state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), i32::MIN..=i32::MAX);
        assert_eq!(state.year_range(), &(min..=max));
        assert_eq!(year_grid(&state).len(), (max - min + 1) as usize);

        let state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), i32::MAX..=0);
        assert_eq!(state.year_range(), &(0..=max));
    }

    #[test]
    fn set_today_moves_the_marker() {
        let mut state = DatePickerState::new(date(2024, 3, 15), date(2024, 3, 1), 1900..=2100);
        let always = CallbackWith::always();
        let today_cells = |state: &DatePickerState| {
            let days: Vec<_> = day_grid(state, &always, Weekday::Mon)
                .cells()
                .iter()
                .flatten()
                .filter(|cell| cell.is_today)
                .map(|cell| cell.value)
                .collect();
            let months: Vec<_> = month_grid(state, &always, &[])
                .cells()
                .iter()
                .flatten()
                .filter(|cell| cell.is_today)
                .map(|cell| cell.value)
                .collect();
            (days, months)
        };
        assert_eq!(today_cells(&state), (vec![date(2024, 3, 1)], vec![3]));

        state.set_today(date(2024, 3, 20));
        assert_eq!(state.today(), date(2024, 3, 20));
        assert_eq!(today_cells(&state), (vec![date(2024, 3, 20)], vec![3]));

        // A today in another month leaves the March page unmarked.
        state.set_today(date(2024, 5, 2));
        assert_eq!(today_cells(&state), (vec![], vec![5]));
        assert_eq!(state.selected(), date(2024, 3, 15));
    }

    #[test]
    fn out_of_range_initial_date_is_kept() {
        let state = DatePickerState::new(date(1850, 5, 20), date(2024, 3, 1), 1900..=2100);
        assert_eq!(state.selected(), date(1850, 5, 20));
        assert_eq!(state.displayed_month(), YearMonth::of(date(1900, 1, 1)));
        assert!(!state.can_navigate_prev());
    }

    #[test]
    fn month_paging_stays_in_range() {
        let mut state = DatePickerState::new(date(2010, 11, 2), date(2010, 1, 1), 2000..=2010);
        assert!(state.next_month());
        assert_eq!(state.displayed_month(), YearMonth::of(date(2010, 12, 1)));
        assert!(!state.next_month());

        state.set_displayed_month(YearMonth::of(date(1990, 6, 1)));
        assert_eq!(state.displayed_month(), YearMonth::of(date(2000, 1, 1)));
        assert!(!state.previous_month());
        assert_eq!(state.selected(), date(2010, 11, 2));
    }

    #[test]
    fn colors_follow_selection_and_today() {
        let colors = DatePickerDefaults::colors().today_border_color(Color::RED);
        assert_eq!(colors.date_background_color(true), colors.date_active_background_color);
        assert_eq!(colors.date_text_color(false), Color::BLACK);
        assert_eq!(colors.date_border_color(true), Color::RED);
        assert_eq!(colors.date_border_color(false), Color::TRANSPARENT);
    }

    #[test]
    fn deferred_mode_reports_last_selection_once() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let compose = || {
            dialog
                .compose(|scope| date_picker(scope, march_args(), sink.clone()))
                .expect("dialog is showing")
        };

        // March 2024 starts on a Friday, so day `d` sits at index `d + 3`.
        for day in 1..=3 {
            let view = compose();
            assert!(view.click_day(day + 3));
        }
        assert!(seen.lock().is_empty());

        dialog.submit().expect("positive button enabled");
        assert_eq!(*seen.lock(), vec![date(2024, 3, 3)]);
        assert!(!dialog.is_showing());
    }

    #[test]
    fn immediate_mode_reports_each_distinct_change() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let args = march_args().wait_for_positive_button(false);
        let compose = || {
            dialog
                .compose(|scope| date_picker(scope, args.clone(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose();
        assert_eq!(*seen.lock(), vec![date(2024, 3, 15)]);

        // Re-selecting the initial day is not reported again.
        assert!(view.click_day(18));
        let view = compose();
        assert!(view.click_day(20));
        assert!(view.click_day(20));
        compose();

        assert_eq!(*seen.lock(), vec![date(2024, 3, 15), date(2024, 3, 17)]);
    }

    #[test]
    fn disabled_days_refuse_clicks() {
        let dialog = dialog();
        let (_, sink) = recorder();
        let args = march_args().allowed_date_validator(is_weekday);
        let view = dialog
            .compose(|scope| date_picker(scope, args, sink))
            .expect("dialog is showing");

        let DatePickerBody::Days(page) = view.body() else {
            panic!("day grid expected");
        };
        assert_eq!(page.month_label, "March 2024");
        assert_eq!(page.weekday_labels[0], "Mon");
        // Index 5 is Saturday March 2nd.
        assert!(!page.grid.cell(5).expect("filled").enabled);
        assert!(!view.click_day(5));
        assert!(!view.click_day(0));
        assert_eq!(view.state().get().selected(), date(2024, 3, 15));
        assert_eq!(view.headline(), "Fri, Mar 15");
        assert_eq!(view.title(), "SELECT DATE");
    }

    #[test]
    fn year_selector_switches_body() {
        let dialog = dialog();
        let (_, sink) = recorder();
        let compose = || {
            dialog
                .compose(|scope| date_picker(scope, march_args(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose();
        assert_eq!(view.year_label(), "2024");
        view.toggle_year_picker();

        let view = compose();
        assert!(view.is_year_picker_showing());
        let DatePickerBody::Years(grid) = view.body() else {
            panic!("year grid expected");
        };
        assert_eq!(grid.initial_scroll_index(), 124);
        assert!(view.click_year(99));

        let view = compose();
        assert!(!view.is_year_picker_showing());
        assert_eq!(view.year_label(), "1999");
        assert_eq!(view.state().get().selected(), date(1999, 3, 15));
    }

    #[test]
    fn month_picker_reports_first_of_month() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let args = march_args()
            .locale("ru-RU")
            .allowed_date_validator(is_weekday);
        let compose = || {
            dialog
                .compose(|scope| month_picker(scope, args.clone(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose();
        assert_eq!(view.title(), "SELECT MONTH");
        assert_eq!(view.headline(), "март 2024");
        let DatePickerBody::Months(grid) = view.body() else {
            panic!("month grid expected");
        };
        assert_eq!(grid.cell(0).expect("filled").label, "январь");
        assert_eq!(grid.initial_scroll_index(), 3);
        // June 1st 2024 is a Saturday.
        assert!(!view.click_month(5));
        assert!(view.click_month(6));

        dialog.submit().expect("positive button enabled");
        assert_eq!(*seen.lock(), vec![date(2024, 7, 1)]);
    }

    #[test]
    fn reopening_starts_from_caller_inputs() {
        let dialog = dialog();
        let (_, sink) = recorder();
        let compose = |dialog: &MaterialDialog| {
            dialog
                .compose(|scope| date_picker(scope, march_args(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose(&dialog);
        assert!(view.click_day(7));
        let state = view.state();
        assert_eq!(state.get().selected(), date(2024, 3, 4));

        dialog.dismiss().expect("showing");
        assert!(!state.is_alive());
        assert!(!view.click_day(8));

        dialog.show();
        let view = compose(&dialog);
        assert_eq!(view.state().get().selected(), date(2024, 3, 15));
    }
}
