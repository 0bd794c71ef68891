//! Time picker for dialogs.
//!
//! ## Usage
//!
//! Call [`time_picker`] from the dialog content on every composition pass.
//! The hour and minute faces are exposed as grids; times outside the
//! configured range are shown disabled and refuse selection.
use std::ops::RangeInclusive;

use chrono::{Local, NaiveTime, Timelike};
use derive_setters::Setters;
use material_dialogs_ui::{CallbackWith, Color, State};
use tracing::{debug, warn};

use crate::{
    dialog::DialogScope,
    notify::{NotifyMode, bind_selection},
    picker_grid::{GridCell, PickerGrid},
};

const CLOCK_COLUMNS: usize = 4;
const MINUTE_FACE_STEP: u32 = 5;

/// Indicates whether the selected time is in AM or PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// Ante meridiem (before noon).
    Am,
    /// Post meridiem (after noon).
    Pm,
}

/// Which face of the clock is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeField {
    /// Hour face.
    #[default]
    Hour,
    /// Minute face.
    Minute,
}

/// Colors used by the time picker.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct TimePickerColors {
    /// Background of the active hour/minute box and period.
    pub active_background_color: Color,
    /// Background of inactive boxes.
    pub inactive_background_color: Color,
    /// Text of the active box.
    pub active_text_color: Color,
    /// Text of inactive boxes.
    pub inactive_text_color: Color,
    /// Clock hand and selected face value.
    pub selector_color: Color,
    /// Text on top of the selector.
    pub selector_text_color: Color,
    /// Text of the header title.
    pub header_text_color: Color,
}

impl Default for TimePickerColors {
    fn default() -> Self {
        TimePickerDefaults::colors()
    }
}

/// Defaults for time picker behavior.
pub struct TimePickerDefaults;

impl TimePickerDefaults {
    /// Default title.
    pub const TITLE: &'static str = "SELECT TIME";

    /// The full day, minute resolution.
    pub fn time_range() -> RangeInclusive<NaiveTime> {
        NaiveTime::MIN..=NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Baseline Material colors.
    pub fn colors() -> TimePickerColors {
        let primary = Color::from_argb(0xFF62_00EE);
        TimePickerColors {
            active_background_color: primary.with_alpha(0.1),
            inactive_background_color: Color::LIGHT_GRAY,
            active_text_color: primary,
            inactive_text_color: Color::BLACK,
            selector_color: primary,
            selector_text_color: Color::WHITE,
            header_text_color: Color::BLACK,
        }
    }
}

/// Holds the current selection for a time picker.
#[derive(Debug, Clone)]
pub struct TimePickerState {
    time: NaiveTime,
    is_24_hour: bool,
    time_range: RangeInclusive<NaiveTime>,
    current_field: TimeField,
}

impl TimePickerState {
    /// Creates a time picker state. Seconds are dropped, a reversed range is
    /// normalized and an initial time outside the range is clamped into it.
    pub fn new(initial: NaiveTime, is_24_hour: bool, time_range: RangeInclusive<NaiveTime>) -> Self {
        let (start, end) = (truncate(*time_range.start()), truncate(*time_range.end()));
        let time_range = if start <= end { start..=end } else { end..=start };
        let initial = truncate(initial);
        let time = if time_range.contains(&initial) {
            initial
        } else {
            warn!(%initial, "initial time lies outside the allowed range, clamping");
            initial.clamp(*time_range.start(), *time_range.end())
        };
        Self {
            time,
            is_24_hour,
            time_range,
            current_field: TimeField::Hour,
        }
    }

    /// The selected time, seconds always zero.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the selected hour in 24-hour form (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the selected minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Returns whether the picker uses 24-hour mode.
    pub fn is_24_hour(&self) -> bool {
        self.is_24_hour
    }

    /// Allowed times.
    pub fn time_range(&self) -> &RangeInclusive<NaiveTime> {
        &self.time_range
    }

    /// The active clock face.
    pub fn current_field(&self) -> TimeField {
        self.current_field
    }

    /// Switches the active clock face.
    pub fn set_current_field(&mut self, field: TimeField) {
        self.current_field = field;
    }

    /// Returns the period for 12-hour mode.
    pub fn period(&self) -> DayPeriod {
        if self.hour() >= 12 {
            DayPeriod::Pm
        } else {
            DayPeriod::Am
        }
    }

    /// Returns the hour to display in the UI.
    pub fn hour_for_display(&self) -> u32 {
        hour_for_display(self.hour(), self.is_24_hour)
    }

    /// Whether `time` lies in the allowed range.
    pub fn is_time_allowed(&self, time: NaiveTime) -> bool {
        self.time_range.contains(&truncate(time))
    }

    /// Whether any minute of `hour` (0-23) is allowed.
    pub fn is_hour_enabled(&self, hour: u32) -> bool {
        let start = self.time_range.start();
        let end = self.time_range.end();
        hour < 24 && (start.hour()..=end.hour()).contains(&hour)
    }

    /// Whether `minute` is allowed in the selected hour.
    pub fn is_minute_enabled(&self, minute: u32) -> bool {
        self.time
            .with_minute(minute)
            .is_some_and(|time| self.time_range.contains(&time))
    }

    /// Sets the time if it is allowed.
    pub fn set_time(&mut self, time: NaiveTime) -> bool {
        let time = truncate(time);
        if !self.time_range.contains(&time) {
            debug!(%time, "time outside range refused");
            return false;
        }
        self.time = time;
        true
    }

    /// Selects an hour (0-23). The minute is pulled into the range when the
    /// hour is one of the range's end hours. Disabled hours are refused.
    pub fn set_hour(&mut self, hour: u32) -> bool {
        if !self.is_hour_enabled(hour) {
            debug!(hour, "hour outside range refused");
            return false;
        }
        let Some(candidate) = self.time.with_hour(hour) else {
            return false;
        };
        self.time = candidate.clamp(*self.time_range.start(), *self.time_range.end());
        true
    }

    /// Selects a minute (0-59) of the current hour if it is allowed.
    pub fn set_minute(&mut self, minute: u32) -> bool {
        let Some(candidate) = self.time.with_minute(minute) else {
            debug!(minute, "invalid minute refused");
            return false;
        };
        self.set_time(candidate)
    }

    /// Moves between AM and PM in 12-hour mode, keeping the clock hour.
    pub fn set_period(&mut self, period: DayPeriod) -> bool {
        if self.is_24_hour || self.period() == period {
            return false;
        }
        let hour = match period {
            DayPeriod::Am => self.hour() - 12,
            DayPeriod::Pm => self.hour() + 12,
        };
        match self.time.with_hour(hour) {
            Some(candidate) => self.set_time(candidate),
            None => false,
        }
    }

    /// Increments the hour by `step`, wrapping around the day. A step that
    /// leaves the range is refused.
    pub fn increment_hour(&mut self, step: u32) -> bool {
        let step = normalize_step(step, 23);
        self.step_to(self.time.with_hour((self.hour() + step) % 24))
    }

    /// Decrements the hour by `step`, wrapping around the day.
    pub fn decrement_hour(&mut self, step: u32) -> bool {
        let step = normalize_step(step, 23);
        self.step_to(self.time.with_hour((self.hour() + 24 - step) % 24))
    }

    /// Increments the minute by `step`, wrapping within the hour.
    pub fn increment_minute(&mut self, step: u32) -> bool {
        let step = normalize_step(step, 59);
        self.step_to(self.time.with_minute((self.minute() + step) % 60))
    }

    /// Decrements the minute by `step`, wrapping within the hour.
    pub fn decrement_minute(&mut self, step: u32) -> bool {
        let step = normalize_step(step, 59);
        self.step_to(self.time.with_minute((self.minute() + 60 - step) % 60))
    }

    fn step_to(&mut self, candidate: Option<NaiveTime>) -> bool {
        match candidate {
            Some(candidate) => self.set_time(candidate),
            None => false,
        }
    }
}

impl Default for TimePickerState {
    fn default() -> Self {
        TimePickerState::new(
            Local::now().time(),
            false,
            TimePickerDefaults::time_range(),
        )
    }
}

/// Configuration options for [`time_picker`].
///
/// Initial-state fields are read only when the picker state is created.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct TimePickerArgs {
    /// Initial selection.
    pub initial_time: NaiveTime,
    /// Optional override for the header title.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Whether hours run 0-23 instead of 12/AM/PM.
    pub is_24_hour: bool,
    /// Allowed times, inclusive.
    pub time_range: RangeInclusive<NaiveTime>,
    /// Step size for hour changes.
    pub hour_step: u32,
    /// Step size for minute changes.
    pub minute_step: u32,
    /// Report the selection only when the positive button fires.
    pub wait_for_positive_button: bool,
    /// Picker colors.
    pub colors: TimePickerColors,
}

impl Default for TimePickerArgs {
    fn default() -> Self {
        Self {
            initial_time: truncate(Local::now().time()),
            title: None,
            is_24_hour: false,
            time_range: TimePickerDefaults::time_range(),
            hour_step: 1,
            minute_step: 1,
            wait_for_positive_button: true,
            colors: TimePickerDefaults::colors(),
        }
    }
}

/// Snapshot of a time picker plus the handlers that mutate it.
#[derive(Debug, Clone)]
pub struct TimePickerView {
    state: State<TimePickerState>,
    title: String,
    hour_label: String,
    minute_label: String,
    period: Option<DayPeriod>,
    current_field: TimeField,
    face: PickerGrid<u32>,
    colors: TimePickerColors,
    hour_step: u32,
    minute_step: u32,
}

impl TimePickerView {
    /// Handle to the remembered picker state.
    pub fn state(&self) -> State<TimePickerState> {
        self.state
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Two-digit hour as displayed.
    pub fn hour_label(&self) -> &str {
        &self.hour_label
    }

    /// Two-digit minute.
    pub fn minute_label(&self) -> &str {
        &self.minute_label
    }

    /// AM/PM indicator, `None` in 24-hour mode.
    pub fn period(&self) -> Option<DayPeriod> {
        self.period
    }

    /// The active clock face.
    pub fn current_field(&self) -> TimeField {
        self.current_field
    }

    /// Values of the active clock face. Hour values are 0-23.
    pub fn face(&self) -> &PickerGrid<u32> {
        &self.face
    }

    /// Picker colors.
    pub fn colors(&self) -> &TimePickerColors {
        &self.colors
    }

    /// Switches the active clock face.
    pub fn focus(&self, field: TimeField) {
        self.update(|state| {
            state.set_current_field(field);
            true
        });
    }

    /// Clicks a cell of the active face. Picking an hour moves to the
    /// minute face.
    pub fn click_face(&self, index: usize) -> bool {
        let Some(cell) = self.face.cell(index) else {
            return false;
        };
        if !cell.enabled {
            debug!(value = cell.value, "disabled clock value clicked");
            return false;
        }
        let value = cell.value;
        match self.current_field {
            TimeField::Hour => self.update(|state| {
                let accepted = state.set_hour(value);
                if accepted {
                    state.set_current_field(TimeField::Minute);
                }
                accepted
            }),
            TimeField::Minute => self.update(|state| state.set_minute(value)),
        }
    }

    /// Switches between AM and PM.
    pub fn set_period(&self, period: DayPeriod) -> bool {
        self.update(|state| state.set_period(period))
    }

    /// Steps the active field up by the configured step.
    pub fn increment(&self) -> bool {
        let (hour_step, minute_step) = (self.hour_step, self.minute_step);
        match self.current_field {
            TimeField::Hour => self.update(|state| state.increment_hour(hour_step)),
            TimeField::Minute => self.update(|state| state.increment_minute(minute_step)),
        }
    }

    /// Steps the active field down by the configured step.
    pub fn decrement(&self) -> bool {
        let (hour_step, minute_step) = (self.hour_step, self.minute_step);
        match self.current_field {
            TimeField::Hour => self.update(|state| state.decrement_hour(hour_step)),
            TimeField::Minute => self.update(|state| state.decrement_minute(minute_step)),
        }
    }

    fn update(&self, f: impl FnOnce(&mut TimePickerState) -> bool) -> bool {
        self.state.try_with_mut(f).unwrap_or_else(|err| {
            warn!(%err, "time picker state is gone");
            false
        })
    }
}

/// A time picker with hour and minute faces.
///
/// `on_time_change` receives the selection on confirmation, or on every
/// change when `wait_for_positive_button` is off.
pub fn time_picker(
    dialog: &DialogScope,
    args: impl Into<TimePickerArgs>,
    on_time_change: impl Into<CallbackWith<NaiveTime>>,
) -> TimePickerView {
    let args: TimePickerArgs = args.into();
    let state = dialog.remember(|| {
        TimePickerState::new(args.initial_time, args.is_24_hour, args.time_range.clone())
    });

    bind_selection(
        dialog,
        state,
        NotifyMode::from_wait_for_positive_button(args.wait_for_positive_button),
        selected_time,
        on_time_change.into(),
    );

    state.with(|snapshot| TimePickerView {
        state,
        title: args
            .title
            .clone()
            .unwrap_or_else(|| TimePickerDefaults::TITLE.to_string()),
        hour_label: format!("{:02}", snapshot.hour_for_display()),
        minute_label: format!("{:02}", snapshot.minute()),
        period: (!snapshot.is_24_hour()).then(|| snapshot.period()),
        current_field: snapshot.current_field(),
        face: match snapshot.current_field() {
            TimeField::Hour => hour_face(snapshot),
            TimeField::Minute => minute_face(snapshot),
        },
        colors: args.colors,
        hour_step: args.hour_step,
        minute_step: args.minute_step,
    })
}

fn selected_time(state: &TimePickerState) -> Option<NaiveTime> {
    Some(state.time())
}

/// Hours of the clock face. In 12-hour mode the face shows the current
/// period, 12 first.
fn hour_face(state: &TimePickerState) -> PickerGrid<u32> {
    let hours: Vec<u32> = if state.is_24_hour() {
        (0..24).collect()
    } else {
        let offset = match state.period() {
            DayPeriod::Am => 0,
            DayPeriod::Pm => 12,
        };
        (0..12).map(|hour| hour + offset).collect()
    };
    let cells: Vec<_> = hours
        .into_iter()
        .map(|hour| {
            Some(GridCell {
                value: hour,
                label: hour_for_display(hour, state.is_24_hour()).to_string(),
                selected: hour == state.hour(),
                is_today: false,
                enabled: state.is_hour_enabled(hour),
            })
        })
        .collect();
    let initial = cells
        .iter()
        .position(|cell| cell.as_ref().is_some_and(|cell| cell.selected))
        .unwrap_or(0);
    PickerGrid::new(CLOCK_COLUMNS, cells, initial)
}

fn minute_face(state: &TimePickerState) -> PickerGrid<u32> {
    let cells: Vec<_> = (0..60)
        .step_by(MINUTE_FACE_STEP as usize)
        .map(|minute| {
            Some(GridCell {
                value: minute,
                label: format!("{minute:02}"),
                selected: minute == state.minute(),
                is_today: false,
                enabled: state.is_minute_enabled(minute),
            })
        })
        .collect();
    let initial = (state.minute() / MINUTE_FACE_STEP) as usize;
    PickerGrid::new(CLOCK_COLUMNS, cells, initial)
}

fn hour_for_display(hour: u32, is_24_hour: bool) -> u32 {
    if is_24_hour {
        hour
    } else {
        let hour = hour % 12;
        if hour == 0 { 12 } else { hour }
    }
}

fn normalize_step(step: u32, max: u32) -> u32 {
    if step == 0 { 1 } else { step.min(max) }
}

fn truncate(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::dialog::{MaterialDialog, MaterialDialogArgs};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid test time")
    }

    fn office_hours() -> RangeInclusive<NaiveTime> {
        time(9, 35)..=time(21, 13)
    }

    #[test]
    fn initial_time_is_truncated_and_clamped() {
        let state = TimePickerState::new(
            NaiveTime::from_hms_opt(10, 20, 45).expect("valid"),
            true,
            TimePickerDefaults::time_range(),
        );
        assert_eq!(state.time(), time(10, 20));

        let early = TimePickerState::new(time(7, 0), false, office_hours());
        assert_eq!(early.time(), time(9, 35));
        let reversed = TimePickerState::new(time(12, 0), false, time(21, 13)..=time(9, 35));
        assert_eq!(reversed.time_range(), &office_hours());
    }

    #[test]
    fn range_gates_hours_and_minutes() {
        let mut state = TimePickerState::new(time(12, 30), true, office_hours());
        assert!(!state.is_hour_enabled(8));
        assert!(state.is_hour_enabled(9));
        assert!(!state.set_hour(22));
        assert_eq!(state.time(), time(12, 30));

        // 9:30 is before the range start, the minute is pulled to 9:35.
        assert!(state.set_hour(9));
        assert_eq!(state.time(), time(9, 35));
        assert!(!state.is_minute_enabled(30));
        assert!(!state.set_minute(10));
        assert!(state.set_minute(50));
        assert!(!state.set_time(time(21, 14)));
        assert!(state.set_time(time(21, 13)));
    }

    #[test]
    fn stepping_wraps_and_refuses_leaving_the_range() {
        let mut full = TimePickerState::new(time(23, 58), true, TimePickerDefaults::time_range());
        assert!(full.increment_minute(5));
        assert_eq!(full.time(), time(23, 3));
        assert!(full.increment_hour(1));
        assert_eq!(full.time(), time(0, 3));
        assert!(full.decrement_minute(0));
        assert_eq!(full.time(), time(0, 2));
        assert!(full.decrement_hour(1));
        assert_eq!(full.time(), time(23, 2));

        let mut office = TimePickerState::new(time(21, 0), true, office_hours());
        assert!(!office.increment_hour(1));
        assert_eq!(office.time(), time(21, 0));
        assert!(office.increment_minute(13));
        assert!(!office.increment_minute(1));
    }

    #[test]
    fn twelve_hour_period_switch() {
        let mut state = TimePickerState::new(time(0, 15), false, TimePickerDefaults::time_range());
        assert_eq!(state.hour_for_display(), 12);
        assert_eq!(state.period(), DayPeriod::Am);
        assert!(state.set_period(DayPeriod::Pm));
        assert_eq!(state.time(), time(12, 15));
        assert!(!state.set_period(DayPeriod::Pm));

        // 22:00 is past the end of the range.
        let mut office = TimePickerState::new(time(10, 0), false, office_hours());
        assert!(!office.set_period(DayPeriod::Pm));
        assert_eq!(office.time(), time(10, 0));
    }

    #[test]
    fn view_flow_reports_on_confirmation() {
        let dialog = MaterialDialog::new(MaterialDialogArgs::default().positive_button("Ok"));
        dialog.show();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            CallbackWith::new(move |time: NaiveTime| seen.lock().push(time))
        };
        let args = TimePickerArgs::default()
            .initial_time(time(10, 0))
            .time_range(office_hours());
        let compose = || {
            dialog
                .compose(|scope| time_picker(scope, args.clone(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose();
        assert_eq!(view.title(), "SELECT TIME");
        assert_eq!(view.hour_label(), "10");
        assert_eq!(view.period(), Some(DayPeriod::Am));
        assert_eq!(view.face().len(), 12);
        // Hour 8 sits at index 8 of the AM face.
        assert!(!view.click_face(8));
        assert!(view.click_face(11));

        let view = compose();
        assert_eq!(view.current_field(), TimeField::Minute);
        assert_eq!(view.minute_label(), "00");
        assert!(view.click_face(9));
        assert!(seen.lock().is_empty());

        dialog.submit().expect("positive button enabled");
        assert_eq!(*seen.lock(), vec![time(11, 45)]);
    }
}
