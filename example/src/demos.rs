//! Demo catalogue and the session that drives one dialog headlessly.
use std::{fmt, str::FromStr, sync::Arc};

use anyhow::{Result, anyhow, bail};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use material_dialogs::{
    color_chooser::{
        ArgbChannel, ArgbSelector, ColorChooserArgs, ColorChooserView, ColorPage, ColorPalette,
        color_chooser,
    },
    date_picker::{
        DatePickerArgs, DatePickerBody, DatePickerDefaults, DatePickerView, date_picker,
        month_picker,
    },
    dialog::{DialogError, MaterialDialog, MaterialDialogArgs},
    input::{InputArgs, InputView, input},
    list::{
        ListItemsArgs, ListView, MultiChoiceArgs, MultiChoiceView, SingleChoiceArgs,
        SingleChoiceView, list_items, list_items_multi_choice, list_items_single_choice,
    },
    time_picker::{
        DayPeriod, TimeField, TimePickerArgs, TimePickerDefaults, TimePickerView, time_picker,
    },
};
use material_dialogs_ui::{CallbackWith, Color};
use parking_lot::Mutex;
use tracing::debug;

use crate::config::Settings;

const PURPLE: u32 = 0xFF37_00B3;

/// What a demo dialog shows below its title and message.
#[derive(Clone)]
pub enum Content {
    Message,
    List(ListItemsArgs),
    SingleChoice(SingleChoiceArgs),
    MultiChoice(MultiChoiceArgs),
    Input(InputArgs),
    Time(TimePickerArgs),
    Date(DatePickerArgs),
    Month(DatePickerArgs),
    Color(ColorChooserArgs),
}

#[derive(Clone)]
pub struct Demo {
    pub id: &'static str,
    pub title: &'static str,
    pub dialog: MaterialDialogArgs,
    pub content: Content,
    pub script: Vec<Action>,
}

pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub demos: Vec<Demo>,
}

pub fn sections(settings: &Settings) -> Vec<Section> {
    vec![
        Section {
            id: "basic",
            title: "Basic Dialogs",
            demos: basic_demos(settings),
        },
        Section {
            id: "lists",
            title: "List Dialogs",
            demos: list_demos(),
        },
        Section {
            id: "selection",
            title: "Single and Multi Selection",
            demos: selection_demos(settings),
        },
        Section {
            id: "datetime",
            title: "Date and Time Pickers",
            demos: date_time_demos(settings),
        },
        Section {
            id: "colors",
            title: "Color Picker Dialogs",
            demos: color_demos(settings),
        },
    ]
}

pub fn find_section<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
    sections.iter().find(|section| section.id == id)
}

pub fn find_demo<'a>(sections: &'a [Section], id: &str) -> Option<&'a Demo> {
    sections
        .iter()
        .flat_map(|section| section.demos.iter())
        .find(|demo| demo.id == id)
}

fn script(actions: &[&str]) -> Vec<Action> {
    actions
        .iter()
        .filter_map(|action| action.parse().ok())
        .collect()
}

fn ok_cancel(title: &str) -> MaterialDialogArgs {
    MaterialDialogArgs::default()
        .title(title)
        .positive_button("Ok")
        .negative_button("Cancel")
}

fn basic_demos(settings: &Settings) -> Vec<Demo> {
    let location = MaterialDialogArgs::default()
        .title("Use Location Services?")
        .message(
            "Let us help apps determine location. This means sending anonymous \
             location data to us, even when no apps are running.",
        );
    let email_is_valid = |text: String| {
        text.split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'))
    };
    vec![
        Demo {
            id: "basic",
            title: "Basic Dialog",
            dialog: location.clone(),
            content: Content::Message,
            script: script(&["show", "close"]),
        },
        Demo {
            id: "buttons",
            title: "Basic Dialog With Buttons",
            dialog: location
                .clone()
                .positive_button("Agree")
                .negative_button("Disagree"),
            content: Content::Message,
            script: script(&["show", "ok"]),
        },
        Demo {
            id: "stacked",
            title: "Basic Dialog With Stacked Buttons",
            dialog: location
                .positive_button("Turn On Speed Boost")
                .negative_button("No Thanks"),
            content: Content::Message,
            script: script(&["show", "cancel"]),
        },
        Demo {
            id: "input",
            title: "Basic Input Dialog",
            dialog: ok_cancel("Please enter your name"),
            content: Content::Input(
                InputArgs::default()
                    .label("Name")
                    .placeholder("Jon Smith")
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "type Jon Smith", "ok"]),
        },
        Demo {
            id: "input-ime",
            title: "Input Dialog Submitted From Keyboard",
            dialog: ok_cancel("Please enter your name"),
            content: Content::Input(
                InputArgs::default()
                    .label("Name")
                    .placeholder("Jon Smith")
                    .submit_on_ime_action(true)
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "type Jon", "ime"]),
        },
        Demo {
            id: "email",
            title: "Input Dialog With Email Validation",
            dialog: ok_cancel("Please enter your email"),
            content: Content::Input(
                InputArgs::default()
                    .label("Email")
                    .placeholder("hello@example.com")
                    .error_message("Invalid email")
                    .is_text_valid(email_is_valid)
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "type jon", "ok", "type jon@example.com", "ok"]),
        },
    ]
}

const RINGTONES: [&str; 6] = ["None", "Callisto", "Ganymede", "Luna", "Oberon", "Phobos"];

fn list_demos() -> Vec<Demo> {
    let emails = ["joe@gmail.com", "mike@gmail.com", "anna@gmail.com"];
    vec![
        Demo {
            id: "list",
            title: "Simple List Dialog",
            dialog: MaterialDialogArgs::default().title("Set backup account"),
            content: Content::List(ListItemsArgs::new(emails)),
            script: script(&["show", "click 1"]),
        },
        Demo {
            id: "list-disabled",
            title: "List Dialog With Disabled Items",
            dialog: MaterialDialogArgs::default()
                .title("Set backup account")
                .negative_button("Cancel"),
            content: Content::List(ListItemsArgs::new(emails).disabled_indices(vec![0])),
            script: script(&["show", "click 0", "click 2"]),
        },
    ]
}

fn selection_demos(settings: &Settings) -> Vec<Demo> {
    let labels = ["Label 1", "Label 2", "Label 3", "Label 4"];
    vec![
        Demo {
            id: "single",
            title: "Single Selection Dialog",
            dialog: ok_cancel("Phone Ringtone"),
            content: Content::SingleChoice(
                SingleChoiceArgs::new(RINGTONES)
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "ok", "click 3", "ok"]),
        },
        Demo {
            id: "single-disabled",
            title: "Single Selection Dialog With Disabled Items",
            dialog: ok_cancel("Phone Ringtone"),
            content: Content::SingleChoice(
                SingleChoiceArgs::new(RINGTONES)
                    .initial_selection(1)
                    .disabled_indices(vec![2, 4])
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "click 2", "click 5", "ok"]),
        },
        Demo {
            id: "multi",
            title: "Multi Selection Dialog",
            dialog: ok_cancel("Labels"),
            content: Content::MultiChoice(
                MultiChoiceArgs::new(labels)
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "click 0", "click 2", "click 0", "ok"]),
        },
        Demo {
            id: "multi-initial",
            title: "Multi Selection Dialog With Initial Selection",
            dialog: ok_cancel("Labels"),
            content: Content::MultiChoice(
                MultiChoiceArgs::new(labels)
                    .initial_selection(vec![1, 3])
                    .disabled_indices(vec![3])
                    .wait_for_positive_button(settings.wait_for_positive_button),
            ),
            script: script(&["show", "click 3", "click 0", "ok"]),
        },
    ]
}

fn date_time_demos(settings: &Settings) -> Vec<Demo> {
    let purple = Color::from_argb(PURPLE);
    let time_colors = TimePickerDefaults::colors()
        .inactive_background_color(Color::LIGHT_GRAY)
        .active_background_color(purple.with_alpha(0.1))
        .active_text_color(purple)
        .selector_color(purple);
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    let office_hours = NaiveTime::from_hms_opt(9, 35, 0).unwrap_or(NaiveTime::MIN)
        ..=NaiveTime::from_hms_opt(21, 13, 0).unwrap_or(NaiveTime::MIN);
    let time_args = TimePickerArgs::default()
        .initial_time(noon)
        .colors(time_colors)
        .wait_for_positive_button(settings.wait_for_positive_button);
    let date_args = DatePickerArgs::default()
        .today(settings.today)
        .year_range(settings.year_range.clone())
        .locale(settings.locale.clone())
        .first_day_of_week(settings.first_day_of_week)
        .wait_for_positive_button(settings.wait_for_positive_button);

    vec![
        Demo {
            id: "time",
            title: "Time Picker Dialog",
            dialog: ok_cancel("Time"),
            content: Content::Time(time_args.clone()),
            script: script(&["show", "click 9", "click 9", "ok"]),
        },
        Demo {
            id: "time-range",
            title: "Time Picker Dialog With Min/Max",
            dialog: ok_cancel("Time"),
            content: Content::Time(time_args.clone().time_range(office_hours.clone())),
            script: script(&["show", "click 10", "click 9", "click 6", "click 2", "am", "ok"]),
        },
        Demo {
            id: "time-24h",
            title: "Time Picker Dialog 24H",
            dialog: ok_cancel("Time"),
            content: Content::Time(time_args.clone().is_24_hour(true)),
            script: script(&["show", "click 18", "click 3", "ok"]),
        },
        Demo {
            id: "time-24h-range",
            title: "Time Picker Dialog 24H With Min/Max",
            dialog: ok_cancel("Time"),
            content: Content::Time(time_args.is_24_hour(true).time_range(office_hours)),
            script: script(&["show", "click 8", "click 10", "minute", "down", "ok"]),
        },
        Demo {
            id: "date",
            title: "Date Picker Dialog",
            dialog: ok_cancel("Date"),
            content: Content::Date(
                date_args
                    .clone()
                    .colors(DatePickerDefaults::colors().header_background_color(Color::RED)),
            ),
            script: script(&["show", "next", "day 15", "year 1999", "ok"]),
        },
        Demo {
            id: "date-restricted",
            title: "Date Picker Dialog With Date Restrictions",
            dialog: ok_cancel("Date"),
            content: Content::Date(date_args.clone().allowed_date_validator(is_weekday)),
            script: script(&["show", "day 6", "day 7", "day 8", "ok"]),
        },
        Demo {
            id: "month",
            title: "Month Picker Dialog",
            dialog: ok_cancel("Month"),
            content: Content::Month(date_args),
            script: script(&["show", "year 2030", "click 6", "ok"]),
        },
    ]
}

fn color_demos(settings: &Settings) -> Vec<Demo> {
    let buttons = |title: &str| {
        MaterialDialogArgs::default()
            .title(title)
            .positive_button("Select")
            .negative_button("Cancel")
    };
    let primary = ColorChooserArgs::new(ColorPalette::primary())
        .wait_for_positive_button(settings.wait_for_positive_button);
    let shaded = primary.clone().sub_colors(ColorPalette::primary_sub());

    vec![
        Demo {
            id: "color",
            title: "Color Picker Dialog",
            dialog: buttons("Select a Color"),
            content: Content::Color(primary),
            script: script(&["show", "click 3", "ok"]),
        },
        Demo {
            id: "color-sub",
            title: "Color Picker Dialog With Sub Colors",
            dialog: buttons("Select a Sub Color"),
            content: Content::Color(shaded.clone()),
            script: script(&["show", "click 0", "click 9", "back", "ok"]),
        },
        Demo {
            id: "color-initial",
            title: "Color Picker Dialog With Initial Selection",
            dialog: buttons("Select a Sub Color"),
            content: Content::Color(shaded.clone().initial_selection(5)),
            script: script(&["show", "ok"]),
        },
        Demo {
            id: "color-rgb",
            title: "Color Picker Dialog With RGB Selector",
            dialog: buttons("Custom RGB"),
            content: Content::Color(shaded.clone().argb_selector(ArgbSelector::WithoutAlpha)),
            script: script(&[
                "show", "custom", "red 255", "green 128", "blue 0", "alpha 10", "ok",
            ]),
        },
        Demo {
            id: "color-argb",
            title: "Color Picker Dialog With ARGB Selector",
            dialog: buttons("Custom ARGB"),
            content: Content::Color(shaded.argb_selector(ArgbSelector::WithAlpha)),
            script: script(&["show", "custom", "alpha 128", "blue 255", "presets", "ok"]),
        },
    ]
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One user interaction with a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show,
    Ok,
    Cancel,
    Close,
    Click(usize),
    Day(u32),
    Year(Option<i32>),
    Next,
    Prev,
    Type(String),
    Ime,
    Period(DayPeriod),
    Focus(TimeField),
    Up,
    Down,
    Back,
    Page(ColorPage),
    Channel(ArgbChannel, u8),
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let action = match command {
            "show" => Action::Show,
            "ok" => Action::Ok,
            "cancel" => Action::Cancel,
            "close" => Action::Close,
            "click" => Action::Click(parse_arg(command, rest, "an index")?),
            "day" => Action::Day(parse_arg(command, rest, "a day of month")?),
            "year" if rest.is_empty() => Action::Year(None),
            "year" => Action::Year(Some(parse_arg(command, rest, "a year")?)),
            "next" => Action::Next,
            "prev" => Action::Prev,
            "type" => Action::Type(rest.to_string()),
            "ime" => Action::Ime,
            "am" => Action::Period(DayPeriod::Am),
            "pm" => Action::Period(DayPeriod::Pm),
            "hour" => Action::Focus(TimeField::Hour),
            "minute" => Action::Focus(TimeField::Minute),
            "up" => Action::Up,
            "down" => Action::Down,
            "back" => Action::Back,
            "presets" => Action::Page(ColorPage::Presets),
            "custom" => Action::Page(ColorPage::Custom),
            "alpha" | "red" | "green" | "blue" => {
                let channel = match command {
                    "alpha" => ArgbChannel::Alpha,
                    "red" => ArgbChannel::Red,
                    "green" => ArgbChannel::Green,
                    _ => ArgbChannel::Blue,
                };
                Action::Channel(channel, parse_arg(command, rest, "a value from 0 to 255")?)
            }
            "" => bail!("empty command"),
            other => bail!("unknown command '{other}'"),
        };
        Ok(action)
    }
}

fn parse_arg<T: FromStr>(command: &str, rest: &str, what: &str) -> Result<T> {
    rest.parse()
        .map_err(|_| anyhow!("`{command}` expects {what}, got '{rest}'"))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Show => f.write_str("show"),
            Action::Ok => f.write_str("ok"),
            Action::Cancel => f.write_str("cancel"),
            Action::Close => f.write_str("close"),
            Action::Click(index) => write!(f, "click {index}"),
            Action::Day(day) => write!(f, "day {day}"),
            Action::Year(None) => f.write_str("year"),
            Action::Year(Some(year)) => write!(f, "year {year}"),
            Action::Next => f.write_str("next"),
            Action::Prev => f.write_str("prev"),
            Action::Type(text) => write!(f, "type {text}"),
            Action::Ime => f.write_str("ime"),
            Action::Period(DayPeriod::Am) => f.write_str("am"),
            Action::Period(DayPeriod::Pm) => f.write_str("pm"),
            Action::Focus(TimeField::Hour) => f.write_str("hour"),
            Action::Focus(TimeField::Minute) => f.write_str("minute"),
            Action::Up => f.write_str("up"),
            Action::Down => f.write_str("down"),
            Action::Back => f.write_str("back"),
            Action::Page(ColorPage::Presets) => f.write_str("presets"),
            Action::Page(ColorPage::Custom) => f.write_str("custom"),
            Action::Channel(channel, value) => write!(f, "{} {value}", channel_name(*channel)),
        }
    }
}

fn channel_name(channel: ArgbChannel) -> &'static str {
    match channel {
        ArgbChannel::Alpha => "alpha",
        ArgbChannel::Red => "red",
        ArgbChannel::Green => "green",
        ArgbChannel::Blue => "blue",
    }
}

/// Result of one composition pass.
pub enum Screen {
    Hidden,
    Message,
    List(ListView),
    SingleChoice(SingleChoiceView),
    MultiChoice(MultiChoiceView),
    Input(InputView),
    Time(TimePickerView),
    Date(DatePickerView),
    Color(ColorChooserView),
}

/// A demo dialog plus the values its callbacks delivered.
pub struct DemoSession {
    dialog: MaterialDialog,
    content: Content,
    events: Arc<Mutex<Vec<String>>>,
}

impl DemoSession {
    pub fn new(demo: &Demo) -> Self {
        Self {
            dialog: MaterialDialog::new(demo.dialog.clone()),
            content: demo.content.clone(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn dialog(&self) -> &MaterialDialog {
        &self.dialog
    }

    /// Drains the callback deliveries recorded so far.
    pub fn take_events(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock())
    }

    fn sink<T, F>(&self, describe: F) -> CallbackWith<T>
    where
        T: 'static,
        F: Fn(T) -> String + Send + Sync + 'static,
    {
        let events = Arc::clone(&self.events);
        CallbackWith::new(move |value: T| events.lock().push(describe(value)))
    }

    pub fn compose(&self) -> Screen {
        let content = self.content.clone();
        let screen = self.dialog.compose(|scope| match content {
            Content::Message => Screen::Message,
            Content::List(args) => Screen::List(list_items(
                scope,
                args,
                self.sink(|(index, label): (usize, String)| {
                    format!("clicked {index} ({label})")
                }),
            )),
            Content::SingleChoice(args) => Screen::SingleChoice(list_items_single_choice(
                scope,
                args,
                self.sink(|index: usize| format!("selected {index}")),
            )),
            Content::MultiChoice(args) => Screen::MultiChoice(list_items_multi_choice(
                scope,
                args,
                self.sink(|indices: Vec<usize>| format!("checked {indices:?}")),
            )),
            Content::Input(args) => Screen::Input(input(
                scope,
                args,
                self.sink(|text: String| format!("input {text:?}")),
            )),
            Content::Time(args) => Screen::Time(time_picker(
                scope,
                args,
                self.sink(|time: NaiveTime| format!("time {}", time.format("%H:%M"))),
            )),
            Content::Date(args) => Screen::Date(date_picker(
                scope,
                args,
                self.sink(|date: NaiveDate| format!("date {date}")),
            )),
            Content::Month(args) => Screen::Date(month_picker(
                scope,
                args,
                self.sink(|date: NaiveDate| format!("month {}", date.format("%Y-%m"))),
            )),
            Content::Color(args) => Screen::Color(color_chooser(
                scope,
                args,
                self.sink(|color: Color| format!("color #{:08X}", color.to_argb())),
            )),
        });
        screen.unwrap_or(Screen::Hidden)
    }

    /// Applies `action` to a fresh composition. Returns whether the dialog
    /// accepted it.
    pub fn apply(&self, action: &Action) -> Result<bool> {
        debug!(%action, "applying demo action");
        match action {
            Action::Show => {
                self.dialog.show();
                return Ok(true);
            }
            // Buttons act on what is on screen, so compose first.
            Action::Ok => {
                self.compose();
                return press(self.dialog.submit());
            }
            Action::Cancel => {
                self.compose();
                return press(self.dialog.dismiss());
            }
            Action::Close => {
                self.dialog.close_request();
                return Ok(true);
            }
            _ => {}
        }

        let screen = self.compose();
        let accepted = match (action, &screen) {
            (_, Screen::Hidden) => bail!("the dialog is hidden, use `show` first"),
            (Action::Click(index), Screen::List(view)) => view.click(*index),
            (Action::Click(index), Screen::SingleChoice(view)) => view.click(*index),
            (Action::Click(index), Screen::MultiChoice(view)) => view.click(*index),
            (Action::Click(index), Screen::Time(view)) => view.click_face(*index),
            (Action::Click(index), Screen::Date(view)) => match view.body() {
                DatePickerBody::Years(_) => view.click_year(*index),
                DatePickerBody::Months(_) => view.click_month(*index),
                DatePickerBody::Days(_) => view.click_day(*index),
            },
            (Action::Day(day), Screen::Date(view)) => click_day_of_month(view, *day)?,
            (Action::Year(year), Screen::Date(view)) => self.year(view, *year)?,
            (Action::Next, Screen::Date(view)) => view.next_month(),
            (Action::Prev, Screen::Date(view)) => view.previous_month(),
            (Action::Type(text), Screen::Input(view)) => view.type_text(text.clone()),
            (Action::Ime, Screen::Input(view)) => match view.ime_action() {
                Ok(submitted) => submitted,
                Err(DialogError::PositiveDisabled) => false,
                Err(err) => return Err(err.into()),
            },
            (Action::Period(period), Screen::Time(view)) => view.set_period(*period),
            (Action::Focus(field), Screen::Time(view)) => {
                view.focus(*field);
                true
            }
            (Action::Up, Screen::Time(view)) => view.increment(),
            (Action::Down, Screen::Time(view)) => view.decrement(),
            (Action::Click(index), Screen::Color(view)) => view.click(*index),
            (Action::Back, Screen::Color(view)) => view.back(),
            (Action::Page(page), Screen::Color(view)) => view.show_page(*page),
            (Action::Channel(channel, value), Screen::Color(view)) => {
                view.set_channel(*channel, *value)
            }
            (action, _) => bail!("`{action}` does not apply to this dialog"),
        };
        Ok(accepted)
    }

    fn year(&self, view: &DatePickerView, year: Option<i32>) -> Result<bool> {
        let Some(year) = year else {
            view.toggle_year_picker();
            return Ok(true);
        };
        if !view.is_year_picker_showing() {
            view.toggle_year_picker();
        }
        let Screen::Date(view) = self.compose() else {
            bail!("the date picker is gone");
        };
        let DatePickerBody::Years(grid) = view.body() else {
            bail!("the year grid is not showing");
        };
        let index = grid
            .cells()
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|cell| cell.value == year))
            .ok_or_else(|| anyhow!("{year} is outside the year range"))?;
        Ok(view.click_year(index))
    }
}

fn click_day_of_month(view: &DatePickerView, day: u32) -> Result<bool> {
    let DatePickerBody::Days(page) = view.body() else {
        bail!("the day grid is not showing");
    };
    let index = page
        .grid
        .cells()
        .iter()
        .position(|cell| cell.as_ref().is_some_and(|cell| cell.value.day() == day))
        .ok_or_else(|| anyhow!("{} has no day {day}", page.month_label))?;
    Ok(view.click_day(index))
}

fn press(result: Result<(), DialogError>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(DialogError::PositiveDisabled) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
