//! Plain-text rendering of a composed dialog.
//!
//! Grid cells are drawn as `[x]` when selected, `(x)` when disabled and `*x`
//! when they mark today. Each grid row starts with the index of its first
//! cell so `click N` can be aimed.
use std::fmt::Write;

use material_dialogs::{
    color_chooser::{ColorChooserBody, ColorChooserView, ColorPage},
    date_picker::{DatePickerBody, DatePickerView},
    dialog::MaterialDialog,
    input::InputView,
    list::ListItem,
    picker_grid::{GridCell, PickerGrid},
    time_picker::{DayPeriod, TimeField, TimePickerView},
};

use crate::demos::Screen;

pub fn render(dialog: &MaterialDialog, screen: &Screen) -> String {
    let mut out = String::new();
    if matches!(screen, Screen::Hidden) {
        out.push_str("(dialog hidden)\n");
        return out;
    }
    if let Some(title) = dialog.title() {
        let _ = writeln!(out, "== {title} ==");
    }
    if let Some(message) = dialog.message() {
        let _ = writeln!(out, "{message}");
    }
    match screen {
        Screen::Hidden | Screen::Message => {}
        Screen::List(view) => render_rows(&mut out, view.items(), |_| ""),
        Screen::SingleChoice(view) => render_rows(&mut out, view.items(), radio),
        Screen::MultiChoice(view) => render_rows(&mut out, view.items(), checkbox),
        Screen::Input(view) => render_input(&mut out, view),
        Screen::Time(view) => render_time(&mut out, view),
        Screen::Date(view) => render_date(&mut out, view),
        Screen::Color(view) => render_color(&mut out, view),
    }
    render_buttons(&mut out, dialog);
    out
}

fn render_rows(
    out: &mut String,
    items: &[ListItem],
    marker: impl Fn(&ListItem) -> &'static str,
) {
    for item in items {
        let disabled = if item.enabled { "" } else { " (disabled)" };
        let _ = writeln!(
            out,
            "{:>3}. {}{}{}",
            item.index,
            marker(item),
            item.label,
            disabled
        );
    }
}

fn radio(item: &ListItem) -> &'static str {
    if item.selected { "(*) " } else { "( ) " }
}

fn checkbox(item: &ListItem) -> &'static str {
    if item.selected { "[x] " } else { "[ ] " }
}

fn render_input(out: &mut String, view: &InputView) {
    let text = if view.text().is_empty() {
        format!("<{}>", view.placeholder())
    } else {
        view.text().to_string()
    };
    let _ = writeln!(out, "{}: {text}", view.label());
    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {error}");
    }
}

fn render_time(out: &mut String, view: &TimePickerView) {
    let (hour, minute) = match view.current_field() {
        TimeField::Hour => (
            format!("[{}]", view.hour_label()),
            view.minute_label().to_string(),
        ),
        TimeField::Minute => (
            view.hour_label().to_string(),
            format!("[{}]", view.minute_label()),
        ),
    };
    let period = match view.period() {
        Some(DayPeriod::Am) => " AM",
        Some(DayPeriod::Pm) => " PM",
        None => "",
    };
    let _ = writeln!(out, "{}  {hour}:{minute}{period}", view.title());
    render_grid(out, view.face(), |_| false);
}

fn render_date(out: &mut String, view: &DatePickerView) {
    let _ = writeln!(out, "{}", view.title());
    let year = if view.is_year_picker_showing() { "^" } else { "v" };
    let _ = writeln!(out, "{}  {} {year}", view.headline(), view.year_label());
    match view.body() {
        DatePickerBody::Years(grid) => render_grid(out, grid, |_| false),
        DatePickerBody::Months(grid) => render_grid(out, grid, |_| false),
        DatePickerBody::Days(page) => {
            let prev = if page.can_navigate_prev { "<" } else { " " };
            let next = if page.can_navigate_next { ">" } else { " " };
            let _ = writeln!(out, "{prev} {} {next}", page.month_label);
            let width = cell_width(&page.grid);
            let labels: Vec<String> = page
                .weekday_labels
                .iter()
                .map(|label| format!(" {label:^width$} "))
                .collect();
            let _ = writeln!(out, "     {}", labels.join(""));
            render_grid(out, &page.grid, |cell| cell.is_today);
        }
    }
}

fn render_color(out: &mut String, view: &ColorChooserView) {
    if view.has_custom_page() {
        let tabs = match view.page() {
            ColorPage::Presets => "[Presets]  Custom ",
            ColorPage::Custom => " Presets  [Custom]",
        };
        let _ = writeln!(out, "{tabs}");
    }
    match view.body() {
        ColorChooserBody::Palette(grid) => render_grid(out, grid, |_| false),
        ColorChooserBody::Shades { grid, .. } => {
            let _ = writeln!(out, "< back");
            render_grid(out, grid, |_| false);
        }
        ColorChooserBody::Channels {
            alpha,
            red,
            green,
            blue,
        } => {
            if let Some(alpha) = alpha {
                let _ = writeln!(out, "alpha {alpha:>3}");
            }
            let _ = writeln!(out, "red   {red:>3}\ngreen {green:>3}\nblue  {blue:>3}");
        }
    }
    if let Some(color) = view.selected() {
        let _ = writeln!(out, "selected #{:08X}", color.to_argb());
    }
}

fn cell_width<V>(grid: &PickerGrid<V>) -> usize {
    grid.cells()
        .iter()
        .flatten()
        .map(|cell| cell.label.chars().count())
        .max()
        .unwrap_or(1)
}

fn render_grid<V>(
    out: &mut String,
    grid: &PickerGrid<V>,
    is_today: impl Fn(&GridCell<V>) -> bool,
) {
    let width = cell_width(grid);
    for row in 0..grid.rows() {
        let _ = write!(out, "{:>3}: ", row * grid.columns());
        for cell in grid.row(row) {
            let _ = write!(out, "{}", format_cell(cell.as_ref(), width, &is_today));
        }
        out.push('\n');
    }
}

fn format_cell<V>(
    cell: Option<&GridCell<V>>,
    width: usize,
    is_today: impl Fn(&GridCell<V>) -> bool,
) -> String {
    let Some(cell) = cell else {
        return " ".repeat(width + 2);
    };
    let (open, close) = if cell.selected {
        ('[', ']')
    } else if !cell.enabled {
        ('(', ')')
    } else if is_today(cell) {
        ('*', ' ')
    } else {
        (' ', ' ')
    };
    format!("{open}{:>width$}{close}", cell.label)
}

fn render_buttons(out: &mut String, dialog: &MaterialDialog) {
    let mut buttons = Vec::new();
    if let Some(negative) = dialog.negative_button() {
        buttons.push(format!("[{negative}]"));
    }
    if let Some(positive) = dialog.positive_button() {
        if dialog.is_positive_enabled() {
            buttons.push(format!("[{positive}]"));
        } else {
            buttons.push(format!("({positive})"));
        }
    }
    if !buttons.is_empty() {
        let _ = writeln!(out, "{}", buttons.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use super::*;
    use crate::{
        config::Settings,
        demos::{Action, DemoSession, find_demo, sections},
    };

    fn settings() -> Settings {
        Settings {
            locale: "en-US".to_string(),
            wait_for_positive_button: true,
            first_day_of_week: Weekday::Mon,
            today: NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            year_range: 1900..=2100,
        }
    }

    fn session(id: &str) -> DemoSession {
        let sections = sections(&settings());
        DemoSession::new(find_demo(&sections, id).expect("demo exists"))
    }

    #[test]
    fn hidden_dialog_renders_placeholder() {
        let session = session("basic");
        assert_eq!(render(session.dialog(), &session.compose()), "(dialog hidden)\n");
    }

    #[test]
    fn single_choice_marks_selection_and_disabled_button() {
        let session = session("single-disabled");
        session.apply(&Action::Show).expect("show");
        let text = render(session.dialog(), &session.compose());
        assert!(text.starts_with("== Phone Ringtone ==\n"));
        assert!(text.contains("  1. (*) Callisto\n"));
        assert!(text.contains("  2. ( ) Ganymede (disabled)\n"));
        assert!(text.ends_with("[Cancel] [Ok]\n"));

        let session = self::session("single");
        session.apply(&Action::Show).expect("show");
        let text = render(session.dialog(), &session.compose());
        assert!(text.ends_with("[Cancel] (Ok)\n"));
    }

    #[test]
    fn date_picker_marks_selected_day() {
        let session = session("date");
        session.apply(&Action::Show).expect("show");
        let text = render(session.dialog(), &session.compose());
        assert!(text.contains("Fri, Mar 15  2024 v\n"));
        assert!(text.contains("< March 2024 >\n"));
        assert!(text.contains("[15]"));
        assert!(text.contains(" Mon "));
    }

    #[test]
    fn color_chooser_draws_palette_and_channels() {
        let session = session("color-rgb");
        session.apply(&Action::Show).expect("show");
        let text = render(session.dialog(), &session.compose());
        assert!(text.starts_with("== Custom RGB ==\n[Presets]  Custom \n"));
        assert!(text.contains("  0: [F44336] E91E63  9C27B0  673AB7 \n"));
        assert!(text.ends_with("selected #FFF44336\n[Cancel] [Select]\n"));

        session.apply(&"custom".parse().expect("valid command")).expect("custom");
        let text = render(session.dialog(), &session.compose());
        assert!(text.contains(" Presets  [Custom]\nred   244\ngreen  67\nblue   54\n"));
        assert!(!text.contains("alpha"));
    }

    #[test]
    fn email_input_shows_error_until_valid() {
        let session = session("email");
        session.apply(&Action::Show).expect("show");
        let text = render(session.dialog(), &session.compose());
        assert!(text.contains("Email: <hello@example.com>\n! Invalid email\n"));
        session
            .apply(&"type jon@example.com".parse().expect("valid command"))
            .expect("type");
        let text = render(session.dialog(), &session.compose());
        assert!(text.contains("Email: jon@example.com\n[Cancel] [Ok]\n"));
    }
}
