use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::{
    demos::{Action, Demo, DemoSession},
    output,
    render::render,
};

const HELP: &str = "\
commands:
  show | ok | cancel | close      dialog buttons
  click N                         click row or grid cell N
  day N | year [Y] | next | prev  date picker
  type TEXT | ime                 input field
  am | pm | hour | minute         time picker
  up | down                       step the active time field
  back | presets | custom         color chooser pages
  alpha|red|green|blue V          color channel, 0-255
  help | quit";

/// Reads commands from `input` until it ends or `quit` is entered, drawing
/// the dialog to `out` after every command.
pub fn run<R: BufRead, W: Write>(demo: &Demo, input: R, out: &mut W) -> Result<()> {
    let session = DemoSession::new(demo);
    writeln!(out, "{} (type `help` for commands)", demo.title)?;
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            _ => {}
        }
        let action: Action = match line.parse() {
            Ok(action) => action,
            Err(err) => {
                output::error(err.to_string());
                continue;
            }
        };
        match session.apply(&action) {
            Ok(true) => {}
            Ok(false) => writeln!(out, "refused: {action}")?,
            Err(err) => output::error(err.to_string()),
        }
        for event in session.take_events() {
            writeln!(out, "-> {event}")?;
        }
        write!(out, "{}", render(session.dialog(), &session.compose()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use super::*;
    use crate::{
        config::Settings,
        demos::{find_demo, sections},
    };

    #[test]
    fn reads_commands_until_quit() {
        let settings = Settings {
            locale: "en-US".to_string(),
            wait_for_positive_button: true,
            first_day_of_week: Weekday::Sun,
            today: NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            year_range: 1900..=2100,
        };
        let sections = sections(&settings);
        let demo = find_demo(&sections, "multi").expect("demo exists");
        let input = "show\nclick 1\nbogus\nclick 3\nok\nquit\nclick 0\n";
        let mut out = Vec::new();
        run(demo, input.as_bytes(), &mut out).expect("session runs");

        let out = String::from_utf8(out).expect("utf-8 output");
        assert!(out.starts_with("Multi Selection Dialog"));
        assert!(out.contains("  1. [x] Label 2\n"));
        assert!(out.contains("-> checked [1, 3]\n"));
        assert!(out.ends_with("(dialog hidden)\n"));
    }
}
