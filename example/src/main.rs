use std::{io, path::PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use material_dialogs_ui::logging::{DEFAULT_DIRECTIVES, init_tracing};

mod config;
mod demos;
mod interactive;
mod output;
mod render;

use config::{DEFAULT_CONFIG_FILE, Overrides, Settings};
use demos::{DemoSession, Section, find_demo, find_section, sections};

#[derive(Parser)]
#[command(name = "example")]
#[command(version, about = "Headless demo of the material dialog components", long_about = None)]
struct Cli {
    /// Demo settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Locale tag for month and weekday names (e.g. en-US, ru-RU)
    #[arg(long, global = true)]
    locale: Option<String>,
    /// Report selections only when the positive button is pressed
    #[arg(long, global = true)]
    wait_for_positive_button: Option<bool>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the demo sections and their dialogs
    List,
    /// Play the scripted interactions of a section
    Run {
        /// Section id (see `list`)
        section: String,
    },
    /// Drive one dialog with commands read from stdin
    Interactive {
        /// Dialog id (see `list`)
        dialog: String,
    },
}

fn main() -> Result<()> {
    init_tracing(DEFAULT_DIRECTIVES);
    let cli = Cli::parse();
    let settings = config::load_settings(
        &cli.config,
        Overrides {
            locale: cli.locale,
            wait_for_positive_button: cli.wait_for_positive_button,
        },
    )?;
    let sections = sections(&settings);

    match cli.command {
        Commands::List => list(&settings, &sections),
        Commands::Run { section } => {
            let Some(section) = find_section(&sections, &section) else {
                bail!("Unknown section '{section}', see `example list`");
            };
            play(section);
        }
        Commands::Interactive { dialog } => {
            let Some(demo) = find_demo(&sections, &dialog) else {
                bail!("Unknown dialog '{dialog}', see `example list`");
            };
            interactive::run(demo, io::stdin().lock(), &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

fn list(settings: &Settings, sections: &[Section]) {
    output::note(format!(
        "locale {}, today {}, wait for positive button: {}",
        settings.locale, settings.today, settings.wait_for_positive_button
    ));
    for section in sections {
        output::heading(format!("{} ({})", section.title, section.id));
        for demo in &section.demos {
            println!("  {:<18} {}", demo.id, demo.title);
        }
    }
}

fn play(section: &Section) {
    output::heading(section.title);
    for demo in &section.demos {
        output::status("Demo", demo.title);
        let session = DemoSession::new(demo);
        for action in &demo.script {
            match session.apply(action) {
                Ok(true) => output::status("Action", action.to_string()),
                Ok(false) => output::warn(format!("`{action}` was refused")),
                Err(err) => {
                    output::error(format!("`{action}` failed: {err}"));
                    continue;
                }
            }
            for event in session.take_events() {
                output::callback("Callback", event);
            }
            print!("{}", render::render(session.dialog(), &session.compose()));
        }
    }
}
