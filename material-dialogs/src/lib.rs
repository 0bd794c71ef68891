//! Material dialog components: dialog state, date/month/year picker, time
//! picker, color chooser, list and input dialogs.
//!
//! # Components
//!
//! Every component is a function taking the [`dialog::DialogScope`] of the
//! dialog being composed, an args struct and a change callback. It remembers
//! its state in the dialog scope and returns a view describing what to draw
//! together with the click handlers.
//!
//! ```
//! use material_dialogs::{
//!     chrono::NaiveDate,
//!     date_picker::{DatePickerArgs, date_picker},
//!     dialog::{MaterialDialog, MaterialDialogArgs},
//! };
//!
//! let dialog = MaterialDialog::new(MaterialDialogArgs::default().positive_button("Ok"));
//! dialog.show();
//! let initial = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let view = dialog
//!     .compose(|scope| {
//!         date_picker(
//!             scope,
//!             DatePickerArgs::default().initial_date(initial),
//!             |date: NaiveDate| println!("picked {date}"),
//!         )
//!     })
//!     .unwrap();
//! assert_eq!(view.year_label(), "2024");
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod color_chooser;
pub mod date_picker;
pub mod dialog;
pub mod input;
pub mod list;
pub mod locale;
mod notify;
pub mod picker_grid;
pub mod time_picker;

pub use chrono;
pub use material_dialogs_ui;

pub use crate::notify::NotifyMode;
