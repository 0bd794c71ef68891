use std::{fs, ops::RangeInclusive, path::Path};

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, Weekday};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "material-dialogs-demo.toml";

/// Contents of `material-dialogs-demo.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct DemoToml {
    pub locale: Option<String>,
    pub wait_for_positive_button: Option<bool>,
    pub first_day_of_week: Option<String>,
    pub today: Option<String>,
    pub year_range: Option<[i32; 2]>,
}

/// Resolved demo settings after applying command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub locale: String,
    pub wait_for_positive_button: bool,
    pub first_day_of_week: Weekday,
    pub today: NaiveDate,
    pub year_range: RangeInclusive<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            wait_for_positive_button: true,
            first_day_of_week: Weekday::Mon,
            today: Local::now().date_naive(),
            year_range: 1900..=2100,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub locale: Option<String>,
    pub wait_for_positive_button: Option<bool>,
}

pub fn load_demo_toml(path: &Path) -> Result<DemoToml> {
    if !path.exists() {
        return Ok(DemoToml::default());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve(file: DemoToml, overrides: Overrides) -> Result<Settings> {
    let defaults = Settings::default();
    let first_day_of_week = match file.first_day_of_week.as_deref() {
        Some(day) => day
            .parse::<Weekday>()
            .map_err(|_| anyhow!("Unknown first-day-of-week '{day}'"))?,
        None => defaults.first_day_of_week,
    };
    let today = match file.today.as_deref() {
        Some(today) => today
            .parse::<NaiveDate>()
            .with_context(|| format!("Invalid today '{today}', expected YYYY-MM-DD"))?,
        None => defaults.today,
    };
    let year_range = file
        .year_range
        .map(|[start, end]| start..=end)
        .unwrap_or(defaults.year_range);

    Ok(Settings {
        locale: overrides
            .locale
            .or(file.locale)
            .unwrap_or(defaults.locale),
        wait_for_positive_button: overrides
            .wait_for_positive_button
            .or(file.wait_for_positive_button)
            .unwrap_or(defaults.wait_for_positive_button),
        first_day_of_week,
        today,
        year_range,
    })
}

pub fn load_settings(path: &Path, overrides: Overrides) -> Result<Settings> {
    resolve(load_demo_toml(path)?, overrides)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = load_demo_toml(&dir.path().join(DEFAULT_CONFIG_FILE)).expect("defaults");
        assert_eq!(file, DemoToml::default());
    }

    #[test]
    fn file_values_and_overrides_merge() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
locale = "ru-RU"
wait-for-positive-button = false
first-day-of-week = "sun"
today = "2024-03-15"
year-range = [2000, 2030]
"#
        )
        .expect("write config");

        let settings = load_settings(file.path(), Overrides::default()).expect("valid config");
        assert_eq!(settings.locale, "ru-RU");
        assert!(!settings.wait_for_positive_button);
        assert_eq!(settings.first_day_of_week, Weekday::Sun);
        assert_eq!(settings.today, NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"));
        assert_eq!(settings.year_range, 2000..=2030);

        let overridden = load_settings(
            file.path(),
            Overrides {
                locale: Some("en-GB".to_string()),
                wait_for_positive_button: Some(true),
            },
        )
        .expect("valid config");
        assert_eq!(overridden.locale, "en-GB");
        assert!(overridden.wait_for_positive_button);
    }

    #[test]
    fn invalid_values_are_reported() {
        let file = DemoToml {
            first_day_of_week: Some("someday".to_string()),
            ..DemoToml::default()
        };
        let err = resolve(file, Overrides::default()).expect_err("bad weekday");
        assert!(err.to_string().contains("someday"));

        let file = DemoToml {
            today: Some("15/03/2024".to_string()),
            ..DemoToml::default()
        };
        assert!(resolve(file, Overrides::default()).is_err());
    }
}
