use crate::data::persistence::Persistable;
use anyhow::Result;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// First day of the week for the month grid: "sunday" or "monday".
    pub week_start: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            week_start: "sunday".to_string(),
        }
    }
}

impl AppSettings {
    /// Parsed week start; anything other than "monday" means Sunday.
    pub fn week_start(&self) -> Weekday {
        if self.week_start.eq_ignore_ascii_case("monday") {
            Weekday::Mon
        } else {
            Weekday::Sun
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml, so other
/// sections can live in the same file without clobbering each other.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct SettingsWrapper {
    #[serde(default)]
    pub settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_week_start_is_sunday() {
        let settings = AppSettings::default();
        assert_eq!(settings.week_start, "sunday");
        assert_eq!(settings.week_start(), Weekday::Sun);
    }

    #[test]
    fn test_monday_week_start() {
        let settings = AppSettings {
            week_start: "Monday".to_string(),
        };
        assert_eq!(settings.week_start(), Weekday::Mon);
    }

    #[test]
    fn test_unknown_week_start_falls_back_to_sunday() {
        let settings = AppSettings {
            week_start: "saturn-day".to_string(),
        };
        assert_eq!(settings.week_start(), Weekday::Sun);
    }

    #[test]
    fn test_settings_wrapper_yaml_roundtrip() {
        let wrapper = SettingsWrapper {
            settings: AppSettings {
                week_start: "monday".to_string(),
            },
        };
        let yaml = serde_norway::to_string(&wrapper).unwrap();
        let parsed: SettingsWrapper = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings.week_start, "monday");
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let yaml = "other_section: []";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.week_start, "sunday");
    }
}
