use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::filter_spec::FilterSpec;
use crate::record::{Dataset, Sentiment};
use crate::{ConfigError, CoreError};

/// A partial filter selection, loaded from YAML or assembled from CLI flags.
///
/// Every field is optional; unset fields fall back to the permissive default
/// for the dataset being filtered (see [`FilterSpec::covering`]). To select a
/// single day, set `start_date` and `end_date` to the same date.
///
/// ```yaml
/// start_date: 2024-01-01
/// end_date: 2024-01-31
/// platforms: [Instagram, TikTok]
/// sentiments: [positive, neutral]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterPreset {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub platforms: Option<Vec<String>>,
    pub sentiments: Option<Vec<Sentiment>>,
    pub media_types: Option<Vec<String>>,
}

impl FilterPreset {
    /// Load and validate a filter preset from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PresetIo {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate a filter preset from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text cannot be parsed or fails validation.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let preset: FilterPreset =
            serde_yaml::from_str(content).map_err(ConfigError::PresetParse)?;
        preset.validate()?;
        Ok(preset)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ConfigError::Validation(format!(
                    "start_date {start} is after end_date {end}"
                )));
            }
        }

        for (name, values) in [
            ("platforms", self.platforms.as_deref()),
            ("media_types", self.media_types.as_deref()),
        ] {
            if values.is_some_and(|v| v.iter().any(|s| s.trim().is_empty())) {
                return Err(ConfigError::Validation(format!(
                    "{name} must not contain blank entries"
                )));
            }
        }

        Ok(())
    }

    /// Returns a preset where every field set in `overrides` replaces the
    /// corresponding field of `self`.
    #[must_use]
    pub fn overlay(self, overrides: FilterPreset) -> Self {
        Self {
            start_date: overrides.start_date.or(self.start_date),
            end_date: overrides.end_date.or(self.end_date),
            platforms: overrides.platforms.or(self.platforms),
            sentiments: overrides.sentiments.or(self.sentiments),
            media_types: overrides.media_types.or(self.media_types),
        }
    }

    /// Resolves this preset against `dataset` into a concrete [`FilterSpec`].
    ///
    /// Returns `Ok(None)` when the dataset is empty, since there is no date
    /// range to default to and nothing to filter.
    ///
    /// An unset bound defaults to the dataset's first or last day, clamped so
    /// it never crosses the bound that was set. A lone `start_date` after the
    /// last day (or a lone `end_date` before the first day) therefore yields a
    /// single-day window that matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDateRange`] if both `start_date` and
    /// `end_date` are set and the start is after the end.
    pub fn resolve(&self, dataset: &Dataset) -> Result<Option<FilterSpec>, CoreError> {
        let Some(base) = FilterSpec::covering(dataset) else {
            return Ok(None);
        };

        let platforms: BTreeSet<String> = match &self.platforms {
            Some(p) => p.iter().cloned().collect(),
            None => base.allowed_platforms().clone(),
        };
        let sentiments: BTreeSet<Sentiment> = match &self.sentiments {
            Some(s) => s.iter().copied().collect(),
            None => base.allowed_sentiments().clone(),
        };
        let media_types: BTreeSet<String> = match &self.media_types {
            Some(m) => m.iter().cloned().collect(),
            None => base.allowed_media_types().clone(),
        };

        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, base.end_date().max(start)),
            (None, Some(end)) => (base.start_date().min(end), end),
            (None, None) => (base.start_date(), base.end_date()),
        };

        FilterSpec::new(start, end, platforms, sentiments, media_types).map(Some)
    }
}

#[cfg(test)]
#[path = "preset_test.rs"]
mod tests;
