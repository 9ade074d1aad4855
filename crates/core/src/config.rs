//! Deck configuration.
//!
//! Everything the pipeline needs to know beyond the feature records is
//! carried in a [`DeckConfig`] value handed to the entry points.

use crate::error::{Error, Result};
use crate::feature::FeatureRecord;
use crate::normalize::DEFAULT_EMPTY_DESCRIPTION;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Most images placed on one slide.
pub const MAX_IMAGES_PER_SLIDE: usize = 4;

/// Font applied to written runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub name: String,
    pub size_pt: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: "Avenir".to_string(),
            size_pt: 11.0,
        }
    }
}

/// An inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Timeframe {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `[start, end]` overlaps this window.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

/// Fixed strings written into link regions and placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub external_link: String,
    pub external_link_missing: String,
    pub cross_reference_missing: String,
    pub requirements: String,
    pub requirements_missing: String,
    pub empty_description: String,
    pub ungrouped: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            external_link: "View in Productboard".to_string(),
            external_link_missing: "Missing link".to_string(),
            cross_reference_missing: "No Jira Link".to_string(),
            requirements: "Link to requirements".to_string(),
            requirements_missing: "Missing requirements".to_string(),
            empty_description: DEFAULT_EMPTY_DESCRIPTION.to_string(),
            ungrouped: "Uncategorized".to_string(),
        }
    }
}

/// Configuration for one deck build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckConfig {
    /// Keep only features owned by this email.
    pub owner_email: Option<String>,

    /// Keep only features whose own timeframe overlaps this one.
    pub timeframe: Option<Timeframe>,

    /// When non-empty, keep only features with one of these statuses.
    pub included_statuses: Vec<String>,

    /// Drop features with one of these statuses.
    pub excluded_statuses: Vec<String>,

    /// Font for description text.
    pub font: FontSpec,

    /// Font for the link and label regions.
    pub link_font: FontSpec,

    /// Images placed per feature slide (1 to 4).
    pub max_images: usize,

    /// When non-empty, image URLs on other hosts are skipped.
    pub image_hosts: Vec<String>,

    pub labels: Labels,

    /// Put features under a cover slide per group. When off, the deck is
    /// a flat run of feature slides in input order.
    pub group_by_initiative: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            owner_email: None,
            timeframe: None,
            included_statuses: Vec::new(),
            excluded_statuses: Vec::new(),
            font: FontSpec::default(),
            link_font: FontSpec::default(),
            max_images: 1,
            image_hosts: Vec::new(),
            labels: Labels::default(),
            group_by_initiative: true,
        }
    }
}

impl DeckConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for inconsistent values.
    pub fn validate(&self) -> Result<()> {
        if let Some(tf) = &self.timeframe {
            if tf.start > tf.end {
                return Err(Error::InvalidConfig(format!(
                    "timeframe starts after it ends ({} > {})",
                    tf.start, tf.end
                )));
            }
        }

        for (what, font) in [("font", &self.font), ("linkFont", &self.link_font)] {
            if font.size_pt <= 0.0 || !font.size_pt.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "{} size must be positive, got {}",
                    what, font.size_pt
                )));
            }
        }

        Ok(())
    }

    /// Number of images to place per slide, clamped to the supported range.
    pub fn images_per_slide(&self) -> usize {
        self.max_images.clamp(1, MAX_IMAGES_PER_SLIDE)
    }

    /// Check whether a feature passes the owner, timeframe, and status filters.
    pub fn accepts(&self, feature: &FeatureRecord) -> bool {
        if let Some(owner) = &self.owner_email {
            if feature.owner_email.as_deref() != Some(owner.as_str()) {
                log::debug!("Feature {} rejected: owner mismatch", feature.id);
                return false;
            }
        }

        if let Some(tf) = &self.timeframe {
            match (feature.timeframe_start, feature.timeframe_end) {
                (Some(start), Some(end)) if tf.overlaps(start, end) => {}
                (Some(_), Some(_)) => {
                    log::debug!("Feature {} rejected: outside timeframe", feature.id);
                    return false;
                }
                _ => {
                    log::debug!("Feature {} rejected: no timeframe", feature.id);
                    return false;
                }
            }
        }

        let status = feature.status_id.as_deref();
        if !self.included_statuses.is_empty()
            && !status.is_some_and(|s| self.included_statuses.iter().any(|i| i == s))
        {
            log::debug!("Feature {} rejected: status not included", feature.id);
            return false;
        }
        if status.is_some_and(|s| self.excluded_statuses.iter().any(|e| e == s)) {
            log::debug!("Feature {} rejected: status excluded", feature.id);
            return false;
        }

        true
    }

    /// Check whether an image URL is on an allowed host.
    ///
    /// Always true when no hosts are configured. URLs that do not parse, or
    /// have no host, are rejected once a host list is set.
    pub fn allows_image_url(&self, image_url: &str) -> bool {
        if self.image_hosts.is_empty() {
            return true;
        }

        url::Url::parse(image_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| {
                self.image_hosts
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(&host))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(start: NaiveDate, end: NaiveDate) -> FeatureRecord {
        FeatureRecord {
            timeframe_start: Some(start),
            timeframe_end: Some(end),
            ..FeatureRecord::new("f", "Feature")
        }
    }

    #[test]
    fn test_default_accepts_everything() {
        let config = DeckConfig::default();
        assert!(config.accepts(&FeatureRecord::new("f", "Feature")));
        assert_eq!(config.images_per_slide(), 1);
        assert_eq!(config.font.name, "Avenir");
        assert_eq!(config.font.size_pt, 11.0);
    }

    #[test]
    fn test_timeframe_overlap() {
        let config = DeckConfig {
            timeframe: Some(Timeframe::new(date(2025, 4, 1), date(2025, 6, 30))),
            ..DeckConfig::default()
        };

        assert!(config.accepts(&dated(date(2025, 3, 1), date(2025, 4, 1))));
        assert!(config.accepts(&dated(date(2025, 6, 30), date(2025, 9, 1))));
        assert!(config.accepts(&dated(date(2025, 1, 1), date(2025, 12, 31))));
        assert!(!config.accepts(&dated(date(2025, 7, 1), date(2025, 9, 1))));
        assert!(!config.accepts(&dated(date(2024, 1, 1), date(2025, 3, 31))));
        assert!(!config.accepts(&FeatureRecord::new("f", "no dates")));
    }

    #[test]
    fn test_owner_filter() {
        let config = DeckConfig {
            owner_email: Some("pm@example.com".to_string()),
            ..DeckConfig::default()
        };
        let mut feature = FeatureRecord::new("f", "Feature");
        assert!(!config.accepts(&feature));

        feature.owner_email = Some("pm@example.com".to_string());
        assert!(config.accepts(&feature));

        feature.owner_email = Some("other@example.com".to_string());
        assert!(!config.accepts(&feature));
    }

    #[test]
    fn test_status_filters() {
        let config = DeckConfig {
            included_statuses: vec!["planned".to_string(), "released".to_string()],
            excluded_statuses: vec!["candidate".to_string()],
            ..DeckConfig::default()
        };
        let with_status = |s: Option<&str>| FeatureRecord {
            status_id: s.map(str::to_string),
            ..FeatureRecord::new("f", "Feature")
        };

        assert!(config.accepts(&with_status(Some("planned"))));
        assert!(!config.accepts(&with_status(Some("candidate"))));
        assert!(!config.accepts(&with_status(Some("idea"))));
        assert!(!config.accepts(&with_status(None)));

        let exclude_only = DeckConfig {
            excluded_statuses: vec!["candidate".to_string()],
            ..DeckConfig::default()
        };
        assert!(exclude_only.accepts(&with_status(None)));
        assert!(exclude_only.accepts(&with_status(Some("idea"))));
        assert!(!exclude_only.accepts(&with_status(Some("candidate"))));
    }

    #[test]
    fn test_image_hosts() {
        let open = DeckConfig::default();
        assert!(open.allows_image_url("not even a url"));

        let restricted = DeckConfig {
            image_hosts: vec!["pb-files.s3.amazonaws.com".to_string()],
            ..DeckConfig::default()
        };
        assert!(restricted.allows_image_url("https://pb-files.s3.amazonaws.com/a/b.png"));
        assert!(restricted.allows_image_url("https://PB-FILES.s3.amazonaws.com/a.png"));
        assert!(!restricted.allows_image_url("https://example.com/b.png"));
        assert!(!restricted.allows_image_url("relative/b.png"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DeckConfig::from_json_str(
            r#"{ "ownerEmail": "pm@example.com", "maxImages": 9,
                 "timeframe": { "start": "2025-04-01", "end": "2025-06-30" },
                 "labels": { "requirementsMissing": "No PRD" } }"#,
        )
        .unwrap();

        assert_eq!(config.owner_email.as_deref(), Some("pm@example.com"));
        assert_eq!(config.images_per_slide(), MAX_IMAGES_PER_SLIDE);
        assert_eq!(config.labels.requirements_missing, "No PRD");
        assert_eq!(config.labels.requirements, "Link to requirements");
        assert_eq!(config.link_font, FontSpec::default());
        assert!(config.group_by_initiative);

        let flat = DeckConfig::from_json_str(r#"{ "groupByInitiative": false }"#).unwrap();
        assert!(!flat.group_by_initiative);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let inverted = DeckConfig {
            timeframe: Some(Timeframe::new(date(2025, 6, 30), date(2025, 4, 1))),
            ..DeckConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(Error::InvalidConfig(_))));

        let mut zero_font = DeckConfig::default();
        zero_font.font.size_pt = 0.0;
        assert!(zero_font.validate().is_err());

        assert!(DeckConfig::from_json_str("{ not json").is_err());
    }
}
