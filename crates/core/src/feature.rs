//! Feature records supplied by the product-management collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One feature to be rendered as a slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureRecord {
    pub id: String,
    pub title: String,

    /// Raw description HTML, possibly containing image tags.
    #[serde(alias = "description")]
    pub description_html: Option<String>,

    pub external_link: Option<String>,
    pub cross_reference_key: Option<String>,
    pub cross_reference_url: Option<String>,
    pub requirements_link: Option<String>,

    /// Group (initiative) the feature belongs to.
    pub group_name: Option<String>,

    pub status_id: Option<String>,
    pub owner_email: Option<String>,
    pub timeframe_start: Option<NaiveDate>,
    pub timeframe_end: Option<NaiveDate>,
}

impl FeatureRecord {
    /// Create a record with just an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Features sharing a group name, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub name: String,
    pub features: Vec<FeatureRecord>,
}

/// Group features by group name.
///
/// Groups appear in the order their first feature appears. A missing or
/// blank group name falls into `ungrouped`.
pub fn group_features(
    features: impl IntoIterator<Item = FeatureRecord>,
    ungrouped: &str,
) -> Vec<FeatureGroup> {
    let mut groups: Vec<FeatureGroup> = Vec::new();

    for feature in features {
        let name = feature
            .group_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(ungrouped)
            .to_string();

        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.features.push(feature),
            None => groups.push(FeatureGroup {
                name,
                features: vec![feature],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_group(id: &str, group: Option<&str>) -> FeatureRecord {
        FeatureRecord {
            group_name: group.map(str::to_string),
            ..FeatureRecord::new(id, format!("Feature {}", id))
        }
    }

    #[test]
    fn test_group_preserves_first_appearance_order() {
        let groups = group_features(
            vec![
                in_group("1", Some("Search")),
                in_group("2", Some("Sync")),
                in_group("3", Some("Search")),
                in_group("4", None),
                in_group("5", Some("  ")),
            ],
            "Uncategorized",
        );

        let shape: Vec<_> = groups
            .iter()
            .map(|g| {
                (
                    g.name.as_str(),
                    g.features.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                ("Search", vec!["1", "3"]),
                ("Sync", vec!["2"]),
                ("Uncategorized", vec!["4", "5"]),
            ]
        );
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": "f1",
            "title": "Faster search",
            "description": "<p>Hi</p>",
            "externalLink": "https://pb/f1",
            "crossReferenceKey": "ABC-1",
            "groupName": "Search",
            "timeframeStart": "2025-04-01",
            "timeframeEnd": "2025-06-30"
        }"#;
        let record: FeatureRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.description_html.as_deref(), Some("<p>Hi</p>"));
        assert_eq!(record.cross_reference_key.as_deref(), Some("ABC-1"));
        assert_eq!(record.cross_reference_url, None);
        assert_eq!(
            record.timeframe_end,
            NaiveDate::from_ymd_opt(2025, 6, 30)
        );
    }
}
