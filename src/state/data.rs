//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the museum API layer and the UI layer.

use serde::Deserialize;
use serde_json::Value;

/// Body of a collection search
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchBody {
    /// Matching object IDs. The museum sends `null` when nothing matches.
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<Value>>,
}

impl SearchBody {
    /// Matching IDs in string form; empty when the field is missing
    pub fn into_object_ids(self) -> Vec<String> {
        self.object_ids
            .unwrap_or_default()
            .iter()
            .filter_map(identifier_from_value)
            .collect()
    }
}

/// Body of an object detail request. Unknown objects come back as
/// `{"message": ..}`, which decodes with every field missing.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ObjectBody {
    /// Number in practice, string tolerated
    #[serde(rename = "objectID", default)]
    pub object_id: Option<Value>,
    #[serde(rename = "primaryImageSmall", default)]
    pub primary_image_small: Option<String>,
}

/// Represents a single displayable artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRecord {
    /// Museum object ID (e.g., "436535")
    pub object_id: String,
    /// URL of the small primary image
    pub thumbnail_url: String,
}

impl ArtworkRecord {
    /// Build a record from a decoded detail body.
    ///
    /// Returns None unless both `objectID` and `primaryImageSmall` are
    /// present and non-empty.
    pub fn from_detail(body: ObjectBody) -> Option<Self> {
        let object_id = body.object_id.as_ref().and_then(identifier_from_value)?;
        let thumbnail_url = body.primary_image_small.filter(|s| !s.is_empty())?;

        Some(Self {
            object_id,
            thumbnail_url,
        })
    }
}

/// Turn a JSON identifier (number or string) into its string form.
/// Zero, empty strings and anything else are not identifiers.
pub fn identifier_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_u64() != Some(0) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(body: Value) -> Option<ArtworkRecord> {
        ArtworkRecord::from_detail(serde_json::from_value(body).unwrap())
    }

    #[test]
    fn test_numeric_object_id() {
        let record = detail(json!({
            "objectID": 436535,
            "primaryImageSmall": "https://images.metmuseum.org/small/436535.jpg",
            "title": "Wheat Field with Cypresses"
        }))
        .unwrap();

        assert_eq!(record.object_id, "436535");
        assert_eq!(record.thumbnail_url, "https://images.metmuseum.org/small/436535.jpg");
    }

    #[test]
    fn test_string_object_id() {
        let record = detail(json!({ "objectID": "10", "primaryImageSmall": "http://x/10.jpg" }));
        assert_eq!(record.unwrap().object_id, "10");
    }

    #[test]
    fn test_missing_thumbnail_is_invalid() {
        assert!(detail(json!({ "objectID": 1 })).is_none());
        assert!(detail(json!({ "objectID": 1, "primaryImageSmall": "" })).is_none());
        assert!(detail(json!({ "objectID": 1, "primaryImageSmall": null })).is_none());
    }

    #[test]
    fn test_missing_identifier_is_invalid() {
        assert!(detail(json!({ "primaryImageSmall": "http://x/1.jpg" })).is_none());
        assert!(detail(json!({ "objectID": 0, "primaryImageSmall": "http://x/1.jpg" })).is_none());
        assert!(detail(json!({ "message": "Not a valid object" })).is_none());
    }

    #[test]
    fn test_search_body() {
        let body: SearchBody =
            serde_json::from_value(json!({ "total": 3, "objectIDs": [10, "20", 0] })).unwrap();
        assert_eq!(body.into_object_ids(), vec!["10".to_string(), "20".to_string()]);

        let body: SearchBody =
            serde_json::from_value(json!({ "total": 0, "objectIDs": null })).unwrap();
        assert!(body.into_object_ids().is_empty());

        let body: SearchBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.into_object_ids().is_empty());
    }
}
