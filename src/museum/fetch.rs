//! Search resolution and batched detail fetching
//!
//! Both functions are generic over `MuseumApi` so the app can run them
//! against the real collection and the tests against an in-memory fake.

use futures::future::try_join_all;
use tracing::{debug, info};

use super::client::{MuseumApi, MuseumError};
use crate::state::data::ArtworkRecord;

/// Resolve a query into the IDs of matching objects that have images.
///
/// A body without `objectIDs` (the museum sends `null` when nothing
/// matches) resolves to an empty list.
pub async fn search_object_ids<A>(api: &A, query: &str) -> Result<Vec<String>, MuseumError>
where
    A: MuseumApi + ?Sized,
{
    let ids = api.search(query).await?.into_object_ids();
    info!("🔍 Search {:?}: {} objects", query, ids.len());
    Ok(ids)
}

/// Fetch detail records for `ids` in parallel.
///
/// Keeps input order and drops records missing an ID or a thumbnail.
/// A single failed request fails the whole batch.
pub async fn fetch_artworks<A>(api: &A, ids: &[String]) -> Result<Vec<ArtworkRecord>, MuseumError>
where
    A: MuseumApi + ?Sized,
{
    let bodies = try_join_all(ids.iter().map(|id| api.object(id))).await?;

    let records: Vec<ArtworkRecord> = bodies
        .into_iter()
        .filter_map(|body| {
            let record = ArtworkRecord::from_detail(body);
            if record.is_none() {
                debug!("Skipping incomplete object record");
            }
            record
        })
        .collect();

    info!("🖼️ Fetched {} artworks ({} requested)", records.len(), ids.len());
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::data::{ObjectBody, SearchBody};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory museum that records every call
    #[derive(Default)]
    pub(crate) struct FakeMuseum {
        pub searches: Mutex<Vec<String>>,
        pub object_requests: Mutex<Vec<String>>,
        pub search_body: Value,
        pub objects: HashMap<String, Value>,
    }

    #[async_trait]
    impl MuseumApi for FakeMuseum {
        async fn search(&self, query: &str) -> Result<SearchBody, MuseumError> {
            self.searches.lock().unwrap().push(query.to_string());
            if self.search_body.is_null() {
                return Ok(SearchBody::default());
            }
            Ok(serde_json::from_value(self.search_body.clone())?)
        }

        async fn object(&self, id: &str) -> Result<ObjectBody, MuseumError> {
            self.object_requests.lock().unwrap().push(id.to_string());
            match self.objects.get(id) {
                Some(body) => Ok(serde_json::from_value(body.clone())?),
                // Stands in for a body that is not JSON at all
                None => Err(serde_json::from_str::<Value>("<html>").unwrap_err().into()),
            }
        }

        async fn image_bytes(&self, _url: &str) -> Result<Vec<u8>, MuseumError> {
            Ok(Vec::new())
        }
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_search_passes_query_through() {
        let museum = FakeMuseum {
            search_body: json!({ "total": 2, "objectIDs": [10, 20] }),
            ..Default::default()
        };

        let ids = search_object_ids(&museum, "cats").await.unwrap();

        assert_eq!(ids, strings(&["10", "20"]));
        assert_eq!(*museum.searches.lock().unwrap(), strings(&["cats"]));
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let museum = FakeMuseum {
            search_body: json!({ "total": 0, "objectIDs": null }),
            ..Default::default()
        };
        assert!(search_object_ids(&museum, "zzzz").await.unwrap().is_empty());

        let museum = FakeMuseum {
            search_body: json!({}),
            ..Default::default()
        };
        assert!(search_object_ids(&museum, "zzzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_keeps_only_complete_records() {
        let mut objects = HashMap::new();
        objects.insert("1".to_string(), json!({ "objectID": 1, "primaryImageSmall": "http://img/1.jpg" }));
        objects.insert("2".to_string(), json!({ "objectID": 2, "primaryImageSmall": "" }));
        objects.insert("3".to_string(), json!({ "objectID": 3, "primaryImageSmall": "http://img/3.jpg" }));
        let museum = FakeMuseum {
            objects,
            ..Default::default()
        };

        let records = fetch_artworks(&museum, &strings(&["1", "2", "3"])).await.unwrap();

        let mut requested = museum.object_requests.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, strings(&["1", "2", "3"]));

        let ids: Vec<&str> = records.iter().map(|r| r.object_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_batch() {
        let mut objects = HashMap::new();
        objects.insert("1".to_string(), json!({ "objectID": 1, "primaryImageSmall": "http://img/1.jpg" }));
        let museum = FakeMuseum {
            objects,
            ..Default::default()
        };

        let result = fetch_artworks(&museum, &strings(&["1", "missing"])).await;
        assert!(matches!(result, Err(MuseumError::Decode(_))));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let museum = FakeMuseum::default();
        assert!(fetch_artworks(&museum, &[]).await.unwrap().is_empty());
        assert!(museum.object_requests.lock().unwrap().is_empty());
    }
}
