//! REST client for the hosted record store.
//!
//! Speaks the PostgREST-style interface: `GET/POST /rest/v1/{table}` plus
//! `PATCH`/`DELETE` with an `id=eq.{id}` filter. Inserts and updates ask for
//! `return=representation` so the created/updated row comes back in the same
//! round trip.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use edvise_core::config::BackendConfig;
use edvise_core::{College, CollegeDraft, Error, Logo, LogoDraft, Result};

use crate::traits::RecordStore;

const SERVICE: &str = "record store";

/// Client for the `colleges` and `logos` tables.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    /// Create a client from backend settings.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await?;
        Self::rows_from(response).await
    }

    async fn insert<T: DeserializeOwned, B: Serialize>(&self, table: &str, body: &B) -> Result<T> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            // The store accepts a batch; we always submit a batch of one.
            .json(&[body])
            .send()
            .await?;
        Self::single_row_from(response).await
    }

    async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        Self::single_row_from(response).await
    }

    async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure_from(response).await)
        }
    }

    async fn rows_from<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }
        Ok(response.json().await?)
    }

    async fn single_row_from<T: DeserializeOwned>(response: Response) -> Result<T> {
        let rows: Vec<T> = Self::rows_from(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::unexpected("store returned no rows for a mutation"))
    }

    /// Map a non-2xx response to a remote error, preferring the store's own
    /// `message` field when the body carries one.
    async fn failure_from(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status_label(status)
                } else {
                    body
                }
            });
        Error::remote(SERVICE, message)
    }
}

fn status_label(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[async_trait::async_trait]
impl RecordStore for StoreClient {
    async fn list_colleges(&self) -> Result<Vec<College>> {
        let rows: Vec<College> = self
            .select("colleges", &[("select", "*")])
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch colleges"))?;
        tracing::info!(count = rows.len(), "Fetched colleges");
        Ok(rows)
    }

    async fn create_college(&self, draft: &CollegeDraft) -> Result<College> {
        let record = draft.normalize().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected college insert before submission");
        })?;
        let created: College = self
            .insert("colleges", &record)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, name = %record.name, "Failed to add college"))?;
        tracing::info!(id = %created.id, name = %created.name, "College added");
        Ok(created)
    }

    async fn update_college(&self, id: &str, draft: &CollegeDraft) -> Result<College> {
        let record = draft.normalize().inspect_err(|e| {
            tracing::warn!(error = %e, id, "Rejected college update before submission");
        })?;
        let updated: College = self
            .update("colleges", id, &record)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id, "Failed to update college"))?;
        tracing::info!(id = %updated.id, "College updated");
        Ok(updated)
    }

    async fn delete_college(&self, id: &str) -> Result<()> {
        self.delete("colleges", id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id, "Failed to delete college"))?;
        tracing::info!(id, "College deleted");
        Ok(())
    }

    async fn list_logos(&self) -> Result<Vec<Logo>> {
        let rows: Vec<Logo> = self
            .select("logos", &[("select", "*"), ("order", "id.asc")])
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch logos"))?;
        tracing::info!(count = rows.len(), "Fetched logos");
        Ok(rows)
    }

    async fn create_logo(&self, draft: &LogoDraft) -> Result<Logo> {
        let record = draft.normalize().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected logo insert before submission");
        })?;
        let created: Logo = self
            .insert("logos", &record)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, name = %record.name, "Failed to add logo"))?;
        tracing::info!(id = created.id, name = %created.name, "Logo added");
        Ok(created)
    }

    async fn update_logo(&self, id: i64, draft: &LogoDraft) -> Result<Logo> {
        let record = draft.normalize().inspect_err(|e| {
            tracing::warn!(error = %e, id, "Rejected logo update before submission");
        })?;
        let updated: Logo = self
            .update("logos", &id.to_string(), &record)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id, "Failed to update logo"))?;
        tracing::info!(id = updated.id, "Logo updated");
        Ok(updated)
    }

    async fn delete_logo(&self, id: i64) -> Result<()> {
        self.delete("logos", &id.to_string())
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id, "Failed to delete logo"))?;
        tracing::info!(id, "Logo deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use edvise_core::AssetSource;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StoreClient {
        StoreClient::new(&BackendConfig {
            url: server.uri(),
            api_key: "anon-key".to_string(),
            bucket: "colleges".to_string(),
        })
    }

    fn college_row(id: &str, name: &str, location: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "location": location,
            "description": null,
            "ranking": null,
            "admissionRate": null,
            "tuition": null,
            "website": null,
            "image": null,
            "logo": null,
            "brochure": null,
            "created_at": "2024-03-01T10:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn test_list_colleges() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/colleges"))
            .and(query_param("select", "*"))
            .and(header("apikey", "anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                college_row("c1", "Test U", "Testville"),
                college_row("c2", "North College", "Springfield"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let colleges = client_for(&server).list_colleges().await.unwrap();
        assert_eq!(colleges.len(), 2);
        assert_eq!(colleges[0].name, "Test U");
        assert_eq!(colleges[1].location, "Springfield");
    }

    #[tokio::test]
    async fn test_create_college_submits_normalized_batch() {
        let server = MockServer::start().await;
        let expected_body = json!([{
            "name": "Test U",
            "location": "Testville",
            "description": null,
            "ranking": 4.5,
            "admissionRate": 0.62,
            "tuition": null,
            "website": null,
            "image": null,
            "logo": null,
            "brochure": null
        }]);
        Mock::given(method("POST"))
            .and(path("/rest/v1/colleges"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(&expected_body))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!([college_row("c9", "Test U", "Testville")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        // A fractional ranking is still numeric input and goes through.
        let draft = CollegeDraft {
            name: " Test U ".into(),
            location: "Testville".into(),
            ranking: "4.5".into(),
            admission_rate: "0.62".into(),
            tuition: "not sure".into(),
            ..Default::default()
        };
        let created = client_for(&server).create_college(&draft).await.unwrap();
        assert_eq!(created.id, "c9");
    }

    #[tokio::test]
    async fn test_create_college_invalid_draft_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/colleges"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let draft = CollegeDraft {
            name: String::new(),
            location: "X".into(),
            ..Default::default()
        };
        let err = client_for(&server).create_college(&draft).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_update_college_full_overwrite() {
        let server = MockServer::start().await;
        // Only tuition changed in the draft; the payload still carries every
        // mutable field, nulls included.
        let expected_body = json!({
            "name": "Test U",
            "location": "Testville",
            "description": "Old school",
            "ranking": null,
            "admissionRate": null,
            "tuition": 52000.0,
            "website": null,
            "image": null,
            "logo": null,
            "brochure": null
        });
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/colleges"))
            .and(query_param("id", "eq.c1"))
            .and(body_json(&expected_body))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([college_row("c1", "Test U", "Testville")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = CollegeDraft {
            name: "Test U".into(),
            location: "Testville".into(),
            description: "Old school".into(),
            tuition: "52000".into(),
            ..Default::default()
        };
        let updated = client_for(&server)
            .update_college("c1", &draft)
            .await
            .unwrap();
        assert_eq!(updated.id, "c1");
    }

    #[tokio::test]
    async fn test_delete_college() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/colleges"))
            .and(query_param("id", "eq.c1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).delete_college("c1").await.is_ok());
    }

    #[tokio::test]
    async fn test_store_rejection_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/colleges"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"message": "permission denied for table colleges"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).delete_college("c1").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "record store error: permission denied for table colleges"
        );
    }

    #[tokio::test]
    async fn test_list_logos_ordered_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/logos"))
            .and(query_param("order", "id.asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Partner A", "logo_url": "https://cdn.example/a.png"},
                {"id": 7, "name": "Partner B", "logo_url": "https://cdn.example/b.png"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let logos = client_for(&server).list_logos().await.unwrap();
        assert_eq!(logos.len(), 2);
        assert_eq!(logos[1].id, 7);
    }

    #[tokio::test]
    async fn test_create_logo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/logos"))
            .and(body_json(json!([{
                "name": "Partner A",
                "logo_url": "https://cdn.example/a.png"
            }])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([
                {"id": 3, "name": "Partner A", "logo_url": "https://cdn.example/a.png"}
            ])))
            .mount(&server)
            .await;

        let draft = LogoDraft {
            name: "Partner A".into(),
            logo: AssetSource::Uploaded("https://cdn.example/a.png".into()),
        };
        let created = client_for(&server).create_logo(&draft).await.unwrap();
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn test_create_logo_requires_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/logos"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let draft = LogoDraft {
            name: "Partner A".into(),
            logo: AssetSource::Absent,
        };
        let err = client_for(&server).create_logo(&draft).await.unwrap_err();
        assert!(err.is_validation());
    }
}
