use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Value};
use url::Url;

use crate::config::StoreConfig;
use crate::error::AppError;

use super::{ContentStore, CreatedDocument, UploadedAsset};

/// Talks to the content store's HTTP API
pub struct HttpStore {
    config: StoreConfig,
    client: Client,
}

impl HttpStore {
    pub fn new(config: StoreConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    fn api_base(&self) -> String {
        // The CDN only serves public, read-only requests
        let host = if self.config.use_cdn && self.config.token.is_none() {
            "apicdn"
        } else {
            "api"
        };
        format!(
            "https://{}.{}.sanity.io/v{}",
            self.config.project_id, host, self.config.api_version
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}/{}", self.api_base(), path, self.config.dataset);
        Url::parse(&raw).map_err(|e| AppError::InvalidConfiguration(format!("{}: {}", raw, e)))
    }

    pub(crate) fn query_url(&self, query: &str, params: &[(&str, Value)]) -> Result<Url, AppError> {
        let mut url = self.endpoint("data/query")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                // Parameters are sent JSON encoded
                pairs.append_pair(&format!("${}", name), &value.to_string());
            }
        }
        Ok(url)
    }

    pub(crate) fn mutate_url(&self) -> Result<Url, AppError> {
        let mut url = self.endpoint("data/mutate")?;
        url.query_pairs_mut()
            .append_pair("returnIds", "true")
            .append_pair("returnDocuments", "true");
        Ok(url)
    }

    pub(crate) fn asset_url(&self, filename: &str) -> Result<Url, AppError> {
        let mut url = self.endpoint("assets/images")?;
        url.query_pairs_mut().append_pair("filename", filename);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let request = match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl ContentStore for HttpStore {
    fn query(&self, query: &str, params: &[(&str, Value)]) -> Result<Value, AppError> {
        let url = self.query_url(query, params)?;
        debug!("GET {}", url.path());
        let mut body = self.send(self.client.get(url))?;
        Ok(body
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    fn create(&self, document: &Value) -> Result<CreatedDocument, AppError> {
        let url = self.mutate_url()?;
        debug!("POST {}", url.path());
        let body = self.send(
            self.client
                .post(url)
                .json(&json!({ "mutations": [{ "create": document }] })),
        )?;
        created_document(&body)
    }

    fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedAsset, AppError> {
        let url = self.asset_url(filename)?;
        debug!("POST {} ({} bytes)", url.path(), bytes.len());
        let mut body = self.send(
            self.client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(bytes),
        )?;
        let document = body.get_mut("document").map(Value::take).ok_or_else(|| AppError::Api {
            status: 200,
            message: "asset upload response had no document".to_owned(),
        })?;
        Ok(serde_json::from_value(document)?)
    }
}

fn created_document(body: &Value) -> Result<CreatedDocument, AppError> {
    let result = body
        .get("results")
        .and_then(|results| results.get(0))
        .ok_or_else(|| AppError::Api {
            status: 200,
            message: "mutation response had no results".to_owned(),
        })?;
    let id = result
        .get("document")
        .and_then(|document| document.get("_id"))
        .or_else(|| result.get("id"))
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Api {
            status: 200,
            message: "mutation result had no document id".to_owned(),
        })?;
    Ok(CreatedDocument { id: id.to_owned() })
}

/// Pull a readable message out of an error response body
pub(crate) fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|value| {
        value
            .pointer("/error/description")
            .or_else(|| value.pointer("/error/message"))
            .or_else(|| value.get("message"))
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    });
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "no response body".to_owned(),
        None => body.trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(token: Option<&str>, use_cdn: bool) -> HttpStore {
        HttpStore::new(StoreConfig {
            project_id: "proj".to_owned(),
            dataset: "production".to_owned(),
            api_version: "2024-03-20".to_owned(),
            token: token.map(str::to_owned),
            use_cdn,
        })
        .unwrap()
    }

    #[test]
    fn test_query_url_uses_cdn_without_token() {
        let url = store(None, true)
            .query_url("*[_type == \"photo\"]", &[])
            .unwrap();
        assert_eq!(url.host_str(), Some("proj.apicdn.sanity.io"));
        assert_eq!(url.path(), "/v2024-03-20/data/query/production");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("query".to_owned(), "*[_type == \"photo\"]".to_owned())]);
    }

    #[test]
    fn test_query_url_with_token_skips_cdn() {
        let url = store(Some("secret"), true).query_url("*", &[]).unwrap();
        assert_eq!(url.host_str(), Some("proj.api.sanity.io"));
    }

    #[test]
    fn test_query_params_are_json_encoded() {
        let url = store(None, false)
            .query_url("*[slug.current == $slug][0]", &[("slug", Value::from("boy-field"))])
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[1], ("$slug".to_owned(), "\"boy-field\"".to_owned()));
    }

    #[test]
    fn test_mutate_and_asset_urls() {
        let store = store(Some("secret"), false);
        assert_eq!(
            store.mutate_url().unwrap().as_str(),
            "https://proj.api.sanity.io/v2024-03-20/data/mutate/production?returnIds=true&returnDocuments=true"
        );
        assert_eq!(
            store.asset_url("boy field.jpg").unwrap().as_str(),
            "https://proj.api.sanity.io/v2024-03-20/assets/images/production?filename=boy+field.jpg"
        );
    }

    #[test]
    fn test_created_document() {
        let body = json!({
            "transactionId": "tx",
            "results": [{ "id": "abc", "operation": "create", "document": { "_id": "abc", "_type": "photo" } }]
        });
        assert_eq!(created_document(&body).unwrap().id, "abc");

        let body = json!({ "transactionId": "tx", "results": [{ "id": "only-id", "operation": "create" }] });
        assert_eq!(created_document(&body).unwrap().id, "only-id");

        assert!(created_document(&json!({ "results": [] })).is_err());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error":{"description":"Insufficient permissions","type":"mutationError"}}"#),
            "Insufficient permissions"
        );
        assert_eq!(error_message(r#"{"message":"Unauthorized"}"#), "Unauthorized");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(""), "no response body");
    }
}
