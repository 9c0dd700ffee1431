//! Access to the hosted content store

pub mod http;
#[cfg(test)]
pub(crate) mod memory;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

pub use self::http::HttpStore;

/// The operations the site and the batch jobs need from the content store.
///
/// Queries are sent as text and run by the store, nothing here interprets them.
pub trait ContentStore {
    fn query(&self, query: &str, params: &[(&str, Value)]) -> Result<Value, AppError>;
    fn create(&self, document: &Value) -> Result<CreatedDocument, AppError>;
    fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedAsset, AppError>;
}

/// Run a query and decode the result
pub fn fetch<T, S>(store: &S, query: &str, params: &[(&str, Value)]) -> Result<T, AppError>
where
    T: DeserializeOwned,
    S: ContentStore + ?Sized,
{
    let value = store.query(query, params)?;
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedDocument {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAsset {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    #[serde(rename = "originalFilename", default)]
    pub original_filename: Option<String>,
}
