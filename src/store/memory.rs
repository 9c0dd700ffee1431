use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::AppError;

use super::{ContentStore, CreatedDocument, UploadedAsset};

/// Canned query results plus a record of every write
#[derive(Default)]
pub(crate) struct MemoryStore {
    responses: HashMap<String, Value>,
    pub(crate) queries: RefCell<Vec<(String, Vec<(String, Value)>)>>,
    pub(crate) created: RefCell<Vec<Value>>,
    pub(crate) uploads: RefCell<Vec<(String, String, usize)>>,
    /// Writes whose title or filename contains one of these fail
    failing: Vec<String>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_response(mut self, query: &str, response: Value) -> Self {
        self.responses.insert(query.to_owned(), response);
        self
    }

    pub(crate) fn failing_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_owned());
        self
    }

    fn should_fail(&self, haystack: &str) -> bool {
        self.failing.iter().any(|needle| haystack.contains(needle.as_str()))
    }
}

impl ContentStore for MemoryStore {
    fn query(&self, query: &str, params: &[(&str, Value)]) -> Result<Value, AppError> {
        self.queries.borrow_mut().push((
            query.to_owned(),
            params
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        ));
        Ok(self.responses.get(query).cloned().unwrap_or(Value::Null))
    }

    fn create(&self, document: &Value) -> Result<CreatedDocument, AppError> {
        let title = document.get("title").and_then(Value::as_str).unwrap_or_default();
        if self.should_fail(title) {
            return Err(AppError::Api {
                status: 400,
                message: format!("rejected {}", title),
            });
        }
        let mut created = self.created.borrow_mut();
        let id = format!("doc-{}", created.len());
        created.push(document.clone());
        Ok(CreatedDocument { id })
    }

    fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedAsset, AppError> {
        if self.should_fail(filename) {
            return Err(AppError::Api {
                status: 413,
                message: format!("rejected {}", filename),
            });
        }
        let mut uploads = self.uploads.borrow_mut();
        let id = format!("image-asset{}-100x100-jpg", uploads.len());
        uploads.push((filename.to_owned(), content_type.to_owned(), bytes.len()));
        Ok(UploadedAsset {
            url: format!("https://cdn.test/{}", id),
            id,
            original_filename: Some(filename.to_owned()),
        })
    }
}
