use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::types::{DocumentList, PAGE_SIZE};
use super::{AppwriteClient, Query};
use habitrack_domain::shared::DomainError;

impl AppwriteClient {
    fn documents_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.config.database_id, collection_id
        )
    }

    /// List every document matching `queries`, following cursor pages to the end.
    ///
    /// Documents come back as raw JSON so callers can skip malformed entries
    /// instead of failing the whole listing.
    pub async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Value>, DomainError> {
        let path = self.documents_path(collection_id);
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut page_queries: Vec<Query> = queries.to_vec();
            page_queries.push(Query::limit(PAGE_SIZE));
            if let Some(after) = &cursor {
                page_queries.push(Query::cursor_after(after));
            }

            let params: Vec<(&str, String)> = page_queries
                .iter()
                .map(|q| ("queries[]", q.encode()))
                .collect();

            let request = self.request(Method::GET, &path).query(&params);
            let page: DocumentList<Value> = self.send_json("list documents", request).await?;

            let fetched = page.documents.len();
            cursor = page
                .documents
                .last()
                .and_then(|d| d.get("$id"))
                .and_then(Value::as_str)
                .map(str::to_string);
            all.extend(page.documents);

            debug!(
                collection = collection_id,
                fetched,
                total = page.total,
                "fetched document page"
            );

            if fetched < PAGE_SIZE || cursor.is_none() {
                break;
            }
        }

        Ok(all)
    }

    /// Fetch one document, `None` when it does not exist
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Option<T>, DomainError> {
        let path = format!("{}/{}", self.documents_path(collection_id), document_id);
        let request = self.request(Method::GET, &path);

        match self.send_json::<T>("get document", request).await {
            Ok(doc) => Ok(Some(doc)),
            Err(DomainError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_document<D: Serialize + Sync>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<(), DomainError> {
        let request = self
            .request(Method::POST, &self.documents_path(collection_id))
            .json(&json!({
                "documentId": document_id,
                "data": data,
            }));
        self.send_empty("create document", request).await
    }

    pub async fn update_document<D: Serialize + Sync>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<(), DomainError> {
        let path = format!("{}/{}", self.documents_path(collection_id), document_id);
        let request = self
            .request(Method::PATCH, &path)
            .json(&json!({ "data": data }));
        self.send_empty("update document", request).await
    }

    pub async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), DomainError> {
        let path = format!("{}/{}", self.documents_path(collection_id), document_id);
        let request = self.request(Method::DELETE, &path);
        self.send_empty("delete document", request).await
    }
}
