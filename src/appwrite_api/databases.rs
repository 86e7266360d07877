use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{account::UNIQUE_ID, client::AppwriteError, Appwrite, Query};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Document>,
}

impl Appwrite {
    pub(super) async fn create_document_in(
        &self,
        collection_id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, AppwriteError> {
        log::info!("Creating document in {collection_id}...");
        let request = self
            .admin(self.http().post(self.collection_url(collection_id)))
            .json(&json!({ "documentId": UNIQUE_ID, "data": data }));
        let document: Document = self.send(request).await?;
        log::info!("Creating document in {collection_id}...done ({})", document.id);
        Ok(document)
    }

    pub(super) async fn list_documents_in(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, AppwriteError> {
        let queries = queries
            .iter()
            .map(|query| ("queries[]", query.to_string()))
            .collect::<Vec<_>>();
        let request = self
            .admin(self.http().get(self.collection_url(collection_id)))
            .query(&queries);
        self.send(request).await
    }
}
