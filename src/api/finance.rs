//! Finance entries and their attached documents.
//!
//! The entry collection is not paginated server-side: `list` returns every
//! entry and the page total is the array length.

use tracing::info;
use validator::Validate;

use super::item_path;
use crate::config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::forms::WithId;
use crate::models::{
    FinanceDocument, FinanceDocumentDto, FinanceEntry, FinanceEntryDto, NewFinanceEntry,
};
use crate::pagination::Page;

pub struct FinanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FinanceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection() -> String {
        config::endpoint("finance_entries")
    }

    pub fn list(&self) -> Result<Page<FinanceEntry>> {
        let page = self.client.get_page::<FinanceEntryDto>(&Self::collection(), &[])?;
        Ok(page.map(FinanceEntryDto::normalize))
    }

    pub fn get(&self, id: i64) -> Result<FinanceEntry> {
        let dto: FinanceEntryDto = self.client.get(&item_path(&Self::collection(), id), &[])?;
        Ok(dto.normalize())
    }

    pub fn create(&self, entry: &NewFinanceEntry) -> Result<FinanceEntry> {
        entry.validate()?;
        let dto: FinanceEntryDto = self.client.post(&Self::collection(), entry)?;
        let created = dto.normalize();
        info!(id = created.id, "finance entry created");
        Ok(created)
    }

    pub fn update(&self, id: i64, entry: &NewFinanceEntry) -> Result<FinanceEntry> {
        entry.validate()?;
        let body = WithId { id, body: entry };
        let dto: FinanceEntryDto = self.client.put(&item_path(&Self::collection(), id), &body)?;
        Ok(dto.normalize())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&item_path(&Self::collection(), id))?;
        info!(id, "finance entry deleted");
        Ok(())
    }

    /// Metadata of an uploaded document.
    pub fn document(&self, id: i64) -> Result<FinanceDocument> {
        let dto: FinanceDocumentDto = self
            .client
            .get(&item_path(&config::endpoint("finance_documents"), id), &[])?;
        Ok(dto.normalize())
    }
}
