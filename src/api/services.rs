//! Offered-service reads.

use super::item_path;
use crate::config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{OfferedService, OfferedServiceDto};
use crate::pagination::{Page, PageRequest};

pub struct ServiceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ServiceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self, request: &PageRequest) -> Result<Page<OfferedService>> {
        let page = self
            .client
            .get_page::<OfferedServiceDto>(&config::endpoint("services"), &request.to_query())?;
        Ok(page.map(OfferedServiceDto::normalize))
    }

    pub fn get(&self, id: i64) -> Result<OfferedService> {
        let dto: OfferedServiceDto = self
            .client
            .get(&item_path(&config::endpoint("services"), id), &[])?;
        Ok(dto.normalize())
    }
}
