//! Payment reads. Payments are recorded by the backend, never by this client.

use super::item_path;
use crate::config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Payment, PaymentDto};
use crate::pagination::{Page, PageRequest};

pub struct PaymentApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self, request: &PageRequest) -> Result<Page<Payment>> {
        let page = self
            .client
            .get_page::<PaymentDto>(&config::endpoint("payments"), &request.to_query())?;
        Ok(page.map(PaymentDto::normalize))
    }

    pub fn get(&self, id: i64) -> Result<Payment> {
        let dto: PaymentDto = self
            .client
            .get(&item_path(&config::endpoint("payments"), id), &[])?;
        Ok(dto.normalize())
    }
}
