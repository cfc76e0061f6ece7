//! Customer CRUD.

use tracing::info;
use validator::Validate;

use super::item_path;
use crate::config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::forms::WithId;
use crate::models::{Customer, CustomerDto, NewCustomer};
use crate::pagination::{Page, PageRequest};

pub struct CustomerApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CustomerApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection() -> String {
        config::endpoint("customers")
    }

    pub fn list(&self, request: &PageRequest) -> Result<Page<Customer>> {
        let page = self
            .client
            .get_page::<CustomerDto>(&Self::collection(), &request.to_query())?;
        Ok(page.map(CustomerDto::normalize))
    }

    pub fn get(&self, id: i64) -> Result<Customer> {
        let dto: CustomerDto = self.client.get(&item_path(&Self::collection(), id), &[])?;
        Ok(dto.normalize())
    }

    pub fn create(&self, customer: &NewCustomer) -> Result<Customer> {
        customer.validate()?;
        let dto: CustomerDto = self.client.post(&Self::collection(), customer)?;
        let created = dto.normalize();
        info!(id = created.id, "customer created");
        Ok(created)
    }

    pub fn update(&self, id: i64, customer: &NewCustomer) -> Result<Customer> {
        customer.validate()?;
        let body = WithId { id, body: customer };
        let dto: CustomerDto = self.client.put(&item_path(&Self::collection(), id), &body)?;
        Ok(dto.normalize())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&item_path(&Self::collection(), id))?;
        info!(id, "customer deleted");
        Ok(())
    }
}
