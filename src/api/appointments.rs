//! Calendar appointments and their types.

use tracing::info;
use validator::Validate;

use super::item_path;
use crate::config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::forms::{AppointmentStatusChange, WithId};
use crate::models::{
    Appointment, AppointmentDto, AppointmentStatus, AppointmentType, AppointmentTypeDto,
    NewAppointment,
};
use crate::pagination::{Page, PageRequest};

pub struct AppointmentApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AppointmentApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection() -> String {
        config::endpoint("appointments")
    }

    pub fn list(&self, request: &PageRequest) -> Result<Page<Appointment>> {
        let page = self
            .client
            .get_page::<AppointmentDto>(&Self::collection(), &request.to_query())?;
        Ok(page.map(AppointmentDto::normalize))
    }

    pub fn get(&self, id: i64) -> Result<Appointment> {
        let dto: AppointmentDto = self.client.get(&item_path(&Self::collection(), id), &[])?;
        Ok(dto.normalize())
    }

    pub fn create(&self, appointment: &NewAppointment) -> Result<Appointment> {
        appointment.validate()?;
        let dto: AppointmentDto = self.client.post(&Self::collection(), appointment)?;
        let created = dto.normalize();
        info!(id = created.id, "appointment created");
        Ok(created)
    }

    pub fn update(&self, id: i64, appointment: &NewAppointment) -> Result<Appointment> {
        appointment.validate()?;
        let body = WithId { id, body: appointment };
        let dto: AppointmentDto = self.client.put(&item_path(&Self::collection(), id), &body)?;
        Ok(dto.normalize())
    }

    /// `PUT /appointments/{id}/status`.
    pub fn set_status(&self, id: i64, status: AppointmentStatus) -> Result<Appointment> {
        let path = format!("{}/status", item_path(&Self::collection(), id));
        let dto: AppointmentDto = self.client.put(&path, &AppointmentStatusChange { status })?;
        info!(id, status = %status, "appointment status changed");
        Ok(dto.normalize())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&item_path(&Self::collection(), id))?;
        info!(id, "appointment deleted");
        Ok(())
    }

    /// Appointment categories offered in the calendar's type picker.
    pub fn types(&self, request: &PageRequest) -> Result<Page<AppointmentType>> {
        let page = self.client.get_page::<AppointmentTypeDto>(
            &config::endpoint("appointment_types"),
            &request.to_query(),
        )?;
        Ok(page.map(AppointmentTypeDto::normalize))
    }
}
