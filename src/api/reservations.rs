//! Reservation endpoints, including approval, the upcoming list, the
//! per-user list, the report, and public guest bookings.

use tracing::info;
use validator::Validate;

use super::item_path;
use crate::aggregate::{ReservationFilter, ReservationReport, ReservationReportDto};
use crate::config::{self, UPCOMING_DEFAULT_SIZE};
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::forms::WithId;
use crate::models::{
    GuestReservationRequest, NewReservation, Reservation, ReservationApproval, ReservationDto,
};
use crate::pagination::{Page, PageRequest};

/// Reservation fetcher bound to a client.
pub struct ReservationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReservationApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection() -> String {
        config::endpoint("reservations")
    }

    /// One page of all reservations (admin).
    pub fn list(&self, request: &PageRequest) -> Result<Page<Reservation>> {
        let page = self
            .client
            .get_page::<ReservationDto>(&Self::collection(), &request.to_query())?;
        Ok(page.map(ReservationDto::normalize))
    }

    /// Like [`list`](Self::list) with filter criteria appended to the query.
    pub fn search(&self, filter: &ReservationFilter, request: &PageRequest) -> Result<Page<Reservation>> {
        let mut request = request.clone();
        request.filters(filter.to_query());
        self.list(&request)
    }

    pub fn get(&self, id: i64) -> Result<Reservation> {
        let dto: ReservationDto = self.client.get(&item_path(&Self::collection(), id), &[])?;
        Ok(dto.normalize())
    }

    pub fn create(&self, reservation: &NewReservation) -> Result<Reservation> {
        reservation.validate()?;
        let dto: ReservationDto = self.client.post(&Self::collection(), reservation)?;
        let created = dto.normalize();
        info!(id = created.id, "reservation created");
        Ok(created)
    }

    pub fn update(&self, id: i64, reservation: &NewReservation) -> Result<Reservation> {
        reservation.validate()?;
        let body = WithId { id, body: reservation };
        let dto: ReservationDto = self.client.put(&item_path(&Self::collection(), id), &body)?;
        Ok(dto.normalize())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&item_path(&Self::collection(), id))?;
        info!(id, "reservation deleted");
        Ok(())
    }

    /// Confirm a pending reservation. The backend rejects anything that is
    /// not pending.
    pub fn approve(&self, id: i64, notes: Option<&str>) -> Result<Reservation> {
        let approval = ReservationApproval {
            notes: notes.map(str::to_string),
        };
        approval.validate()?;
        let path = format!("{}/approve", item_path(&Self::collection(), id));
        let dto: ReservationDto = self.client.put(&path, &approval)?;
        info!(id, "reservation approved");
        Ok(dto.normalize())
    }

    /// The next `size` pending or confirmed reservations, soonest first.
    /// `None` uses the server default of 5.
    pub fn upcoming(&self, size: Option<usize>) -> Result<Vec<Reservation>> {
        let size = size.unwrap_or(UPCOMING_DEFAULT_SIZE).max(1);
        let query = vec![("size".to_string(), size.to_string())];
        let dtos: Vec<ReservationDto> = self
            .client
            .get(&config::endpoint("reservations_upcoming"), &query)?;
        Ok(dtos.into_iter().map(ReservationDto::normalize).collect())
    }

    /// Reservations owned by the logged-in user. The customer criterion is
    /// ignored by this endpoint.
    pub fn mine(&self, filter: &ReservationFilter, request: &PageRequest) -> Result<Page<Reservation>> {
        let mut request = request.clone();
        request.filters(filter.to_query().into_iter().filter(|(k, _)| k != "customerId"));
        let page = self
            .client
            .get_page::<ReservationDto>(&config::endpoint("reservations_mine"), &request.to_query())?;
        Ok(page.map(ReservationDto::normalize))
    }

    /// Server-side report for `filter`.
    pub fn report(&self, filter: &ReservationFilter) -> Result<ReservationReport> {
        let dto: ReservationReportDto = self
            .client
            .get(&config::endpoint("reservations_report"), &filter.to_query())?;
        Ok(dto.normalize())
    }

    /// Submit a guest booking through the public endpoint.
    pub fn create_guest(&self, request: &GuestReservationRequest) -> Result<Reservation> {
        request.validate()?;
        let dto: ReservationDto = self
            .client
            .post(&config::endpoint("public_reservations"), request)?;
        let created = dto.normalize();
        info!(id = created.id, "guest reservation submitted");
        Ok(created)
    }
}
