use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{optional_text, parse_timestamp, text, AppointmentStatus};

/// Length used when the backend sends no (or an out-of-range) duration.
pub const DEFAULT_APPOINTMENT_MINUTES: u32 = 60;
/// Longest appointment the backend accepts: one day.
pub const MAX_APPOINTMENT_MINUTES: u32 = 1440;

// ---------------------------------------------------------------------------
// AppointmentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTypeDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl AppointmentTypeDto {
    pub fn normalize(self) -> AppointmentType {
        AppointmentType {
            id: self.id.unwrap_or_default(),
            name: text(self.name),
            description: optional_text(self.description),
            color: optional_text(self.color).filter(|c| is_hex_color(c)),
            active: self.is_active.unwrap_or(true),
        }
    }
}

/// Category of a calendar appointment (consultation, meeting, delivery).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// `#RRGGBB`; anything else is dropped.
    pub color: Option<String>,
    pub active: bool,
}

pub(crate) fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// Staff user as embedded in an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: Option<i64>,
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ParticipantDto {
    pub fn normalize(self) -> Participant {
        Participant {
            id: self.id.unwrap_or_default(),
            login: text(self.login),
            first_name: text(self.first_name),
            last_name: text(self.last_name),
            email: text(self.email),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: i64,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Participant {
    /// Full name, falling back to the login.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.login.clone()
        } else {
            name
        }
    }
}

// ---------------------------------------------------------------------------
// AppointmentDto (wire shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub appointment_date: Option<String>,
    /// Minutes.
    pub duration: Option<i64>,
    pub status: Option<String>,
    pub created_date: Option<String>,
    pub last_modified_date: Option<String>,
    pub created_by: Option<ParticipantDto>,
    #[serde(rename = "type")]
    pub type_field: Option<AppointmentTypeDto>,
    pub participants: Option<Vec<ParticipantDto>>,
}

impl AppointmentDto {
    pub fn normalize(self) -> Appointment {
        let duration_minutes = self
            .duration
            .and_then(|d| u32::try_from(d).ok())
            .filter(|d| (1..=MAX_APPOINTMENT_MINUTES).contains(d))
            .unwrap_or(DEFAULT_APPOINTMENT_MINUTES);
        Appointment {
            id: self.id.unwrap_or_default(),
            title: text(self.title),
            description: optional_text(self.description),
            date: parse_timestamp(self.appointment_date.as_deref()),
            duration_minutes,
            status: self.status.as_deref().and_then(AppointmentStatus::parse),
            created_at: parse_timestamp(self.created_date.as_deref()),
            modified_at: parse_timestamp(self.last_modified_date.as_deref()),
            created_by: self.created_by.map(ParticipantDto::normalize),
            appointment_type: self.type_field.map(AppointmentTypeDto::normalize),
            participants: self
                .participants
                .unwrap_or_default()
                .into_iter()
                .map(ParticipantDto::normalize)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Appointment (normalized)
// ---------------------------------------------------------------------------

/// A calendar entry for staff, independent of customer reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// Always within `1..=MAX_APPOINTMENT_MINUTES`.
    pub duration_minutes: u32,
    pub status: Option<AppointmentStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<Participant>,
    pub appointment_type: Option<AppointmentType>,
    pub participants: Vec<Participant>,
}

impl Appointment {
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.date
            .map(|start| start + Duration::minutes(i64::from(self.duration_minutes)))
    }

    /// Calendar label: the first participant's name, else the title.
    pub fn label(&self) -> String {
        self.participants
            .first()
            .map(Participant::display_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.title.clone())
    }

    /// Status colour, `"gray"` when the status is unknown.
    pub fn color(&self) -> &'static str {
        self.status.map(|s| s.color()).unwrap_or("gray")
    }

    /// True when the two appointments share any instant.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        match (self.date, self.ends_at(), other.date, other.ends_at()) {
            (Some(a0), Some(a1), Some(b0), Some(b1)) => a0 < b1 && b0 < a1,
            _ => false,
        }
    }
}
