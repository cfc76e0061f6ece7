use serde::{Deserialize, Serialize};

use super::{optional_text, text};

// ---------------------------------------------------------------------------
// CustomerDto (wire shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl CustomerDto {
    pub fn normalize(self) -> Customer {
        Customer {
            id: self.id.unwrap_or_default(),
            first_name: text(self.first_name),
            last_name: text(self.last_name),
            email: text(self.email),
            phone: text(self.phone),
            notes: optional_text(self.notes),
        }
    }
}

// ---------------------------------------------------------------------------
// Customer (normalized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

impl Customer {
    /// `"First Last"`, with missing parts dropped.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Best human label: full name, then email, then phone.
    pub fn display_name(&self) -> Option<String> {
        let name = self.full_name();
        if !name.is_empty() {
            return Some(name);
        }
        [&self.email, &self.phone]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
    }
}
