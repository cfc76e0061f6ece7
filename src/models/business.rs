use serde::{Deserialize, Serialize};

use super::{optional_text, text, BusinessType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

impl BusinessDto {
    pub fn normalize(self) -> Business {
        Business {
            id: self.id.unwrap_or_default(),
            name: text(self.name),
            business_type: self.type_field.as_deref().and_then(BusinessType::parse),
            address: optional_text(self.address),
            phone: optional_text(self.phone),
            email: optional_text(self.email),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub business_type: Option<BusinessType>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
