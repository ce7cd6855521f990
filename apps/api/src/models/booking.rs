use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::bookings::lifecycle::{BookingStatus, Partition};
use crate::errors::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    Extension,
    #[serde(rename = "Kitchen Renovation")]
    KitchenRenovation,
    #[serde(rename = "Bathroom Renovation")]
    BathroomRenovation,
    #[serde(rename = "Garage Conversion")]
    GarageConversion,
    #[serde(rename = "Loft Conversion")]
    LoftConversion,
    Landscaping,
    #[serde(rename = "General Refurbishment")]
    GeneralRefurbishment,
    #[serde(rename = "New Build")]
    NewBuild,
    Other,
}

impl ServiceType {
    pub const ALL: [ServiceType; 9] = [
        ServiceType::Extension,
        ServiceType::KitchenRenovation,
        ServiceType::BathroomRenovation,
        ServiceType::GarageConversion,
        ServiceType::LoftConversion,
        ServiceType::Landscaping,
        ServiceType::GeneralRefurbishment,
        ServiceType::NewBuild,
        ServiceType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceType::Extension => "Extension",
            ServiceType::KitchenRenovation => "Kitchen Renovation",
            ServiceType::BathroomRenovation => "Bathroom Renovation",
            ServiceType::GarageConversion => "Garage Conversion",
            ServiceType::LoftConversion => "Loft Conversion",
            ServiceType::Landscaping => "Landscaping",
            ServiceType::GeneralRefurbishment => "General Refurbishment",
            ServiceType::NewBuild => "New Build",
            ServiceType::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredContact {
    Email,
    Phone,
    #[default]
    Either,
}

impl PreferredContact {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredContact::Email => "email",
            PreferredContact::Phone => "phone",
            PreferredContact::Either => "either",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(PreferredContact::Email),
            "phone" => Some(PreferredContact::Phone),
            "either" => Some(PreferredContact::Either),
            _ => None,
        }
    }
}

/// Raw `bookings` row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub service_type: String,
    pub preferred_contact: String,
    pub notes: Option<String>,
    pub is_read: bool,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated submission, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub service_type: ServiceType,
    pub preferred_contact: PreferredContact,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub service_type: ServiceType,
    pub preferred_contact: PreferredContact,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Mirrors the column defaults `PgBookingStore::insert` relies on.
    #[cfg(test)]
    pub fn from_new(id: Uuid, new: NewBooking, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            mobile: new.mobile,
            address: new.address,
            service_type: new.service_type,
            preferred_contact: new.preferred_contact,
            notes: new.notes,
            status: BookingStatus::submitted(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StoreError::Corrupt {
            id: row.id.to_string(),
            reason,
        };
        let status =
            BookingStatus::from_flags(row.is_read, row.is_archived, row.is_deleted, row.deleted_at)
                .map_err(|e| corrupt(e.to_string()))?;
        let service_type = ServiceType::from_label(&row.service_type)
            .ok_or_else(|| corrupt(format!("unknown service type '{}'", row.service_type)))?;
        let preferred_contact = PreferredContact::parse(&row.preferred_contact).ok_or_else(|| {
            corrupt(format!(
                "unknown preferred contact '{}'",
                row.preferred_contact
            ))
        })?;

        Ok(Booking {
            id: row.id,
            name: row.name,
            email: row.email,
            mobile: row.mobile,
            address: row.address,
            service_type,
            preferred_contact,
            notes: row.notes,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Wire shape for admin clients: the stored flags plus the derived partition.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub service_type: ServiceType,
    pub preferred_contact: PreferredContact,
    pub notes: Option<String>,
    pub is_read: bool,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub partition: Partition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingView {
    fn from(b: Booking) -> Self {
        BookingView {
            id: b.id,
            is_read: b.status.inbox.is_read(),
            is_archived: b.status.inbox.is_archived(),
            is_deleted: b.status.is_deleted(),
            deleted_at: b.status.lifecycle.deleted_at(),
            partition: b.status.partition(),
            name: b.name,
            email: b.email,
            mobile: b.mobile,
            address: b.address,
            service_type: b.service_type,
            preferred_contact: b.preferred_contact,
            notes: b.notes,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Number of bookings per partition, for the dashboard tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct PartitionCounts {
    pub new: i64,
    pub read: i64,
    pub archived: i64,
    pub deleted: i64,
}
