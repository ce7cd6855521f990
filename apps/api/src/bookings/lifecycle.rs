//! Booking visibility state machine.
//!
//! Stored rows carry three flags (`is_read`, `is_archived`, `is_deleted`) plus
//! `deleted_at`. Inside the crate a booking's state is the pair
//! [`InboxState`] × [`Lifecycle`], which makes combinations such as
//! "deleted but no deletion time" unrepresentable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a live booking sits in the admin inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxState {
    New,
    Read,
    /// Archived bookings remember whether they had been read, so unarchiving
    /// returns them to the right partition.
    Archived { read: bool },
}

impl InboxState {
    pub fn from_flags(is_read: bool, is_archived: bool) -> Self {
        match (is_read, is_archived) {
            (read, true) => InboxState::Archived { read },
            (true, false) => InboxState::Read,
            (false, false) => InboxState::New,
        }
    }

    pub fn is_read(self) -> bool {
        match self {
            InboxState::New => false,
            InboxState::Read => true,
            InboxState::Archived { read } => read,
        }
    }

    pub fn is_archived(self) -> bool {
        matches!(self, InboxState::Archived { .. })
    }

    fn mark_read(self) -> Self {
        match self {
            InboxState::New | InboxState::Read => InboxState::Read,
            InboxState::Archived { .. } => InboxState::Archived { read: true },
        }
    }

    fn archive(self) -> Self {
        InboxState::Archived {
            read: self.is_read(),
        }
    }

    fn unarchive(self) -> Self {
        InboxState::from_flags(self.is_read(), false)
    }
}

/// Whether a booking is live or sitting in the recycle bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn deleted_at(self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(at),
        }
    }
}

/// Mutually exclusive admin views over bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    #[default]
    New,
    Read,
    Archived,
    Deleted,
}

impl Partition {
    #[cfg(test)]
    pub const ALL: [Partition; 4] = [
        Partition::New,
        Partition::Read,
        Partition::Archived,
        Partition::Deleted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Partition::New => "new",
            Partition::Read => "read",
            Partition::Archived => "archived",
            Partition::Deleted => "deleted",
        }
    }

    #[cfg(test)]
    pub fn contains(self, status: &BookingStatus) -> bool {
        status.partition() == self
    }
}

/// An admin action on a single booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    MarkRead,
    Archive,
    Unarchive,
    SoftDelete,
    Restore,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::MarkRead => "mark as read",
            Transition::Archive => "archive",
            Transition::Unarchive => "unarchive",
            Transition::SoftDelete => "delete",
            Transition::Restore => "restore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {} a booking that is in the recycle bin", .0.as_str())]
    InRecycleBin(Transition),

    #[error("booking is not in the recycle bin")]
    NotInRecycleBin,
}

/// `deleted_at` must be present exactly when `is_deleted` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("inconsistent deletion flags: is_deleted={is_deleted}, deleted_at present={has_deleted_at}")]
pub struct InconsistentFlags {
    pub is_deleted: bool,
    pub has_deleted_at: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingStatus {
    pub inbox: InboxState,
    pub lifecycle: Lifecycle,
}

impl BookingStatus {
    /// State of a freshly submitted booking.
    pub fn submitted() -> Self {
        Self {
            inbox: InboxState::New,
            lifecycle: Lifecycle::Active,
        }
    }

    pub fn from_flags(
        is_read: bool,
        is_archived: bool,
        is_deleted: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Self, InconsistentFlags> {
        let lifecycle = match (is_deleted, deleted_at) {
            (false, None) => Lifecycle::Active,
            (true, Some(at)) => Lifecycle::Deleted { at },
            (is_deleted, deleted_at) => {
                return Err(InconsistentFlags {
                    is_deleted,
                    has_deleted_at: deleted_at.is_some(),
                })
            }
        };
        Ok(Self {
            inbox: InboxState::from_flags(is_read, is_archived),
            lifecycle,
        })
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Deleted { .. })
    }

    pub fn partition(&self) -> Partition {
        match (self.lifecycle, self.inbox) {
            (Lifecycle::Deleted { .. }, _) => Partition::Deleted,
            (Lifecycle::Active, InboxState::New) => Partition::New,
            (Lifecycle::Active, InboxState::Read) => Partition::Read,
            (Lifecycle::Active, InboxState::Archived { .. }) => Partition::Archived,
        }
    }

    /// Applies `transition`, returning the new status. Inbox actions are only
    /// valid on live bookings; restore is only valid on deleted ones.
    pub fn apply(self, transition: Transition, now: DateTime<Utc>) -> Result<Self, TransitionError> {
        match (transition, self.lifecycle) {
            (Transition::Restore, Lifecycle::Deleted { .. }) => Ok(Self {
                lifecycle: Lifecycle::Active,
                ..self
            }),
            (Transition::Restore, Lifecycle::Active) => Err(TransitionError::NotInRecycleBin),
            (t, Lifecycle::Deleted { .. }) => Err(TransitionError::InRecycleBin(t)),
            (Transition::SoftDelete, Lifecycle::Active) => Ok(Self {
                lifecycle: Lifecycle::Deleted { at: now },
                ..self
            }),
            (Transition::MarkRead, Lifecycle::Active) => Ok(Self {
                inbox: self.inbox.mark_read(),
                ..self
            }),
            (Transition::Archive, Lifecycle::Active) => Ok(Self {
                inbox: self.inbox.archive(),
                ..self
            }),
            (Transition::Unarchive, Lifecycle::Active) => Ok(Self {
                inbox: self.inbox.unarchive(),
                ..self
            }),
        }
    }
}
