// Job progress trackers: admin CRUD, public read of enabled entries.

pub mod handlers;
pub mod service;
pub mod store;
