// Booking inquiries: public submission, admin inbox partitions, recycle bin.
// Transitions are decided in `lifecycle` and only persisted by `store`.

pub mod handlers;
pub mod lifecycle;
pub mod service;
pub mod store;
pub mod validation;
