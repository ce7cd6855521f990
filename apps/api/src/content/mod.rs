// Portfolio content: projects and testimonials, read-only over HTTP,
// seeded once by the bootstrap step.

pub mod handlers;
pub mod samples;
pub mod store;
