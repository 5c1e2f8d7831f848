//! Shared contracts between the ERP frontend and the accounting backend.
//!
//! Besides the wire DTOs this crate holds every rule the browser applies
//! before a request is sent (balancing, payment application, focus routing,
//! document-type workflow), so it can be tested without a browser.

pub mod domain;
pub mod shared;
