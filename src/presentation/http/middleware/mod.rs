// src/presentation/http/middleware/mod.rs
mod require_access;

pub use require_access::require_access;
