pub mod auth_service;
pub mod conflict;
pub mod drag;
pub mod interval;
pub mod recurrence;
pub mod series;
