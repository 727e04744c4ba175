pub mod activity;
pub mod auth;
pub mod history;
pub mod lock;
pub mod reservation;
pub mod room;
pub mod user;
