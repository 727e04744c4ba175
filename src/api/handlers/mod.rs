pub mod activity;
pub mod auth;
pub mod health;
pub mod history;
pub mod lock;
pub mod member;
pub mod reservation;
pub mod room;
