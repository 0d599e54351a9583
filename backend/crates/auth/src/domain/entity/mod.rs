//! Entity Module

pub mod account;
pub mod auth_session;
