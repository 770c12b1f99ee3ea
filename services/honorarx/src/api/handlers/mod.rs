//! API handlers for HonorarX.
//!
//! This module organizes the service's route handlers: authentication and
//! session management under `auth`, self-service profile under `me`, plus
//! contact, health, and root.

pub mod auth;
pub mod contact;
pub mod health;
pub mod me;
pub mod root;
