//! Airport Pickup Reservation API Library
//!
//! This library provides the reservation workflow for the airport pickup /
//! drop-off service: the form controller used by clients, and the submission
//! endpoint that records reservations in the Notion bookings database and
//! notifies the operator over Telegram.
//!
//! # Modules
//!
//! - `api`: API-layer namespace.
//! - `core`: Domain-layer namespace.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `field_policy`: Visible/required fields per service type.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Reservation data models.
//! - `notification`: Operator message composition.
//! - `notion_client`: Notion bookings database client.
//! - `reservation_form`: Client-side form controller.
//! - `submission`: Persist-then-notify pipeline.
//! - `telegram_client`: Telegram bot client.
//! - `timestamps`: UTC+8 date-time normalization.

pub mod api;
pub mod core;
pub mod integrations;

pub mod config;
pub mod errors;
pub mod field_policy;
pub mod handlers;
pub mod models;
pub mod notification;
pub mod notion_client;
pub mod reservation_form;
pub mod submission;
pub mod telegram_client;
pub mod timestamps;
