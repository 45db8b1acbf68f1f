#![allow(non_snake_case)]

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use error::BookingError;
pub use models::availability::{AvailabilityResponse, CommonSlot, TimeRangeQuery};
pub use models::booking::{EventIdentity, parse_booking_url};
pub use service::availability_service::BookingLinkClient;
pub use service::slot_format::{
    format_slot_date, format_slot_date_in, format_slot_time, format_slot_time_in,
};
