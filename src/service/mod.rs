pub mod availability_service;
pub mod slot_format;
