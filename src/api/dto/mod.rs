//! API DTOs.

pub mod usage_dto;
