pub mod dto;
pub mod endpoints;
