pub mod dto;
pub mod region;
