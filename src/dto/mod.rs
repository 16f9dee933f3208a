pub mod bid_dto;
pub mod interview_dto;
