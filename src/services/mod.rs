pub mod bid_service;
pub mod enrichment_service;
pub mod interview_service;
pub mod notification_service;
