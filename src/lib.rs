pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    bid_service::BidService, enrichment_service::EnrichmentService,
    interview_service::InterviewService, notification_service::NotificationService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub interview_service: InterviewService,
    pub bid_service: BidService,
    pub enrichment_service: EnrichmentService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        let interview_service = InterviewService::new(pool.clone());
        let bid_service = BidService::new(pool.clone(), config.max_bids_per_interview);
        let enrichment_service = EnrichmentService::new(pool.clone());
        let notification_service =
            NotificationService::new(http_client, config.notification_webhook_url.clone());

        Self {
            pool,
            interview_service,
            bid_service,
            enrichment_service,
            notification_service,
        }
    }
}
