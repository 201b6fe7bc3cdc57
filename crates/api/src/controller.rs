//! Top-level application controller

use crate::service::{AppService, ServiceInfo};

/// Entry point for the root route
#[derive(Debug, Clone)]
pub struct AppController {
    service: AppService,
}

impl AppController {
    pub const NAME: &'static str = "app";

    pub fn new(service: AppService) -> Self {
        Self { service }
    }

    pub async fn index(&self) -> ServiceInfo {
        self.service.info().await
    }
}
