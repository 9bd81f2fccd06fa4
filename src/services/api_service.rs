use crate::{
    api::{create_router, ApiState},
    config::Config,
    graphql::{GraphQlTransport, HttpGraphQlClient},
    history::HistoryService,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub struct ApiService {
    config: Config,
    history: HistoryService,
}

impl ApiService {
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpGraphQlClient::new(config.graphql.endpoint.clone(), config.graphql.timeout())?;
        info!("GraphQL endpoint: {}", client.endpoint());

        Ok(Self::with_transport(config, Arc::new(client)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn GraphQlTransport>) -> Self {
        let history = HistoryService::new(transport, config.history.clone());
        Self { config, history }
    }

    pub async fn start(&self) -> Result<()> {
        info!("🚀 Starting market history API...");
        let history = self.history.config();
        info!(
            "Ticker queries: {}, volume gap policy: {}, page size: {}, window concurrency: {}",
            history.ticker_query,
            history.volume_gap_policy,
            history.page_size,
            history.window_concurrency
        );

        let app = create_router(ApiState::new(self.history.clone()));
        let listener = tokio::net::TcpListener::bind(format!("{}:{}", self.config.server.host, self.config.server.port)).await?;

        info!("API Server starting on {}:{}", self.config.server.host, self.config.server.port);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphQlConfig, HistoryConfig, ServerConfig, TickerQueryMode, VolumeGapPolicy};
    use crate::graphql::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn test_history_settings_reach_the_service() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            graphql: GraphQlConfig {
                endpoint: "http://127.0.0.1:8000/graphql".to_string(),
                timeout_secs: 5,
            },
            history: HistoryConfig {
                page_size: 250,
                ticker_query: TickerQueryMode::Unscoped,
                volume_gap_policy: VolumeGapPolicy::Zero,
                window_concurrency: 3,
            },
        };
        let transport = Arc::new(MockTransport::new(|_| Ok(json!({}))));

        let service = ApiService::with_transport(config, transport);
        let history = service.history.config();

        assert_eq!(history.page_size, 250);
        assert_eq!(history.ticker_query, TickerQueryMode::Unscoped);
        assert_eq!(history.volume_gap_policy, VolumeGapPolicy::Zero);
        assert_eq!(history.window_concurrency, 3);
    }
}
