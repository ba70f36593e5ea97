//! Connection pool tests

use ak_shared::DatabaseConfig;

use crate::database::{DatabasePool, PoolStatistics};
use crate::InfrastructureError;

#[tokio::test]
async fn test_pool_creation_with_invalid_url() {
    let config = DatabaseConfig::new("not a url");

    let result = DatabasePool::new(config).await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 5,
        idle_connections: 3,
        max_connections: 10,
    };

    let display = format!("{}", stats);
    assert!(display.contains("5/10"));
    assert!(display.contains("3 idle"));
}

#[test]
fn test_infrastructure_error_maps_to_credential_error() {
    let err: ak_core::errors::DomainError =
        InfrastructureError::Config("missing DATABASE_URL".to_string()).into();

    assert!(matches!(err, ak_core::errors::DomainError::Credential { .. }));
}
