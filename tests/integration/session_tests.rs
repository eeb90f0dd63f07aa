//! Session store and HTTP identity provider integration tests

#[cfg(test)]
mod tests {
    use crate::common::{IdentityFactory, ScriptedProvider};
    use merchant_rbac::{
        HttpIdentityProvider, IdentityEndpointConfig, IdentityProvider, ManualClock, RbacConfig,
        RbacError, RbacFacade, Resource, Role, SessionStore,
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint_for(server: &MockServer) -> IdentityEndpointConfig {
        IdentityEndpointConfig::new(server.uri())
    }

    #[tokio::test]
    async fn test_http_provider_parses_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer session-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": "u-42",
                "role": "manager",
                "permissions": ["orders:view", "orders:edit", "legacy:thing", "orders:manage_keys"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(&endpoint_for(&server))
            .unwrap()
            .with_bearer_token("session-token");
        let payload = provider.fetch_identity().await.unwrap();

        assert_eq!(payload.user_id.as_deref(), Some("u-42"));
        assert_eq!(payload.role, Role::Manager);

        // Unknown tokens are carried on the wire but never granted
        let identity = payload.into_identity();
        assert_eq!(identity.permissions.len(), 2);
    }

    #[tokio::test]
    async fn test_http_provider_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(&endpoint_for(&server)).unwrap();
        let err = provider.fetch_identity().await.unwrap_err();

        assert!(matches!(err, RbacError::IdentityFetch(_)));
        assert!(err.to_string().contains("503"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_http_provider_rejects_unknown_role() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "role": "superuser",
                "permissions": []
            })))
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(&endpoint_for(&server)).unwrap();
        let err = provider.fetch_identity().await.unwrap_err();
        assert!(matches!(err, RbacError::Serialization(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_http_provider_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>sign in</html>"))
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(&endpoint_for(&server)).unwrap();
        let err = provider.fetch_identity().await.unwrap_err();
        assert!(matches!(err, RbacError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[tokio::test]
    async fn test_store_over_http_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "role": "staff",
                "permissions": ["orders:view", "orders:update_status"]
            })))
            .mount(&server)
            .await;

        let config = RbacConfig {
            identity_endpoint: Some(endpoint_for(&server)),
            ..RbacConfig::default()
        };
        let provider = HttpIdentityProvider::new(&endpoint_for(&server)).unwrap();
        let store = Arc::new(SessionStore::from_config(Arc::new(provider), &config));
        let rbac = RbacFacade::with_config(store.clone(), &config);

        assert!(rbac.is_loading());
        assert!(store.ensure_fresh().await.unwrap());
        assert_eq!(rbac.role(), Some(Role::Staff));
        assert!(rbac.can_view(Resource::Orders));
        assert!(!rbac.can_view(Resource::Products));
        assert!(!store.ensure_fresh().await.unwrap());
    }

    #[tokio::test]
    async fn test_ttl_drives_refetch() {
        let provider = Arc::new(ScriptedProvider::new([
            Ok(IdentityFactory::payload(Role::Staff)),
            Ok(IdentityFactory::payload(Role::Manager)),
        ]));
        let clock = Arc::new(ManualClock::new());
        let store = SessionStore::new(provider.clone(), clock.clone(), Duration::from_secs(60));

        store.ensure_fresh().await.unwrap();
        store.ensure_fresh().await.unwrap();
        assert_eq!(provider.calls(), 1);
        assert_eq!(store.snapshot().role, Some(Role::Staff));

        clock.advance(Duration::from_secs(61));
        store.ensure_fresh().await.unwrap();
        assert_eq!(provider.calls(), 2);
        assert_eq!(store.snapshot().role, Some(Role::Manager));
    }

    #[tokio::test]
    async fn test_recovery_after_failure() {
        let provider = ScriptedProvider::new([
            Err(RbacError::identity_fetch("timeout")),
            Ok(IdentityFactory::payload(Role::Admin)),
        ]);
        let store = Arc::new(SessionStore::new(
            Arc::new(provider),
            Arc::new(ManualClock::new()),
            Duration::from_secs(300),
        ));
        let rbac = RbacFacade::new(store.clone());

        assert!(store.ensure_fresh().await.is_err());
        assert!(!rbac.is_loading());
        assert!(rbac.error().is_some());
        assert!(!rbac.can_view(Resource::Orders));

        assert!(store.ensure_fresh().await.unwrap());
        assert!(rbac.error().is_none());
        assert!(rbac.can_view(Resource::Settings));
    }
}
