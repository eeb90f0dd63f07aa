//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use merchant_rbac::config::Validate;
    use merchant_rbac::{Config, IdentityEndpointConfig, RbacConfig, RbacError};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_file() {
        let file = write_config(
            r#"
rbac:
  session_ttl_secs: 45
  fallback_route: "/orders"
  redirect_on_denied: true
  log_denials: false
  identity_endpoint:
    base_url: "https://merchant.example.com/api/"
    path: "/v2/me"
    timeout_secs: 3
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        let rbac = config.rbac();
        assert_eq!(rbac.session_ttl(), Duration::from_secs(45));
        assert_eq!(rbac.fallback_route, "/orders");
        assert!(rbac.redirect_on_denied);
        assert!(!rbac.log_denials);

        let endpoint = rbac.identity_endpoint.as_ref().unwrap();
        assert_eq!(endpoint.url(), "https://merchant.example.com/api/v2/me");
        assert_eq!(endpoint.timeout_secs, 3);
    }

    #[tokio::test]
    async fn test_bad_endpoint_scheme_rejected() {
        let file = write_config(
            r#"
rbac:
  identity_endpoint:
    base_url: "ftp://merchant.example.com"
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, RbacError::Config(_)));
        assert!(err.to_string().contains("scheme"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("rbac: [not, a, map");
        assert!(matches!(
            Config::from_file(file.path()).await,
            Err(RbacError::Yaml(_))
        ));
    }

    #[test]
    fn test_validate_trait_on_models() {
        assert!(RbacConfig::default().validate().is_ok());

        let endpoint = IdentityEndpointConfig {
            timeout_secs: 0,
            ..IdentityEndpointConfig::new("https://id.example.com")
        };
        assert!(endpoint.validate().unwrap_err().contains("timeout_secs"));
    }
}
