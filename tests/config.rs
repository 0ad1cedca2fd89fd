use std::time::Duration;
use store_gateway::config::AppConfig;

// Single test: environment variables are process-global, so the whole
// sequence runs in one function instead of racing parallel tests.
#[test]
fn provider_timeout_parses_defaults_and_rejects_garbage() {
    std::env::set_var("GATEWAY_SECRET_KEY", "config-test-secret");
    std::env::set_var("ENABLED_SERVICES", "mock");
    std::env::set_var("DATA_SOURCE", "memory");

    std::env::remove_var("PROVIDER_TIMEOUT_MS");
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.provider_timeout, Duration::from_millis(5000));

    std::env::set_var("PROVIDER_TIMEOUT_MS", "250");
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.provider_timeout, Duration::from_millis(250));

    // A present but unparsable value is a startup error, not a silent
    // fallback to the default.
    std::env::set_var("PROVIDER_TIMEOUT_MS", "5s");
    let err = AppConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("PROVIDER_TIMEOUT_MS"));

    std::env::remove_var("PROVIDER_TIMEOUT_MS");
    std::env::remove_var("GATEWAY_SECRET_KEY");
    std::env::remove_var("ENABLED_SERVICES");
    std::env::remove_var("DATA_SOURCE");
}
