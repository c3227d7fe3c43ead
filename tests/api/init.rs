use sentinel_breaker::{
    circuitbreaker::{self, State},
    config::{self, BreakerConfig, ConfigEntity},
    logging,
};

// init functions share the process-wide config and registry, so they run in one test
#[test]
fn init() {
    sentinel_breaker::init_default().unwrap_or_else(|err| logging::error!("{:?}", err));
    assert_eq!(config::app_name(), config::DEFAULT_APP_NAME);

    let mut entity = ConfigEntity::new();
    entity.config.app.app_name = "init-test".into();
    let mut payment = BreakerConfig::new("init-payment");
    payment.max_requests = 3;
    entity.config.breakers.push(payment);
    sentinel_breaker::init_with_config(entity).unwrap();
    assert_eq!(config::app_name(), "init-test");
    let breaker = circuitbreaker::get_breaker("init-payment").unwrap();
    assert_eq!(breaker.settings().max_requests(), 3);
    assert_eq!(breaker.current_state(), State::Closed);

    let mut invalid = ConfigEntity::new();
    invalid.config.breakers.push(BreakerConfig::default());
    assert!(sentinel_breaker::init_with_config(invalid).is_err());

    let mut config_path = String::from("testdata/config/breaker.yaml");
    sentinel_breaker::init_with_config_file(&mut config_path).unwrap();
    assert_eq!(config::app_name(), "breaker_demo");
    assert!(circuitbreaker::get_breaker("init-payment").is_none());
    let demo = circuitbreaker::get_breaker("demo-service").unwrap();
    assert_eq!(demo.settings().max_requests(), 3);
    assert_eq!(demo.settings().timeout().as_secs(), 5);

    let mut missing = String::from("testdata/config/missing.yaml");
    assert!(sentinel_breaker::init_with_config_file(&mut missing).is_err());
}
