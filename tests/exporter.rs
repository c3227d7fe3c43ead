#![cfg(feature = "exporter")]

use sentinel_breaker::{config::ConfigEntity, exporter};
use std::net::TcpListener;

fn use_exporter_addr(addr: &str) {
    let mut entity = ConfigEntity::new();
    entity.config.log.exporter.addr = addr.into();
    sentinel_breaker::config::reset_global_config(entity);
}

#[test]
fn init_retries_after_failed_start() {
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    use_exporter_addr(&occupied.local_addr().unwrap().to_string());
    assert!(exporter::init().is_err());

    use_exporter_addr("127.0.0.1:0");
    exporter::init().unwrap();
    // already serving
    exporter::init().unwrap();
}
