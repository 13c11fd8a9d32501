#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tempest_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
station:
  api_key: "k"
  station_id: "1"
  latitude: 10.0
  longitude: 20.0
upstream:
  poll_interval: 60 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn missing_required_station_fields_fail() {
    let no_key = r#"
version: 1
station:
  station_id: "1"
"#;
    let err = config::load_from_str(no_key).expect_err("api_key is required");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");

    let no_station = "version: 1\n";
    assert!(config::load_from_str(no_station).is_err());

    let blank_key = r#"
version: 1
station:
  api_key: "  "
  station_id: "1"
  latitude: 10.0
  longitude: 20.0
"#;
    assert!(config::load_from_str(blank_key).is_err());

    let no_coordinates = r#"
version: 1
station:
  api_key: "k"
  station_id: "1"
"#;
    let err = config::load_from_str(no_coordinates).expect_err("coordinates are required");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
    assert!(err.to_string().contains("latitude"), "{err}");

    let no_longitude = r#"
version: 1
station:
  api_key: "k"
  station_id: "1"
  latitude: 10.0
"#;
    let err = config::load_from_str(no_longitude).expect_err("longitude is required");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
    assert!(err.to_string().contains("longitude"), "{err}");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
station:
  api_key: "secret"
  station_id: "12345"
  latitude: 47.6062
  longitude: -122.3321
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.station.station_id, "12345");
    assert_eq!(cfg.station.latitude, 47.6062);
    assert_eq!(cfg.station.longitude, -122.3321);
    assert_eq!(cfg.upstream.poll_interval_secs, 60);
    assert_eq!(cfg.upstream.timeout_ms, 10_000);
    assert_eq!(cfg.gateway.listen_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.gateway.base_path, "/tempest");
    assert_eq!(cfg.sessions.ttl_secs, 86_400);
}

#[test]
fn history_capacity_follows_interval_unless_set() {
    let derived = r#"
version: 1
station: { api_key: "k", station_id: "1", latitude: 10.0, longitude: 20.0 }
upstream: { poll_interval_secs: 15 }
"#;
    let cfg = config::load_from_str(derived).unwrap();
    assert_eq!(cfg.upstream.history_capacity(), 5760);

    let default_interval = r#"
version: 1
station: { api_key: "k", station_id: "1", latitude: 10.0, longitude: 20.0 }
"#;
    let cfg = config::load_from_str(default_interval).unwrap();
    assert_eq!(cfg.upstream.history_capacity(), 1440);

    let explicit = r#"
version: 1
station: { api_key: "k", station_id: "1", latitude: 10.0, longitude: 20.0 }
upstream: { history_capacity: 100 }
"#;
    let cfg = config::load_from_str(explicit).unwrap();
    assert_eq!(cfg.upstream.history_capacity(), 100);
}

#[test]
fn out_of_range_values_fail() {
    let cases = [
        "version: 2\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 91, longitude: 20 }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\nupstream: { poll_interval_secs: 0 }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\nupstream: { api_template: 'https://x/{api_key}' }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\nupstream: { history_capacity: 0 }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\ngateway: { base_path: 'tempest' }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\ngateway: { base_path: '/tempest/' }\n",
        "version: 1\nstation: { api_key: k, station_id: '1', latitude: 10, longitude: 20 }\nsessions: { ttl_secs: 1 }\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.client_code().as_str(), "BAD_CONFIG", "case={case}");
    }
}
