// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolver dispatch over mock modules.
//!
//! Only one resolver may exist per process, so every test that builds one
//! runs serially.

use std::fs;
use std::sync::Arc;

use lvfs::Resolver;
use lvfs_config::LvfsConfig;
use lvfs_core::{ContentPlugin, ErrorCode, LvfsError, ProtocolPlugin};
use lvfs_test_utils::{CallCounter, MockContentPlugin, MockLoader, MockProtocolPlugin};
use serial_test::serial;
use tempfile::TempDir;
use tracing_test::traced_test;

fn config(modules: &[&str], fallback: bool) -> LvfsConfig {
    let mut config = LvfsConfig::default();
    config.plugins.modules = modules.iter().map(|m| m.to_string()).collect();
    config.resolver.default_fallback = fallback;
    config
}

fn succeeding(tag: &str, counter: &CallCounter) -> impl Fn() -> Arc<dyn ProtocolPlugin> + Send + Sync + 'static {
    let tag = tag.to_string();
    let counter = counter.clone();
    move || {
        MockProtocolPlugin::succeeding(tag.clone(), "text/plain")
            .counting(counter.clone())
            .into_arc()
    }
}

fn failing(code: ErrorCode, counter: &CallCounter) -> impl Fn() -> Arc<dyn ProtocolPlugin> + Send + Sync + 'static {
    let counter = counter.clone();
    move || MockProtocolPlugin::failing(code).counting(counter.clone()).into_arc()
}

fn claiming(tag: &str, counter: &CallCounter) -> impl Fn() -> Arc<dyn ContentPlugin> + Send + Sync + 'static {
    let tag = tag.to_string();
    let counter = counter.clone();
    move || {
        MockContentPlugin::claiming(tag.clone(), "application/x-claimed")
            .counting(counter.clone())
            .into_arc()
    }
}

#[test]
#[serial]
fn uri_without_schema_goes_to_file_plugins() {
    let calls = CallCounter::new();
    let loader = MockLoader::new().with_protocol("m", "file", succeeding("p1", &calls));
    let resolver = Resolver::new(&config(&["m"], false), &loader).unwrap();

    let entry = resolver.open("/tmp/x.txt").unwrap();
    assert_eq!(entry.location(), "p1:/tmp/x.txt");

    let entry = resolver.open("file:///tmp/x.txt").unwrap();
    assert_eq!(entry.location(), "p1:/tmp/x.txt");
    assert_eq!(calls.get(), 2);
}

#[test]
#[serial]
fn first_successful_plugin_wins() {
    let (c1, c2) = (CallCounter::new(), CallCounter::new());
    let loader = MockLoader::new()
        .with_protocol("m1", "mock", succeeding("p1", &c1))
        .with_protocol("m2", "mock", succeeding("p2", &c2));
    let resolver = Resolver::new(&config(&["m1", "m2"], false), &loader).unwrap();

    for _ in 0..3 {
        let entry = resolver.open("mock://a").unwrap();
        assert_eq!(entry.location(), "p1:a");
    }
    assert_eq!(c1.get(), 3);
    assert_eq!(c2.get(), 0);
}

#[test]
#[serial]
fn load_order_is_priority_order() {
    let (c1, c2) = (CallCounter::new(), CallCounter::new());
    let loader = MockLoader::new()
        .with_protocol("m1", "mock", succeeding("p1", &c1))
        .with_protocol("m2", "mock", succeeding("p2", &c2));
    let resolver = Resolver::new(&config(&["m2", "m1"], false), &loader).unwrap();

    assert_eq!(resolver.open("mock://a").unwrap().location(), "p2:a");
    assert_eq!(c1.get(), 0);
}

#[test]
#[serial]
fn failing_plugin_passes_to_next() {
    let (c1, c2) = (CallCounter::new(), CallCounter::new());
    let loader = MockLoader::new()
        .with_protocol("m", "mock", failing(ErrorCode::NOT_FOUND, &c1))
        .with_protocol("m", "mock", succeeding("p2", &c2));
    let resolver = Resolver::new(&config(&["m"], false), &loader).unwrap();

    assert_eq!(resolver.open("mock://a").unwrap().location(), "p2:a");
    assert_eq!((c1.get(), c2.get()), (1, 1));
}

#[test]
#[serial]
fn all_failing_reports_last_plugin_error() {
    let calls = CallCounter::new();
    let loader = MockLoader::new()
        .with_protocol("m1", "mock", failing(ErrorCode::NOT_FOUND, &calls))
        .with_protocol("m2", "mock", failing(ErrorCode::PERMISSION_DENIED, &calls));
    let resolver = Resolver::new(&config(&["m1", "m2"], false), &loader).unwrap();

    match resolver.open("mock://secret") {
        Err(LvfsError::NotOpened { schema, path, error }) => {
            assert_eq!(schema, "mock");
            assert_eq!(path, "secret");
            assert_eq!(error, ErrorCode::PERMISSION_DENIED);
        }
        other => panic!("expected NotOpened, got {other:?}"),
    }
    assert_eq!(calls.get(), 2);
}

#[test]
#[serial]
fn long_schema_fails_before_any_plugin() {
    let calls = CallCounter::new();
    let loader = MockLoader::new().with_protocol("m", "file", succeeding("p1", &calls));
    let mut config = config(&["m"], false);
    config.resolver.max_schema_length = 8;
    let resolver = Resolver::new(&config, &loader).unwrap();

    assert!(matches!(
        resolver.open("abcdefgh://x"),
        Err(LvfsError::SchemaTooLong { len: 8, max: 8 })
    ));
    assert_eq!(calls.get(), 0);
    assert!(matches!(
        resolver.open("abcdefg://x"),
        Err(LvfsError::NoProtocolHandler { .. })
    ));
}

#[test]
#[serial]
fn unknown_schema_has_no_handler() {
    let loader = MockLoader::new();
    let resolver = Resolver::new(&config(&[], true), &loader).unwrap();

    match resolver.open("zip://a.zip") {
        Err(LvfsError::NoProtocolHandler { schema }) => assert_eq!(schema, "zip"),
        other => panic!("expected NoProtocolHandler, got {other:?}"),
    }
}

#[test]
#[serial]
#[traced_test]
fn unclaimed_entry_is_returned_unchanged() {
    let (p, c) = (CallCounter::new(), CallCounter::new());
    let loader = MockLoader::new()
        .with_protocol("m", "mock", succeeding("p1", &p))
        .with_content("m", "text/plain", {
            let c = c.clone();
            move || MockContentPlugin::declining(ErrorCode::IO).counting(c.clone()).into_arc()
        });
    let resolver = Resolver::new(&config(&["m"], false), &loader).unwrap();

    let entry = resolver.open("mock://a").unwrap();
    assert_eq!(entry.location(), "p1:a");
    assert_eq!(entry.entry_type().name(), "text/plain");
    assert_eq!(c.get(), 1);
    assert!(logs_contain("content plugin declined"));
    assert!(logs_contain(&ErrorCode::IO.to_string()));

    let raw = resolver.open_entry("mock://b").unwrap();
    assert!(matches!(
        resolver.enrich(&raw),
        Err(LvfsError::NoContentHandler { type_name }) if type_name == "text/plain"
    ));
}

#[test]
#[serial]
fn first_claiming_content_plugin_replaces_entry() {
    let (p, c1, c2) = (CallCounter::new(), CallCounter::new(), CallCounter::new());
    let loader = MockLoader::new()
        .with_protocol("m1", "mock", succeeding("p1", &p))
        .with_content("m1", "text/plain", claiming("c1", &c1))
        .with_content("m2", "text/plain", claiming("c2", &c2));
    let resolver = Resolver::new(&config(&["m1", "m2"], false), &loader).unwrap();

    let entry = resolver.open("mock://a").unwrap();
    assert_eq!(entry.location(), "c1:p1:a");
    assert_eq!(entry.entry_type().name(), "application/x-claimed");
    assert_eq!((c1.get(), c2.get()), (1, 0));
}

#[test]
#[serial]
fn only_one_resolver_at_a_time() {
    let loader = MockLoader::new();
    let first = Resolver::new(&config(&[], false), &loader).unwrap();
    assert!(Resolver::is_alive());
    assert!(matches!(
        Resolver::new(&config(&[], false), &loader),
        Err(LvfsError::ResolverExists)
    ));

    drop(first);
    assert!(!Resolver::is_alive());
    assert!(Resolver::new(&config(&[], false), &loader).is_ok());
}

#[test]
#[serial]
fn teardown_releases_plugins_before_unload() {
    let calls = CallCounter::new();
    let loader = MockLoader::new()
        .with_protocol("m1", "mock", succeeding("p1", &calls))
        .with_content("m1", "text/plain", claiming("c1", &calls))
        .with_protocol("m2", "mock", succeeding("p2", &calls));
    let resolver = Resolver::new(&config(&["m1", "m2"], false), &loader).unwrap();
    let entry = resolver.open("mock://a").unwrap();
    assert_eq!(loader.probe().live_plugins(), 3);

    drop(resolver);
    drop(entry);
    let probe = loader.probe();
    assert!(probe.violations().is_empty(), "{:?}", probe.violations());
    assert_eq!(probe.live_plugins(), 0);
    let events = probe.events();
    assert_eq!(&events[events.len() - 2..], ["unload m1", "unload m2"]);
}

#[test]
#[serial]
#[traced_test]
fn broken_modules_are_skipped() {
    let calls = CallCounter::new();
    let loader = MockLoader::new()
        .with_empty_package("empty")
        .with_missing_entry_point("no-entry")
        .with_protocol("good", "mock", succeeding("p1", &calls));
    let resolver =
        Resolver::new(&config(&["missing", "empty", "no-entry", "good"], false), &loader).unwrap();

    let report = resolver.load_report();
    assert_eq!(report.loaded, ["good"]);
    assert_eq!(report.failed.len(), 3);
    assert!(resolver.open("mock://a").is_ok());
    assert!(logs_contain("failed to load plugin module"));

    // The empty module was unloaded right away.
    assert!(loader.probe().events().contains(&"unload empty".to_string()));
}

#[test]
#[serial]
fn default_plugin_serves_file_when_nothing_is_registered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.txt");
    fs::write(&path, "x").unwrap();
    let loader = MockLoader::new();

    let resolver = Resolver::new(&config(&[], true), &loader).unwrap();
    let entry = resolver.open(path.to_str().unwrap()).unwrap();
    assert_eq!(entry.entry_type().name(), "text/plain");
    assert!(matches!(
        resolver.open("mock://a"),
        Err(LvfsError::NoProtocolHandler { .. })
    ));
    drop(resolver);

    let resolver = Resolver::new(&config(&[], false), &loader).unwrap();
    assert!(matches!(
        resolver.open(path.to_str().unwrap()),
        Err(LvfsError::NoProtocolHandler { .. })
    ));
}

#[test]
#[serial]
fn default_plugin_runs_after_registered_file_plugins_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.txt");
    fs::write(&path, "x").unwrap();
    let calls = CallCounter::new();
    let loader =
        MockLoader::new().with_protocol("m", "file", failing(ErrorCode::PERMISSION_DENIED, &calls));

    let resolver = Resolver::new(&config(&["m"], true), &loader).unwrap();
    let entry = resolver.open(path.to_str().unwrap()).unwrap();
    assert_eq!(entry.location(), path.to_str().unwrap());
    assert_eq!(calls.get(), 1);

    match resolver.open(dir.path().join("absent").to_str().unwrap()) {
        Err(LvfsError::NotOpened { error, .. }) => assert_eq!(error, ErrorCode::NOT_FOUND),
        other => panic!("expected NotOpened, got {other:?}"),
    }
}

#[test]
#[serial]
fn concurrent_opens_share_the_resolver() {
    let calls = CallCounter::new();
    let loader = MockLoader::new().with_protocol("m", "mock", succeeding("p1", &calls));
    let resolver = Resolver::new(&config(&["m"], false), &loader).unwrap();

    std::thread::scope(|s| {
        for i in 0..8 {
            let resolver = &resolver;
            s.spawn(move || {
                for j in 0..50 {
                    let uri = format!("mock://{i}/{j}");
                    let entry = resolver.open(&uri).unwrap();
                    assert_eq!(entry.location(), format!("p1:{i}/{j}"));
                }
            });
        }
    });
    assert_eq!(calls.get(), 400);
}

#[test]
#[serial]
fn zero_schema_limit_is_rejected() {
    let mut config = config(&[], true);
    config.resolver.max_schema_length = 0;
    assert!(matches!(
        Resolver::new(&config, &MockLoader::new()),
        Err(LvfsError::Config(_))
    ));
    assert!(!Resolver::is_alive());
}
