use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use sharecrawl_common::config::ScanConfig;
use sharecrawl_common::network::target::Target;
use sharecrawl_common::pattern::PatternSet;
use sharecrawl_core::label::DEFAULT_REMOTE_LABEL;
use sharecrawl_core::{HostOutcome, Scheduler, TaskContext};

use super::fake::*;

fn targets(hosts: &[&str]) -> Vec<Target> {
    hosts.iter().map(|h| Target::new(*h)).collect()
}

fn flat_share() -> Tree {
    tree(&[("/", vec![file("passwords.txt"), file("notes.txt")])])
}

fn run_ctx(server: &Arc<FakeServer>, config: ScanConfig) -> TaskContext {
    context(
        config,
        PatternSet::new(vec!["pass".to_string()]),
        Arc::new(FakeConnector(Arc::clone(server))),
        Arc::new(FixedLabel("FILESRV")),
    )
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn task_future_can_cross_threads() {
    let server = Arc::new(FakeServer::new());
    let mut config = ScanConfig::new("data");
    config.delay = Duration::from_millis(1);
    let ctx = run_ctx(&server, config);

    let task = ctx.task(Target::new("10.0.0.1")).run();
    assert_send(&task);
}

#[tokio::test]
async fn delayed_tasks_run_on_the_pool() {
    let server = Arc::new(
        FakeServer::new()
            .host("10.0.0.1", flat_share())
            .host("10.0.0.2", flat_share()),
    );
    let mut config = ScanConfig::new("data");
    config.delay = Duration::from_millis(5);
    config.chance = 1.0;
    let ctx = run_ctx(&server, config);

    let summary = Scheduler::new(2)
        .run(targets(&["10.0.0.1", "10.0.0.2"]), |t| ctx.task(t).run())
        .await;

    assert_eq!(summary.hosts_connected, 2);
    assert_eq!(summary.walk.files_collected, 4);
}

#[tokio::test]
async fn unreachable_host_does_not_stop_the_others() {
    let server = Arc::new(
        FakeServer::new()
            .host("10.0.0.2", flat_share())
            .host("10.0.0.3", flat_share()),
    );
    let ctx = run_ctx(&server, ScanConfig::new("data"));

    let summary = Scheduler::new(1)
        .run(targets(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]), |t| ctx.task(t).run())
        .await;

    assert_eq!(
        *server.connects.lock().unwrap(),
        vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]
    );
    assert_eq!(summary.hosts_attempted, 3);
    assert_eq!(summary.hosts_failed, 1);
    assert_eq!(summary.hosts_connected, 2);
    assert_eq!(summary.walk.matches, 2);
    assert_eq!(server.listed_on("10.0.0.2"), vec!["/"]);
    assert_eq!(server.listed_on("10.0.0.3"), vec!["/"]);
}

#[tokio::test]
async fn open_sessions_never_exceed_thread_count() {
    let mut server = FakeServer::new().hold(Duration::from_millis(40));
    for i in 1..=5 {
        server = server.host(&format!("10.0.0.{i}"), flat_share());
    }
    let server = Arc::new(server);
    let ctx = run_ctx(&server, ScanConfig::new("data"));

    let hosts = ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5"];
    let summary = Scheduler::new(2)
        .run(targets(&hosts), |t| ctx.task(t).run())
        .await;

    assert_eq!(summary.hosts_connected, 5);
    assert_eq!(server.peak_open.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_label_falls_back_to_default() {
    let server = Arc::new(FakeServer::new().host("10.0.0.9", flat_share()));
    let ctx = context(
        ScanConfig::new("data"),
        PatternSet::default(),
        Arc::new(FakeConnector(Arc::clone(&server))),
        Arc::new(NoLabels),
    );

    let outcome = ctx.task(Target::new("10.0.0.9")).run().await;

    assert!(matches!(outcome, HostOutcome::Completed(_)));
    assert_eq!(*server.labels.lock().unwrap(), vec![DEFAULT_REMOTE_LABEL]);
}

#[tokio::test]
async fn depth_and_failures_are_per_branch() {
    let share = tree(&[
        ("/", vec![dir("."), dir(".."), dir("locked"), dir("open")]),
        ("/open", vec![file("db_password.kdbx"), dir("inner")]),
        ("/open/inner", vec![file("password_old.txt"), dir("deepest")]),
        ("/open/inner/deepest", vec![file("password_never.txt")]),
    ]);
    let server = Arc::new(FakeServer::new().host("10.0.0.1", share));
    let mut config = ScanConfig::new("data");
    config.depth = 2;
    let ctx = run_ctx(&server, config);

    let HostOutcome::Completed(stats) = ctx.task(Target::new("10.0.0.1")).run().await else {
        panic!("host should have connected");
    };

    assert_eq!(
        server.listed_on("10.0.0.1"),
        vec!["/", "/locked", "/open", "/open/inner"]
    );
    assert_eq!(stats.listing_failures, 1);
    assert_eq!(stats.directories_listed, 3);
    assert_eq!(stats.matches, 2);
}

#[tokio::test]
async fn hidden_files_are_never_collected() {
    let share = tree(&[("/", vec![file(".password"), file("password.txt"), dir("dir")])]);
    let server = Arc::new(FakeServer::new().host("10.0.0.1", share));
    let mut config = ScanConfig::new("data");
    config.chance = 1.0;
    let ctx = run_ctx(&server, config);

    let HostOutcome::Completed(stats) = ctx.task(Target::new("10.0.0.1")).run().await else {
        panic!("host should have connected");
    };

    assert_eq!(server.retrieved_on("10.0.0.1"), vec!["/password.txt"]);
    assert_eq!(stats.files_collected, 1);
    assert_eq!(stats.matches, 2);
}

#[tokio::test]
async fn subfolder_is_the_starting_point() {
    let share = tree(&[
        ("/", vec![dir("users")]),
        ("/users", vec![file("password.txt")]),
    ]);
    let server = Arc::new(FakeServer::new().host("10.0.0.1", share));
    let mut config = ScanConfig::new("data");
    config.subfolder = "users".to_string();
    let ctx = run_ctx(&server, config);

    ctx.task(Target::new("10.0.0.1")).run().await;

    assert_eq!(server.listed_on("10.0.0.1"), vec!["/users"]);
}
