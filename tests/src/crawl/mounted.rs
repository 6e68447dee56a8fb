use std::fs;
use std::sync::Arc;

use sharecrawl_common::config::ScanConfig;
use sharecrawl_common::network::target::Target;
use sharecrawl_common::pattern::PatternSet;
use sharecrawl_core::session::MountedShareConnector;
use sharecrawl_core::{HostOutcome, Scheduler};
use tempfile::TempDir;

use super::fake::{FixedLabel, NoLabels, context};

/// <root>/10.0.0.1/data/{passwords.txt, docs/{budget.xls, archive/old_pass.zip}}
fn mount_root() -> TempDir {
    let root = TempDir::new().unwrap();
    let share = root.path().join("10.0.0.1").join("data");
    fs::create_dir_all(share.join("docs").join("archive")).unwrap();
    fs::write(share.join("passwords.txt"), "hunter2").unwrap();
    fs::write(share.join("docs").join("budget.xls"), "1,2,3").unwrap();
    fs::write(share.join("docs").join("archive").join("old_pass.zip"), "PK").unwrap();
    root
}

#[tokio::test]
async fn spiders_a_mounted_share() {
    let root = mount_root();
    let scratch = TempDir::new().unwrap();
    let connector = MountedShareConnector::new(root.path()).without_probe();
    let mut config = ScanConfig::new("data");
    config.depth = 1;
    config.chance = 1.0;
    config.scratch_dir = Some(scratch.path().to_path_buf());
    let ctx = context(
        config,
        PatternSet::new(vec!["pass".to_string()]),
        Arc::new(connector),
        Arc::new(NoLabels),
    );

    let HostOutcome::Completed(stats) = ctx.task(Target::new("10.0.0.1")).run().await else {
        panic!("mounted host should have connected");
    };

    assert_eq!(stats.directories_listed, 2);
    assert_eq!(stats.matches, 1);
    assert_eq!(stats.files_collected, 2);
    assert_eq!(stats.retrieval_failures, 0);
    assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn mount_found_by_label() {
    let root = TempDir::new().unwrap();
    let share = root.path().join("FILESRV").join("data");
    fs::create_dir_all(&share).unwrap();
    fs::write(share.join("pass.txt"), "x").unwrap();

    let ctx = context(
        ScanConfig::new("data"),
        PatternSet::new(vec!["pass".to_string()]),
        Arc::new(MountedShareConnector::new(root.path()).without_probe()),
        Arc::new(FixedLabel("FILESRV")),
    );

    let outcome = ctx.task(Target::new("10.9.9.9")).run().await;
    assert!(matches!(outcome, HostOutcome::Completed(s) if s.matches == 1));
}

#[tokio::test]
async fn unmounted_hosts_are_reported_not_fatal() {
    let root = mount_root();
    let ctx = context(
        ScanConfig::new("data"),
        PatternSet::new(vec!["pass".to_string()]),
        Arc::new(MountedShareConnector::new(root.path()).without_probe()),
        Arc::new(NoLabels),
    );

    let summary = Scheduler::new(2)
        .run(
            vec![Target::new("10.0.0.7"), Target::new("10.0.0.1")],
            |t| ctx.task(t).run(),
        )
        .await;

    assert_eq!(summary.hosts_failed, 1);
    assert_eq!(summary.hosts_connected, 1);
    assert_eq!(summary.walk.matches, 1);
}
