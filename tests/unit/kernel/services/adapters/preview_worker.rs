use super::*;
use crate::kernel::services::bus::{event_bus, EventReceiver};
use crate::models::FileNode;

const WAIT: Duration = Duration::from_secs(5);

fn next_event(rx: &mut EventReceiver) -> PreviewEvent {
    rx.recv_timeout(WAIT).unwrap()
}

/// Skips notices.
fn next_bundle(rx: &mut EventReceiver) -> crate::preview::Bundle {
    loop {
        match next_event(rx) {
            PreviewEvent::BundleReady(bundle) => return bundle,
            PreviewEvent::Notice { .. } => continue,
            other => panic!("unexpected event: {other:?}"),
        }
    }
}

fn site(css: &str) -> Arc<FileTree> {
    Arc::new(FileTree::from_nodes(vec![
        FileNode::file("index.html", "<head></head><body></body>"),
        FileNode::file("a.css", css),
    ]))
}

#[test]
fn test_submit_produces_bundle() {
    let (events, mut rx) = event_bus();
    let worker = PreviewWorker::spawn(PreviewConfig::default(), events).unwrap();

    worker.submit(site("p{}"));
    let bundle = next_bundle(&mut rx);
    assert!(bundle.changed);
    assert_eq!(bundle.entry.as_deref(), Some("index.html"));
    assert!(bundle.html.contains("p{}"));

    worker.shutdown();
}

#[test]
fn test_identical_resubmit_is_unchanged() {
    let (events, mut rx) = event_bus();
    let worker = PreviewWorker::spawn(PreviewConfig::default(), events).unwrap();

    worker.submit(site("p{}"));
    assert!(next_bundle(&mut rx).changed);
    worker.submit(site("p{}"));
    assert!(!next_bundle(&mut rx).changed);

    worker.shutdown();
}

#[test]
fn test_latest_tree_wins() {
    let (events, mut rx) = event_bus();
    let worker = PreviewWorker::spawn(PreviewConfig::default(), events).unwrap();

    for i in 0..20 {
        worker.submit(site(&format!("p{{z-index:{i}}}")));
    }

    // 中间的树可能被跳过，但最后一次提交一定会被打包
    let mut last = next_bundle(&mut rx);
    while !last.html.contains("z-index:19") {
        last = next_bundle(&mut rx);
    }
    assert!(last.sequence <= 20);

    worker.shutdown();
}

#[test]
fn test_entry_changes_produce_notices() {
    let (events, mut rx) = event_bus();
    let worker = PreviewWorker::spawn(PreviewConfig::default(), events).unwrap();

    worker.submit(site("p{}"));
    assert!(matches!(next_event(&mut rx), PreviewEvent::BundleReady(_)));
    match next_event(&mut rx) {
        PreviewEvent::Notice { level, message } => {
            assert_eq!(level, NoticeLevel::Info);
            assert!(message.contains("index.html"));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    // 入口未变化时没有通知
    worker.submit(site("p{color:red}"));
    assert!(matches!(next_event(&mut rx), PreviewEvent::BundleReady(_)));

    worker.submit(Arc::new(FileTree::from_nodes(vec![FileNode::file("a.css", "")])));
    assert!(matches!(next_event(&mut rx), PreviewEvent::BundleReady(_)));
    assert!(matches!(
        next_event(&mut rx),
        PreviewEvent::Notice {
            level: NoticeLevel::Warning,
            ..
        }
    ));

    worker.shutdown();
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_shutdown_without_submit() {
    let (events, mut rx) = event_bus();
    let worker = PreviewWorker::spawn(PreviewConfig::default(), events).unwrap();
    worker.shutdown();
    assert!(rx.try_recv().is_err());
}
