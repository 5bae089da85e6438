use super::*;

const QUIET: Duration = Duration::from_millis(100);

#[test]
fn test_not_due_before_quiet_period() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    debouncer.touch("a", 1, start);

    assert!(debouncer.due(start + Duration::from_millis(99)).is_empty());
    assert_eq!(debouncer.due(start + QUIET), vec![("a", 1)]);
    assert!(debouncer.is_empty());
}

#[test]
fn test_touch_restarts_timer_and_keeps_latest_value() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    debouncer.touch("a", 1, start);
    debouncer.touch("a", 2, start + Duration::from_millis(80));

    assert!(debouncer.due(start + Duration::from_millis(120)).is_empty());
    assert_eq!(debouncer.peek(&"a"), Some(&2));
    assert_eq!(
        debouncer.due(start + Duration::from_millis(180)),
        vec![("a", 2)]
    );
}

#[test]
fn test_keys_are_independent() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    debouncer.touch("a", 1, start);
    debouncer.touch("b", 2, start + Duration::from_millis(50));

    assert_eq!(debouncer.due(start + QUIET), vec![("a", 1)]);
    assert!(debouncer.is_pending(&"b"));
    assert_eq!(
        debouncer.due(start + Duration::from_millis(150)),
        vec![("b", 2)]
    );
}

#[test]
fn test_take_and_drain() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    debouncer.touch("a", 1, start);
    debouncer.touch("b", 2, start);

    assert_eq!(debouncer.take(&"a"), Some(1));
    assert_eq!(debouncer.take(&"a"), None);

    let drained = debouncer.drain();
    assert_eq!(drained, vec![("b", 2)]);
    assert!(debouncer.is_empty());
}

#[test]
fn test_next_deadline() {
    let start = Instant::now();
    let mut debouncer: Debouncer<&str, ()> = Debouncer::new(QUIET);
    assert_eq!(debouncer.next_deadline(start), None);

    debouncer.touch("a", (), start);
    debouncer.touch("b", (), start + Duration::from_millis(30));
    assert_eq!(
        debouncer.next_deadline(start + Duration::from_millis(40)),
        Some(Duration::from_millis(60))
    );
    assert_eq!(
        debouncer.next_deadline(start + Duration::from_secs(1)),
        Some(Duration::ZERO)
    );
    assert_eq!(debouncer.quiet_period(), QUIET);
}
