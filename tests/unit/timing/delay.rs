use super::*;

fn triggers(fired: &[FiredTimer]) -> Vec<DelayTrigger> {
    fired.iter().map(|f| f.trigger).collect()
}

#[test]
fn timers_fire_once_at_their_own_deadline() {
    let mut d = DelayScheduler::new();
    d.arm(Millis(100.0), Millis(1000.0), Millis(500.0));
    assert_eq!(d.next_deadline(), Some(Millis(600.0)));

    assert!(d.poll(Millis(599.0)).is_empty());
    let fired = d.poll(Millis(600.0));
    assert_eq!(triggers(&fired), vec![DelayTrigger::Auxiliary]);
    assert_eq!(fired[0].deadline, Millis(600.0));
    assert!(d.poll(Millis(700.0)).is_empty());

    let fired = d.poll(Millis(5000.0));
    assert_eq!(triggers(&fired), vec![DelayTrigger::Motion]);
    assert_eq!(fired[0].deadline, Millis(1100.0));
    assert!(!d.has_pending());
}

#[test]
fn late_poll_reports_in_deadline_order() {
    let mut d = DelayScheduler::new();
    d.arm(Millis(0.0), Millis(300.0), Millis(200.0));
    assert_eq!(
        triggers(&d.poll(Millis(1000.0))),
        vec![DelayTrigger::Auxiliary, DelayTrigger::Motion]
    );

    d.arm(Millis(0.0), Millis(0.0), Millis(0.0));
    assert_eq!(
        triggers(&d.poll(Millis(0.0))),
        vec![DelayTrigger::Motion, DelayTrigger::Auxiliary]
    );
}

#[test]
fn arming_replaces_previous_pair() {
    let mut d = DelayScheduler::new();
    let first = d.arm(Millis(0.0), Millis(100.0), Millis(100.0));
    let second = d.arm(Millis(50.0), Millis(100.0), Millis(100.0));
    assert_ne!(first, second);

    assert!(d.poll(Millis(120.0)).is_empty());
    assert_eq!(d.poll(Millis(150.0)).len(), 2);
    assert!(!d.cancel(first.motion));
}

#[test]
fn cancel_single_and_all() {
    let mut d = DelayScheduler::new();
    let armed = d.arm(Millis(0.0), Millis(10.0), Millis(20.0));
    assert!(d.cancel(armed.auxiliary));
    assert!(!d.cancel(armed.auxiliary));
    assert!(d.is_pending(DelayTrigger::Motion));
    assert!(!d.is_pending(DelayTrigger::Auxiliary));

    d.cancel_all();
    d.cancel_all();
    assert!(d.poll(Millis(1_000.0)).is_empty());
    assert_eq!(d.next_deadline(), None);
}
