use super::*;

#[test]
fn millis_non_negative_rejects_bad_values() {
    assert!(Millis::non_negative(0.0, "delay").is_ok());
    assert!(Millis::non_negative(-1.0, "delay").is_err());
    assert!(Millis::non_negative(f64::NAN, "delay").is_err());
    assert!(Millis::non_negative(f64::INFINITY, "delay").is_err());
}

#[test]
fn millis_arithmetic_and_saturation() {
    let a = Millis(1500.0);
    let b = Millis(500.0);
    assert_eq!(a + b, Millis(2000.0));
    assert_eq!(a - b, Millis(1000.0));
    assert_eq!(b.saturating_since(a), Millis::ZERO);
    assert_eq!(a.saturating_since(b), Millis(1000.0));
}

#[test]
fn fps_frame_times() {
    let fps = Fps::new(50, 1).unwrap();
    assert_eq!(fps.frame_duration(), Millis(20.0));
    assert_eq!(fps.frame_time(450), Millis(9000.0));
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}
