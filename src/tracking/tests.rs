use super::counter::{RepCounter, RepEvent, Stage};
use super::profile::{Exercise, ExerciseProfile, ProfileRegistry};
use super::smoother::AngleSmoother;

/// Feed `angles` at a fixed spacing starting from `start`
fn run(counter: &mut RepCounter, angles: &[f32], start: f64, step: f64) -> f64 {
    let mut t = start;
    for angle in angles {
        counter.update(*angle, t);
        t += step;
    }
    t
}

/// One full down -> up -> down oscillation, each extreme held for `hold` frames
fn oscillation(low: f32, high: f32, hold: usize) -> Vec<f32> {
    let mut angles = vec![high; hold];
    angles.extend(std::iter::repeat(low).take(hold));
    angles
}

#[test]
fn test_reference_curl_sequence() {
    let mut counter = RepCounter::new(ExerciseProfile::builtin(Exercise::BicepCurl));
    let angles = [170.0, 170.0, 170.0, 35.0, 35.0, 35.0, 170.0, 170.0];

    let mut last = None;
    for (i, angle) in angles.iter().enumerate() {
        last = Some(counter.update(*angle, i as f64 * 0.2));
    }

    let last = last.unwrap();
    assert_eq!(last.count, 1);
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_n_oscillations_count_n() {
    for exercise in [Exercise::BicepCurl, Exercise::Squat, Exercise::PushUp] {
        let profile = ExerciseProfile::builtin(exercise);
        let mut counter = RepCounter::new(profile);

        let low = profile.low_threshold - 10.0;
        let high = profile.high_threshold + 10.0;
        let mut t = 0.0;
        for _ in 0..7 {
            t = run(&mut counter, &oscillation(low, high, 10), t, 0.1);
        }

        assert_eq!(counter.count(), 7, "{}", exercise);
    }
}

#[test]
fn test_count_on_down_oscillations() {
    for exercise in [Exercise::LateralRaise, Exercise::ShoulderPress] {
        let profile = ExerciseProfile::builtin(exercise);
        let mut counter = RepCounter::new(profile);

        let low = profile.low_threshold - 10.0;
        let high = profile.high_threshold + 10.0;
        let mut t = 0.0;
        // Start at low: classified Up, first rep completes on reaching Down
        for _ in 0..4 {
            let mut cycle = vec![low; 10];
            cycle.extend(std::iter::repeat(high).take(10));
            t = run(&mut counter, &cycle, t, 0.1);
        }

        assert_eq!(counter.count(), 4, "{}", exercise);
        assert_eq!(counter.stage(), Some(Stage::Down));
    }
}

#[test]
fn test_shallow_oscillations_never_count() {
    let mut profile = ExerciseProfile::builtin(Exercise::BicepCurl);
    // Thresholds crossed, but span below min ROM
    profile.low_threshold = 100.0;
    profile.high_threshold = 120.0;
    profile.min_range_of_motion = 60.0;
    let mut counter = RepCounter::new(profile);

    let mut t = 0.0;
    for step in [0.05, 0.1, 0.5] {
        for _ in 0..10 {
            t = run(&mut counter, &oscillation(95.0, 125.0, 8), t, step);
        }
    }

    assert_eq!(counter.count(), 0);
}

#[test]
fn test_fast_oscillations_collapse() {
    let mut profile = ExerciseProfile::builtin(Exercise::BicepCurl);
    profile.smoothing_window = 1;
    profile.hold_time = 0.0;
    profile.min_rep_time = 0.6;
    let mut counter = RepCounter::new(profile);

    // One frame per extreme, 0.1s apart: a counting transition every 0.2s
    let mut switches_into_up = 0;
    let mut t = 0.0;
    for i in 0..40 {
        let angle = if i % 2 == 0 { 170.0 } else { 30.0 };
        let update = counter.update(angle, t);
        if matches!(update.event, RepEvent::Counted | RepEvent::Rejected(_)) {
            switches_into_up += 1;
        }
        t += 0.1;
    }

    assert_eq!(switches_into_up, 20);
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_rejected_half_cycle_is_not_merged() {
    let mut profile = ExerciseProfile::builtin(Exercise::BicepCurl);
    profile.smoothing_window = 1;
    profile.low_threshold = 60.0;
    profile.high_threshold = 100.0;
    profile.min_range_of_motion = 60.0;
    let mut counter = RepCounter::new(profile);

    // 110 -> 55: span 55, too shallow
    counter.update(110.0, 0.0);
    counter.update(55.0, 1.0);
    let r = counter.update(55.0, 1.1);
    assert_eq!(r.stage, Some(Stage::Up));
    assert!(matches!(r.event, RepEvent::Rejected(_)));

    // 105 -> 50: span 55 again; merged with the previous cycle it would pass
    counter.update(105.0, 2.0);
    counter.update(105.0, 2.1);
    counter.update(105.0, 2.5);
    counter.update(50.0, 3.0);
    let r = counter.update(50.0, 3.1);
    assert!(matches!(r.event, RepEvent::Rejected(_)));
    assert_eq!(counter.count(), 0);

    // A full-range cycle still counts
    counter.update(105.0, 4.0);
    counter.update(105.0, 4.1);
    counter.update(130.0, 4.5);
    counter.update(50.0, 5.0);
    let r = counter.update(50.0, 5.1);
    assert_eq!(r.event, RepEvent::Counted);
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_replacing_counter_resets() {
    let registry = ProfileRegistry::builtin();
    let mut counter = RepCounter::new(registry.profile(Exercise::BicepCurl));
    run(&mut counter, &oscillation(30.0, 170.0, 8), 0.0, 0.1);
    run(&mut counter, &oscillation(30.0, 170.0, 8), 1.6, 0.1);
    assert!(counter.count() > 0);

    let counter = RepCounter::new(registry.get("squat").unwrap());
    assert_eq!(counter.count(), 0);
    assert_eq!(counter.stage(), None);
}

#[test]
fn test_count_is_monotonic() {
    let mut counter = RepCounter::new(ExerciseProfile::builtin(Exercise::PushUp));
    let pattern = [170.0, 100.0, 85.0, 60.0, 95.0, 165.0, 175.0, 80.0, 170.0, 50.0];

    let mut previous = 0;
    for i in 0..300 {
        let update = counter.update(pattern[(i * 7) % pattern.len()], i as f64 * 0.05);
        assert!(update.count >= previous);
        previous = update.count;
    }
}

#[test]
fn test_smoother_order_independent() {
    let samples = [12.0, 80.0, 45.0, 3.0, 61.0];

    let mut forward = AngleSmoother::new(5);
    let mut reversed = AngleSmoother::new(5);
    let a = samples.iter().map(|s| forward.update(*s)).last().unwrap();
    let b = samples.iter().rev().map(|s| reversed.update(*s)).last().unwrap();

    assert_eq!(a, b);
    assert_eq!(a, 45.0);
}

#[test]
fn test_smoother_bounded_by_window() {
    let mut smoother = AngleSmoother::new(5);
    let samples = [90.0, 10.0, 170.0, 95.0, 120.0, 5.0, 60.0, 140.0, 33.0];

    for (i, sample) in samples.iter().enumerate() {
        let out = smoother.update(*sample);
        let start = i.saturating_sub(4);
        let window = &samples[start..=i];
        let min = window.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = window.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(out >= min && out <= max, "{} not in [{}, {}]", out, min, max);
    }
}
