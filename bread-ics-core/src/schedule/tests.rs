use super::*;
use crate::StepKind;

fn baguette_core_steps() -> Vec<Step> {
    vec![
        Step::new("Mixing", 0.5, StepKind::Active),
        Step::new("Rise", 2.0, StepKind::Waiting),
        Step::new("Bake", 0.5, StepKind::Active),
    ]
}

fn t(s: &str) -> NaiveDateTime {
    parse_target_time(s).expect("valid test timestamp")
}

#[test]
fn test_backward_chaining() {
    let target = t("2024-01-01T08:00");
    let schedule = compute_schedule(&baguette_core_steps(), target).unwrap();

    assert_eq!(schedule.len(), 3);

    assert_eq!(schedule[0].name, "Mixing");
    assert_eq!(schedule[0].start_time, t("2024-01-01T05:00"));
    assert_eq!(schedule[0].end_time, t("2024-01-01T05:30"));

    assert_eq!(schedule[1].name, "Rise");
    assert_eq!(schedule[1].start_time, t("2024-01-01T05:30"));
    assert_eq!(schedule[1].end_time, t("2024-01-01T07:30"));

    assert_eq!(schedule[2].name, "Bake");
    assert_eq!(schedule[2].start_time, t("2024-01-01T07:30"));
    assert_eq!(schedule[2].end_time, t("2024-01-01T08:00"));
}

#[test]
fn test_last_step_ends_at_target() {
    let target = t("2024-06-15T18:45");
    let schedule = compute_schedule(&baguette_core_steps(), target).unwrap();
    assert_eq!(schedule.last().unwrap().end_time, target);
}

#[test]
fn test_steps_are_contiguous() {
    let target = t("2024-03-10T12:00");
    let schedule = compute_schedule(&baguette_core_steps(), target).unwrap();

    for pair in schedule.windows(2) {
        assert_eq!(pair[0].end_time, pair[1].start_time);
    }
}

#[test]
fn test_span_matches_duration() {
    let steps = vec![
        Step::new("Mixing", 0.33, StepKind::Active),
        Step::new("Kneading", 0.25, StepKind::Active),
        Step::new("First Rise", 1.5, StepKind::Waiting),
    ];
    let schedule = compute_schedule(&steps, t("2024-03-10T12:00")).unwrap();

    for (step, scheduled) in steps.iter().zip(&schedule) {
        let span = scheduled.end_time - scheduled.start_time;
        let expected =
            chrono::Duration::milliseconds((step.duration_hours * 3_600_000.0).round() as i64);
        assert_eq!(span, expected, "step '{}' span mismatch", step.name);
    }
}

#[test]
fn test_order_preserved() {
    let target = t("2024-01-01T08:00");
    let steps = baguette_core_steps();
    let schedule = compute_schedule(&steps, target).unwrap();

    let input_names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
    let output_names: Vec<_> = schedule.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(input_names, output_names);
}

#[test]
fn test_empty_steps_yield_empty_schedule() {
    let schedule = compute_schedule(&[], t("2024-01-01T08:00")).unwrap();
    assert!(schedule.is_empty());
}

#[test]
fn test_zero_duration_step() {
    let steps = vec![
        Step::new("Mixing", 0.5, StepKind::Active),
        Step::new("Check", 0.0, StepKind::Active),
        Step::new("Bake", 0.5, StepKind::Active),
    ];
    let schedule = compute_schedule(&steps, t("2024-01-01T08:00")).unwrap();

    assert_eq!(schedule[1].start_time, schedule[1].end_time);
    assert_eq!(schedule[0].end_time, schedule[1].start_time);
    assert_eq!(schedule[1].end_time, schedule[2].start_time);
}

#[test]
fn test_idempotent() {
    let target = t("2024-01-01T08:00");
    let steps = baguette_core_steps();
    let first = compute_schedule(&steps, target).unwrap();
    let second = compute_schedule(&steps, target).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_target_time_formats() {
    assert_eq!(
        parse_target_time("2024-01-01T08:00").unwrap(),
        parse_target_time("2024-01-01T08:00:00").unwrap()
    );
}

#[test]
fn test_parse_target_time_rejects_garbage() {
    for input in ["", "  ", "not-a-date", "2024-13-01T08:00", "08:00"] {
        let result = parse_target_time(input);
        assert!(
            matches!(result, Err(Error::InvalidInput(_))),
            "expected InvalidInput for '{}'",
            input
        );
    }
}
