use super::*;
use crate::{
    StepKind,
    schedule::{compute_schedule, parse_target_time},
    types::Step,
};

fn baguette_schedule() -> Vec<ScheduledStep> {
    let steps = vec![
        Step::new("Mixing", 0.5, StepKind::Active),
        Step::new("Rise", 2.0, StepKind::Waiting),
        Step::new("Bake", 0.5, StepKind::Active),
    ];
    let target = parse_target_time("2024-01-01T08:00").unwrap();
    compute_schedule(&steps, target).unwrap()
}

#[test]
fn test_document_structure() {
    let generator = IcsGenerator::default();
    let ics_content = generator
        .generate("Baguette", &baguette_schedule())
        .expect("ICS generation failed");

    let expected = [
        "BEGIN:VCALENDAR",
        "VERSION:2.0",
        "CALSCALE:GREGORIAN",
        "BEGIN:VEVENT",
        "SUMMARY:Baguette - Mixing",
        "DTSTART:20240101T050000Z",
        "DTEND:20240101T053000Z",
        "END:VEVENT",
        "BEGIN:VEVENT",
        "SUMMARY:Baguette - Rise",
        "DTSTART:20240101T053000Z",
        "DTEND:20240101T073000Z",
        "END:VEVENT",
        "BEGIN:VEVENT",
        "SUMMARY:Baguette - Bake",
        "DTSTART:20240101T073000Z",
        "DTEND:20240101T080000Z",
        "END:VEVENT",
        "END:VCALENDAR",
    ]
    .join("\r\n");

    assert_eq!(ics_content, expected);
}

#[test]
fn test_event_count_and_order() {
    let generator = IcsGenerator::default();
    let ics_content = generator.generate("Baguette", &baguette_schedule()).unwrap();

    assert_eq!(ics_content.matches("BEGIN:VEVENT").count(), 3);

    let mixing = ics_content.find("Baguette - Mixing").unwrap();
    let rise = ics_content.find("Baguette - Rise").unwrap();
    let bake = ics_content.find("Baguette - Bake").unwrap();
    assert!(mixing < rise && rise < bake);
}

#[test]
fn test_empty_schedule_rejected() {
    let generator = IcsGenerator::default();
    let result = generator.generate("Baguette", &[]);
    assert!(matches!(result, Err(Error::IcsGeneration(_))));
}

#[test]
fn test_calendar_name_and_reminder_options() {
    let generator = IcsGenerator::new(IcsOptions {
        calendar_name: Some("Baking plan".to_string()),
        reminder_minutes: Some(10),
    });
    let ics_content = generator.generate("Baguette", &baguette_schedule()).unwrap();

    assert!(ics_content.contains("X-WR-CALNAME:Baking plan"));
    assert_eq!(ics_content.matches("BEGIN:VALARM").count(), 3);
    assert!(ics_content.contains("TRIGGER:-PT10M"));
}

#[test]
fn test_summary_escaping() {
    let generator = IcsGenerator::default();
    let ics_content = generator
        .generate("Rolls, plain; rich", &baguette_schedule())
        .unwrap();

    assert!(ics_content.contains("SUMMARY:Rolls\\, plain\\; rich - Mixing"));
}

#[test]
fn test_suggested_file_name() {
    assert_eq!(
        IcsGenerator::suggested_file_name("Sourdough Bread"),
        "sourdough bread-schedule.ics"
    );
}

#[test]
fn test_output_parses_as_ical() {
    let generator = IcsGenerator::default();
    let ics_content = generator.generate("Baguette", &baguette_schedule()).unwrap();

    let reader = ical::IcalParser::new(ics_content.as_bytes());
    let calendars: Vec<_> = reader.collect::<std::result::Result<Vec<_>, _>>().unwrap();
    assert_eq!(calendars.len(), 1);
    assert_eq!(calendars[0].events.len(), 3);
}
