use chrono::NaiveDateTime;

use crate::{Error, IcsOptions, Result, ScheduledStep};

#[cfg(test)]
mod tests;

/// ICS calendar generator
pub struct IcsGenerator {
    options: IcsOptions,
}

impl IcsGenerator {
    pub fn new(options: IcsOptions) -> Self {
        Self { options }
    }

    /// Generates the ICS document for a computed schedule, one VEVENT
    /// per step in schedule order.
    ///
    /// Lines are joined with CRLF. Schedule times are wall-clock values
    /// and are rendered as-is in UTC basic form (`YYYYMMDDTHHMMSSZ`),
    /// matching what calendar applications expect from this feed.
    pub fn generate(&self, recipe_name: &str, schedule: &[ScheduledStep]) -> Result<String> {
        if schedule.is_empty() {
            return Err(Error::IcsGeneration(
                "schedule has no steps to export".into(),
            ));
        }

        let mut lines = Vec::with_capacity(schedule.len() * 5 + 4);

        lines.push("BEGIN:VCALENDAR".to_string());
        lines.push("VERSION:2.0".to_string());
        lines.push("CALSCALE:GREGORIAN".to_string());

        if let Some(ref name) = self.options.calendar_name {
            lines.push(format!("X-WR-CALNAME:{}", escape_text(name)));
        }

        for step in schedule {
            self.add_step_event(&mut lines, recipe_name, step);
        }

        lines.push("END:VCALENDAR".to_string());

        Ok(lines.join("\r\n"))
    }

    /// Adds a single step event
    fn add_step_event(&self, lines: &mut Vec<String>, recipe_name: &str, step: &ScheduledStep) {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "SUMMARY:{}",
            escape_text(&format!("{} - {}", recipe_name, step.name))
        ));
        lines.push(format!("DTSTART:{}", format_timestamp(step.start_time)));
        lines.push(format!("DTEND:{}", format_timestamp(step.end_time)));

        if let Some(reminder_minutes) = self.options.reminder_minutes {
            lines.push("BEGIN:VALARM".to_string());
            lines.push("ACTION:DISPLAY".to_string());
            lines.push(format!("DESCRIPTION:{}", escape_text(&step.name)));
            lines.push(format!("TRIGGER:-PT{}M", reminder_minutes));
            lines.push("END:VALARM".to_string());
        }

        lines.push("END:VEVENT".to_string());
    }

    /// Suggested download name for the exported file
    pub fn suggested_file_name(recipe_name: &str) -> String {
        format!("{}-schedule.ics", recipe_name.to_lowercase())
    }
}

impl Default for IcsGenerator {
    fn default() -> Self {
        Self::new(IcsOptions::default())
    }
}

/// Renders a wall-clock time in UTC basic format
fn format_timestamp(time: NaiveDateTime) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes ICS text content
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
