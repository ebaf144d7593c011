use client::models::{TimeSlot, Weekday, WeeklyTimetable};

pub const EMPTY_TIMETABLE: &str = "No timetable available";

/// Weekly view: slots grouped under Monday..Sunday headings, days without
/// slots skipped, intra-day order as supplied by the API.
pub fn weekly(week: &WeeklyTimetable) -> String {
    if week.timetable.iter().all(|day| day.time_slots.is_empty()) {
        return EMPTY_TIMETABLE.to_string();
    }

    let mut sections = Vec::new();
    for day in Weekday::ALL {
        let slots: Vec<&TimeSlot> = week
            .timetable
            .iter()
            .filter(|schedule| schedule.day == day)
            .flat_map(|schedule| schedule.time_slots.iter())
            .collect();
        if slots.is_empty() {
            continue;
        }

        let mut section = format!("{day}\n");
        for slot in slots {
            section.push_str(&format!("  {}", slot_line(slot)));
            section.push('\n');
        }
        sections.push(section.trim_end().to_string());
    }

    sections.join("\n")
}

fn slot_line(slot: &TimeSlot) -> String {
    let mut line = format!("{} - {}  {}", slot.start_time, slot.end_time, slot.subject);
    if let Some(faculty) = &slot.faculty {
        line.push_str(&format!(" ({faculty})"));
    }
    if let Some(room) = &slot.room {
        line.push_str(&format!("  Room: {room}"));
    }
    line
}
