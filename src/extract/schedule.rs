//! Schedule table extraction.
//!
//! A schedule table lists one row per slot, but a slot may span several
//! rows: an empty day cell continues the previous day, and an empty start
//! cell continues the previous slot (extra professor or later end time).

use crate::extract::{Fragment, FragmentExtractor, Row};
use crate::models::ScheduleSlot;

#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleExtractor;

impl FragmentExtractor for ScheduleExtractor {
    type Record = Vec<ScheduleSlot>;

    /// Returns `None` when the table yields no slot.
    fn extract(&self, fragment: &Fragment) -> Option<Vec<ScheduleSlot>> {
        let mut slots = Vec::new();
        let mut current: Option<ScheduleSlot> = None;

        for row in &fragment.rows {
            if row.is_empty() || row.text(0) == "Horário" {
                continue;
            }

            if !row.text(0).is_empty() {
                slots.extend(current.take());
                current = Some(new_slot(row.text(0), row));
                continue;
            }

            let Some(slot) = current.as_mut() else {
                continue;
            };
            if row.len() <= 2 {
                continue;
            }

            if row.text(1).is_empty() {
                // Fixed-width "HH:MM" strings compare like times.
                if row.text(2) > slot.end_time.as_str() {
                    slot.end_time = row.text(2).to_string();
                }
                if !row.text(3).is_empty() {
                    slot.professors.push(row.text(3).to_string());
                }
            } else {
                let day = slot.day.clone();
                slots.extend(current.take());
                current = Some(new_slot(&day, row));
            }
        }

        slots.extend(current);
        (!slots.is_empty()).then_some(slots)
    }
}

fn new_slot(day: &str, row: &Row) -> ScheduleSlot {
    let professor = row.text(3);
    ScheduleSlot {
        day: day.to_string(),
        start_time: row.text(1).to_string(),
        end_time: row.text(2).to_string(),
        professors: if professor.is_empty() {
            Vec::new()
        } else {
            vec![professor.to_string()]
        },
    }
}
