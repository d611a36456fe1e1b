//! Classroom information table extraction.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::Result;
use crate::extract::{Fragment, FragmentExtractor, leading_word};

/// Day-first formats accepted for start and end dates.
///
/// Two-digit years go first: `%Y` would read "24" as the year 24.
const DATE_FORMATS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Labelled fields of one classroom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomInfo {
    pub code: Option<String>,
    pub theory_code: Option<String>,
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
}

/// Which field a label row sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    TheoryCode,
    Code,
    Start,
    End,
    Kind,
    Notes,
}

/// Label-matching extractor for the "Código da Turma" table.
pub struct ClassroomInfoExtractor {
    /// Checked in order; earlier labels shadow later overlapping ones.
    labels: Vec<(Regex, Label)>,
}

impl ClassroomInfoExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            labels: vec![
                (Regex::new(r"Código\s+da\s+Turma\s+Teórica")?, Label::TheoryCode),
                (Regex::new(r"Código\s+da\s+Turma")?, Label::Code),
                (Regex::new(r"Início")?, Label::Start),
                (Regex::new(r"Fim")?, Label::End),
                (Regex::new(r"Tipo\s+da\s+Turma")?, Label::Kind),
                (Regex::new(r"Observações")?, Label::Notes),
            ],
        })
    }

    fn label(&self, text: &str) -> Option<Label> {
        self.labels
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, label)| *label)
    }
}

impl FragmentExtractor for ClassroomInfoExtractor {
    type Record = ClassroomInfo;

    fn extract(&self, fragment: &Fragment) -> Option<ClassroomInfo> {
        let mut info = ClassroomInfo::default();

        for row in &fragment.rows {
            // A row with an empty cell cannot be read reliably.
            let Some(cells) = row.firsts() else {
                continue;
            };
            if cells.len() < 2 {
                continue;
            }
            let (label, value) = (cells[0], cells[1]);

            match self.label(label) {
                Some(Label::TheoryCode) => {
                    if let Some(word) = leading_word(value) {
                        info.theory_code = Some(word);
                    }
                }
                Some(Label::Code) => {
                    if let Some(word) = leading_word(value) {
                        info.code = Some(word);
                    }
                }
                Some(Label::Start) => match parse_day_first(value) {
                    Some(date) => info.start_date = Some(date),
                    None => log::debug!("Skipping unreadable start date {value:?}"),
                },
                Some(Label::End) => match parse_day_first(value) {
                    Some(date) => info.end_date = Some(date),
                    None => log::debug!("Skipping unreadable end date {value:?}"),
                },
                Some(Label::Kind) => info.kind = Some(value.to_string()),
                Some(Label::Notes) => info.notes = Some(value.to_string()),
                None => {}
            }
        }

        Some(info)
    }
}

/// Parse a day-first date and normalize it to `DD/MM/YYYY`.
pub fn parse_day_first(text: &str) -> Option<String> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(|date| date.format("%d/%m/%Y").to_string())
}
