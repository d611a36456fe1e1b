//! Table-to-record extraction.
//!
//! JupiterWeb pages carry no schema: records are rebuilt from flat table
//! rows whose meaning depends on row length and marker text.
//!
//! - `segment`: split a document into leaf table fragments
//! - `markers`: decide which kind of record a fragment holds
//! - `schedule`, `vacancy`, `classroom`, `credits`, `subject`, `curriculum`:
//!   one row-by-row extractor per record kind
//! - `assemble`: merge extracted records into lectures, classrooms and courses
//! - `page`: page-level entry points used by the fetch services

pub mod assemble;
pub mod classroom;
pub mod credits;
pub mod curriculum;
pub mod markers;
pub mod page;
pub mod schedule;
pub mod segment;
pub mod subject;
pub mod vacancy;

pub use assemble::{ClassroomAssembler, CourseLink, assemble_course, assemble_lecture};
pub use classroom::{ClassroomInfo, ClassroomInfoExtractor};
pub use credits::{Credits, CreditsExtractor};
pub use curriculum::CurriculumExtractor;
pub use markers::{FragmentKind, MarkerClassifier};
pub use page::{Classified, LectureInfo, PageParser};
pub use schedule::ScheduleExtractor;
pub use segment::Segmenter;
pub use subject::{SubjectHeader, SubjectHeaderExtractor};
pub use vacancy::VacancyExtractor;

use regex::Regex;

/// Consumes the rows of one fragment and produces a record, or nothing when
/// the fragment holds no usable data.
pub trait FragmentExtractor {
    type Record;

    fn extract(&self, fragment: &Fragment) -> Option<Self::Record>;
}

/// One `<td>` cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Every text node, trimmed and concatenated.
    pub text: String,

    /// First non-empty text node, trimmed.
    pub first: Option<String>,
}

impl Cell {
    /// Build a cell from its text nodes in document order.
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = stripped(strings).collect();
        Self {
            text: parts.concat(),
            first: parts.into_iter().next(),
        }
    }

    /// First text node, or `""` for an empty cell.
    pub fn first_or_empty(&self) -> &str {
        self.first.as_deref().unwrap_or("")
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from_strings([text])
    }
}

/// One `<tr>` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,

    /// First non-empty text node anywhere in the row.
    pub lead: Option<String>,
}

impl Row {
    pub fn new(cells: Vec<Cell>, lead: Option<String>) -> Self {
        Self { cells, lead }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Concatenated text of cell `index`, or `""` when the row is shorter.
    pub fn text(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", |c| c.text.as_str())
    }

    /// First text node of every cell, or `None` if any cell is empty.
    pub fn firsts(&self) -> Option<Vec<&str>> {
        self.cells.iter().map(|c| c.first.as_deref()).collect()
    }
}

impl From<&[&str]> for Row {
    fn from(texts: &[&str]) -> Self {
        let cells: Vec<Cell> = texts.iter().map(|t| Cell::from(*t)).collect();
        let lead = cells.iter().find_map(|c| c.first.clone());
        Self { cells, lead }
    }
}

/// A leaf table: a `<table>` with no nested `<table>` inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub rows: Vec<Row>,

    /// Every non-empty text node in the table, trimmed, in document order.
    pub strings: Vec<String>,
}

impl Fragment {
    pub fn new(rows: Vec<Row>, strings: Vec<String>) -> Self {
        Self { rows, strings }
    }

    /// Build a fragment from plain cell texts, one slice per row.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        let rows: Vec<Row> = rows.iter().map(|r| Row::from(*r)).collect();
        let strings = rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| !c.text.is_empty())
            .map(|c| c.text.clone())
            .collect();
        Self { rows, strings }
    }

    /// Whether some text node equals `literal`.
    pub fn has_string(&self, literal: &str) -> bool {
        self.strings.iter().any(|s| s == literal)
    }

    /// Whether some text node matches `pattern`.
    pub fn has_match(&self, pattern: &Regex) -> bool {
        self.strings.iter().any(|s| pattern.is_match(s))
    }
}

/// Trim every string and drop the empty ones.
pub fn stripped<I, S>(strings: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    strings
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Lenient integer coercion: anything that is not an integer becomes 0.
pub fn to_int(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Leading run of word characters (`\w+`), if any.
pub fn leading_word(text: &str) -> Option<String> {
    let word: String = text
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!word.is_empty()).then_some(word)
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_int() {
        assert_eq!(to_int("42"), 42);
        assert_eq!(to_int(" 7 "), 7);
        assert_eq!(to_int("-3"), -3);
        for junk in ["", "abc", "1.5", "12a", "—", " ", "99999999999999999999"] {
            assert_eq!(to_int(junk), 0, "input {junk:?}");
        }
    }

    #[test]
    fn test_leading_word() {
        assert_eq!(leading_word("2024101 (Teórica)"), Some("2024101".to_string()));
        assert_eq!(leading_word("T01A"), Some("T01A".to_string()));
        assert_eq!(leading_word(" 2024101"), None);
        assert_eq!(leading_word(""), None);
    }

    #[test]
    fn test_cell_from_strings() {
        let cell = Cell::from_strings(["  Prof. ", "", "\nAna  "]);
        assert_eq!(cell.text, "Prof.Ana");
        assert_eq!(cell.first.as_deref(), Some("Prof."));

        let empty = Cell::from_strings(["   "]);
        assert_eq!(empty.text, "");
        assert_eq!(empty.first, None);
        assert_eq!(empty.first_or_empty(), "");
    }

    #[test]
    fn test_row_firsts_requires_every_cell() {
        let row = Row::from(&["Tipo da Turma:", "Teórica"][..]);
        assert_eq!(row.firsts(), Some(vec!["Tipo da Turma:", "Teórica"]));

        let row = Row::from(&["Observações:", ""][..]);
        assert_eq!(row.firsts(), None);
    }

    #[test]
    fn test_row_lead_skips_empty_cells() {
        let row = Row::from(&["", "MAC0105", "Requisito"][..]);
        assert_eq!(row.lead.as_deref(), Some("MAC0105"));
        assert_eq!(row.text(5), "");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace(" 1º  Período\n Ideal "),
            "1º Período Ideal"
        );
    }
}
