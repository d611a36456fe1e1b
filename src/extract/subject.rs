//! Subject header extraction from lecture pages.

use regex::Regex;

use crate::error::Result;
use crate::extract::{Fragment, FragmentExtractor};

/// Identity of a lecture as printed at the top of its page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectHeader {
    pub unit: String,
    pub department: String,

    /// `None` when the third line does not carry a readable code.
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Reads the header table: unit name, department name, then
/// `Disciplina: CODE123 - Name`.
pub struct SubjectHeaderExtractor {
    title: Regex,
}

impl SubjectHeaderExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: Regex::new(r"Disciplina:\s+([A-Z0-9\s]{7})\s-\s(.+)")?,
        })
    }
}

impl FragmentExtractor for SubjectHeaderExtractor {
    type Record = SubjectHeader;

    fn extract(&self, fragment: &Fragment) -> Option<SubjectHeader> {
        let [unit, department, title, ..] = fragment.strings.as_slice() else {
            return None;
        };

        let captures = self.title.captures(title);
        Some(SubjectHeader {
            unit: unit.clone(),
            department: department.clone(),
            code: captures
                .as_ref()
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
            name: captures
                .as_ref()
                .and_then(|c| c.get(2))
                .map(|m| m.as_str().to_string()),
        })
    }
}
