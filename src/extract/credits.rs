//! Credit table extraction.

use regex::Regex;

use crate::error::Result;
use crate::extract::{Fragment, FragmentExtractor, to_int};

/// Class and work credits of a lecture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Credits {
    pub class: i64,
    pub work: i64,
}

pub struct CreditsExtractor {
    class: Regex,
    work: Regex,
}

impl CreditsExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            class: Regex::new(r"Créditos\s+Aula:")?,
            work: Regex::new(r"Créditos\s+Trabalho:")?,
        })
    }
}

impl FragmentExtractor for CreditsExtractor {
    type Record = Credits;

    /// Missing labels leave the matching credit at 0.
    fn extract(&self, fragment: &Fragment) -> Option<Credits> {
        let mut credits = Credits::default();

        for row in &fragment.rows {
            let Some(cells) = row.firsts() else {
                continue;
            };
            if cells.len() < 2 {
                continue;
            }

            if self.class.is_match(cells[0]) {
                credits.class = to_int(cells[1]);
            } else if self.work.is_match(cells[0]) {
                credits.work = to_int(cells[1]);
            }
        }

        Some(credits)
    }
}
