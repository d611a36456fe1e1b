//! Course (curso) data structures.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A course discovered on a unit's course listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListing {
    /// Relative link to the curriculum page
    pub link: String,

    /// Ideal duration label from the listing row (may be empty)
    pub ideal_period: String,
}

impl fmt::Display for CourseListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.link)
    }
}

/// Curriculum entries keyed by the ideal period label as printed, in page order.
pub type Periods = IndexMap<String, Vec<CurriculumEntry>>;

/// A degree program with its curriculum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    /// `"{codcur}-{codhab}"`
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "unidade", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(rename = "periodo")]
    pub period: String,

    #[serde(rename = "periodos")]
    pub periods: Periods,
}

/// Category of a curriculum entry, set by the last header row seen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurriculumCategory {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "obrigatoria")]
    Mandatory,
    #[serde(rename = "optativa_eletiva")]
    ElectiveTechnical,
    #[serde(rename = "optativa_livre")]
    ElectiveFree,
}

impl CurriculumCategory {
    /// Map a curriculum section header to its category.
    pub fn from_header(text: &str) -> Option<Self> {
        match text {
            "Disciplinas Obrigatórias" => Some(Self::Mandatory),
            "Disciplinas Optativas Eletivas" => Some(Self::ElectiveTechnical),
            "Disciplinas Optativas Livres" => Some(Self::ElectiveFree),
            _ => None,
        }
    }
}

/// One subject slot within a course period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurriculumEntry {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "tipo")]
    pub category: CurriculumCategory,

    #[serde(rename = "req_fraco")]
    pub weak_requisites: Vec<String>,

    #[serde(rename = "req_forte")]
    pub strong_requisites: Vec<String>,

    #[serde(rename = "ind_conjunto")]
    pub set_indications: Vec<String>,
}

impl CurriculumEntry {
    pub fn new(code: impl Into<String>, category: CurriculumCategory) -> Self {
        Self {
            code: code.into(),
            category,
            weak_requisites: Vec::new(),
            strong_requisites: Vec::new(),
            set_indications: Vec::new(),
        }
    }
}
