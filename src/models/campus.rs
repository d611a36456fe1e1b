// src/models/campus.rs

//! Teaching units and the campus each one belongs to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Campus name used for units missing from the campus table.
pub const OTHER_CAMPUS: &str = "Other";

/// Unit codes grouped by campus.
const CAMPUS_TABLE: &[(&str, &[u32])] = &[
    (
        "São Paulo",
        &[
            86, 27, 39, 7, 22, 3, 16, 9, 2, 12, 48, 8, 5, 10, 67, 23, 6, 66, 14, 26, 93, 41, 92, 42,
            4, 37, 43, 44, 45, 83, 47, 46, 87, 21, 31, 85, 71, 32, 38, 33,
        ],
    ),
    (
        "Ribeirão Preto",
        &[98, 94, 60, 89, 81, 59, 96, 91, 17, 58, 95],
    ),
    ("Lorena", &[88]),
    ("São Carlos", &[18, 97, 99, 55, 76, 75, 90]),
    ("Piracicaba", &[11, 64]),
    ("Bauru", &[25, 61]),
    ("Pirassununga", &[74]),
    ("São Sebastião", &[30]),
];

/// Resolve the campus of a numeric unit code.
pub fn campus_for_unit(code: u32) -> &'static str {
    CAMPUS_TABLE
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map_or(OTHER_CAMPUS, |(campus, _)| *campus)
}

/// Resolve the campus of a unit code as it appears in links (e.g. `"45"`).
pub fn campus_for_code(code: &str) -> &'static str {
    code.trim()
        .parse::<u32>()
        .map_or(OTHER_CAMPUS, campus_for_unit)
}

/// A teaching unit discovered on the unit listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Display name (e.g., "Instituto de Matemática e Estatística")
    pub name: String,

    /// Numeric code used by the `codcg` query parameter
    pub code: String,

    /// Campus resolved from the code
    pub campus: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: name.into(),
            campus: campus_for_code(&code).to_string(),
            code,
        }
    }
}

/// Read-only lookup of every known unit.
///
/// Built once before any detail fetch starts and shared by reference
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct UnitDirectory {
    units: Vec<Unit>,
}

impl UnitDirectory {
    /// Build the directory from `(display_name, code)` pairs.
    ///
    /// A name listed twice keeps its last code.
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut units: Vec<Unit> = Vec::new();
        for (name, code) in pairs {
            match units.iter_mut().find(|u| u.name == name) {
                Some(existing) => *existing = Unit::new(name, code),
                None => units.push(Unit::new(name, code)),
            }
        }
        Self { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Every unit code, in listing order.
    pub fn codes(&self) -> Vec<String> {
        self.units.iter().map(|u| u.code.clone()).collect()
    }

    pub fn code_of(&self, name: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.code.as_str())
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|u| u.code == code)
            .map(|u| u.name.as_str())
    }

    /// Campus of a unit given its display name; unknown names map to
    /// [`OTHER_CAMPUS`].
    pub fn campus_of(&self, name: &str) -> &str {
        self.units
            .iter()
            .find(|u| u.name == name)
            .map_or(OTHER_CAMPUS, |u| u.campus.as_str())
    }

    /// Unit display names grouped by campus.
    pub fn campuses(&self) -> BTreeMap<String, Vec<String>> {
        let mut campuses: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for unit in &self.units {
            campuses
                .entry(unit.campus.clone())
                .or_default()
                .push(unit.name.clone());
        }
        campuses
    }
}
