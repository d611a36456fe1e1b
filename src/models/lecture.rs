//! Lecture (disciplina) data structures.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A lecture discovered on a unit's lecture listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureListing {
    /// Subject code (7 characters)
    pub code: String,

    /// Link text on the listing page
    pub name: String,
}

impl fmt::Display for LectureListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// A subject offered by a teaching unit with its accepted classrooms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lecture {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "unidade")]
    pub unit: String,

    #[serde(rename = "departamento")]
    pub department: String,

    pub campus: String,

    #[serde(rename = "creditos_aula")]
    pub credit_class: i64,

    #[serde(rename = "creditos_trabalho")]
    pub credit_work: i64,

    #[serde(rename = "turmas")]
    pub classrooms: Vec<Classroom>,
}

/// One scheduled section of a lecture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classroom {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "codigo_teorica", default, skip_serializing_if = "Option::is_none")]
    pub theory_code: Option<String>,

    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(rename = "inicio", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(rename = "fim", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(rename = "horario")]
    pub schedule: Vec<ScheduleSlot>,

    #[serde(rename = "vagas")]
    pub vacancies: Vacancies,
}

/// Vacancy categories keyed by label, in table order.
pub type Vacancies = IndexMap<String, VacancyCategory>;

/// A weekly time slot with its professors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleSlot {
    #[serde(rename = "dia")]
    pub day: String,

    /// Zero-padded `HH:MM`
    #[serde(rename = "inicio")]
    pub start_time: String,

    /// Zero-padded `HH:MM`
    #[serde(rename = "fim")]
    pub end_time: String,

    #[serde(rename = "professores")]
    pub professors: Vec<String>,
}

/// Enrollment counts shared by categories and subgroups.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VacancyCounts {
    #[serde(rename = "vagas")]
    pub offered: i64,

    #[serde(rename = "inscritos")]
    pub interested: i64,

    #[serde(rename = "pendentes")]
    pub pending: i64,

    #[serde(rename = "matriculados")]
    pub enrolled: i64,
}

/// Vacancy counts for one category (e.g., "Obrigatória").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VacancyCategory {
    #[serde(flatten)]
    pub counts: VacancyCounts,

    #[serde(rename = "grupos")]
    pub subgroups: IndexMap<String, VacancySubgroup>,
}

/// Vacancy counts for one subgroup within a category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VacancySubgroup {
    #[serde(flatten)]
    pub counts: VacancyCounts,
}
