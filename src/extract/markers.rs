//! Fragment classification by marker text.

use regex::Regex;

use crate::error::Result;
use crate::extract::Fragment;

/// What kind of record a leaf fragment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// "Código da Turma" (also "Código da Turma Teórica")
    ClassroomInfo,
    /// A cell reading exactly "Horário"
    Schedule,
    /// A cell reading exactly "Vagas"
    Vacancy,
    /// "Atividades Didáticas"; present on classroom pages, never extracted
    Ignored,
    /// "Disciplina: XXXXXXX - Name"
    SubjectHeader,
    /// "Créditos Aula"
    Credits,
    /// "Disciplinas Obrigatórias"
    Curriculum,
    Unrelated,
}

/// Priority-ordered marker matching over a fragment's text nodes.
pub struct MarkerClassifier {
    classroom: Regex,
    activities: Regex,
    subject: Regex,
    credits: Regex,
    curriculum: Regex,
}

impl MarkerClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            classroom: Regex::new(r"Código\s+da\s+Turma")?,
            activities: Regex::new(r"Atividades\s+Didáticas")?,
            subject: Regex::new(r"Disciplina:\s+.{7}\s+-.+")?,
            credits: Regex::new(r"Créditos\s+Aula")?,
            curriculum: Regex::new(r"Disciplinas\s+Obrigatórias")?,
        })
    }

    /// Classify a fragment; the first matching marker wins.
    pub fn classify(&self, fragment: &Fragment) -> FragmentKind {
        if fragment.has_match(&self.classroom) {
            FragmentKind::ClassroomInfo
        } else if fragment.has_string("Horário") {
            FragmentKind::Schedule
        } else if fragment.has_match(&self.activities) {
            FragmentKind::Ignored
        } else if fragment.has_string("Vagas") {
            FragmentKind::Vacancy
        } else if fragment.has_match(&self.subject) {
            FragmentKind::SubjectHeader
        } else if fragment.has_match(&self.credits) {
            FragmentKind::Credits
        } else if fragment.has_match(&self.curriculum) {
            FragmentKind::Curriculum
        } else {
            FragmentKind::Unrelated
        }
    }
}
