//! Page-level extraction entry points.

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::extract::{
    ClassroomAssembler, ClassroomInfoExtractor, CourseLink, Credits, CreditsExtractor,
    CurriculumExtractor, Fragment, FragmentExtractor, FragmentKind, MarkerClassifier,
    ScheduleExtractor, Segmenter, SubjectHeader, SubjectHeaderExtractor, VacancyExtractor,
};
use crate::models::{Classroom, Periods};

/// A leaf fragment together with its classification.
#[derive(Debug, Clone)]
pub struct Classified {
    pub kind: FragmentKind,
    pub fragment: Fragment,
}

/// Subject header and credits read from a lecture page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureInfo {
    pub header: Option<SubjectHeader>,
    pub credits: Option<Credits>,
}

/// Compiled selectors, patterns and extractors for every JupiterWeb page.
///
/// Built once per run and shared across fetch tasks.
pub struct PageParser {
    segmenter: Segmenter,
    classifier: MarkerClassifier,
    classroom_info: ClassroomInfoExtractor,
    credits: CreditsExtractor,
    subject: SubjectHeaderExtractor,
    curriculum: CurriculumExtractor,
    course_name: Regex,
    course_code: Regex,
    course_unit: Regex,
}

impl PageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new()?,
            classifier: MarkerClassifier::new()?,
            classroom_info: ClassroomInfoExtractor::new()?,
            credits: CreditsExtractor::new()?,
            subject: SubjectHeaderExtractor::new()?,
            curriculum: CurriculumExtractor::new()?,
            course_name: Regex::new(r"Curso:\s*(.+?)\s*(?:\n|$)")?,
            course_code: Regex::new(r"codcur=(.+?)&codhab=(.+?)(?:&|$)")?,
            course_unit: Regex::new(r"codcg=(\d+)")?,
        })
    }

    /// Leaf fragments of a page with their kinds, in document order.
    pub fn classify_page(&self, html: &str) -> Vec<Classified> {
        self.segmenter
            .segment(html)
            .into_iter()
            .map(|fragment| Classified {
                kind: self.classifier.classify(&fragment),
                fragment,
            })
            .collect()
    }

    /// Accepted classrooms of an `obterTurma` page.
    pub fn classrooms(&self, html: &str) -> Vec<Classroom> {
        let mut assembler = ClassroomAssembler::new();

        for Classified { kind, fragment } in self.classify_page(html) {
            match kind {
                FragmentKind::ClassroomInfo => {
                    if let Some(info) = self.classroom_info.extract(&fragment) {
                        assembler.push_info(info);
                    }
                }
                FragmentKind::Schedule => {
                    assembler.push_schedule(ScheduleExtractor.extract(&fragment));
                }
                FragmentKind::Vacancy => {
                    assembler.push_vacancies(VacancyExtractor.extract(&fragment));
                }
                _ => {}
            }
        }

        assembler.finish()
    }

    /// Subject header and credits of an `obterDisciplina` page.
    ///
    /// When a marker appears in several fragments the last one wins.
    pub fn lecture_info(&self, html: &str) -> LectureInfo {
        let mut info = LectureInfo::default();

        for Classified { kind, fragment } in self.classify_page(html) {
            match kind {
                FragmentKind::SubjectHeader => {
                    if let Some(header) = self.subject.extract(&fragment) {
                        info.header = Some(header);
                    }
                }
                FragmentKind::Credits => {
                    if let Some(credits) = self.credits.extract(&fragment) {
                        info.credits = Some(credits);
                    }
                }
                _ => {}
            }
        }

        info
    }

    /// Period mapping of the first curriculum table on a course page.
    pub fn curriculum(&self, html: &str) -> Option<Periods> {
        self.classify_page(html)
            .into_iter()
            .find(|c| c.kind == FragmentKind::Curriculum)
            .and_then(|c| self.curriculum.extract(&c.fragment))
    }

    /// Every `Curso:` line of a course page, joined by `" - "`.
    pub fn course_name(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        let text: String = document.root_element().text().collect();

        self.course_name
            .captures_iter(&text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" - ")
    }

    /// Course code and unit code carried by a course detail link.
    pub fn course_link(&self, link: &str) -> CourseLink {
        CourseLink {
            code: self
                .course_code
                .captures(link)
                .map(|c| format!("{}-{}", &c[1], &c[2])),
            unit_code: self
                .course_unit
                .captures(link)
                .map(|c| c[1].to_string()),
        }
    }
}
