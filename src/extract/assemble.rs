//! Record assembly: merges extracted fragments into finished records.

use crate::extract::{ClassroomInfo, Credits, SubjectHeader};
use crate::models::{
    Classroom, Course, CourseListing, Lecture, Periods, ScheduleSlot, UnitDirectory, Vacancies,
};

/// Classroom slot waiting for its schedule and vacancy tables.
#[derive(Debug, Default)]
struct Pending {
    info: ClassroomInfo,
    schedule: Option<Vec<ScheduleSlot>>,
    vacancies: Option<Vacancies>,
}

impl Pending {
    /// A finished classroom, if the slot is complete.
    fn into_classroom(self) -> Option<Classroom> {
        let code = self.info.code?;
        let schedule = self.schedule.filter(|s| !s.is_empty())?;
        let vacancies = self.vacancies.filter(|v| !v.is_empty())?;
        Some(Classroom {
            code,
            theory_code: self.info.theory_code,
            kind: self.info.kind,
            start_date: self.info.start_date,
            end_date: self.info.end_date,
            notes: self.info.notes,
            schedule,
            vacancies,
        })
    }
}

/// Collects classrooms from a classroom page's fragments in document order.
///
/// Every info fragment opens a new slot; schedule and vacancy fragments fill
/// the open slot. A slot is committed only when it has a code, a schedule
/// and vacancies; incomplete slots are dropped.
#[derive(Debug, Default)]
pub struct ClassroomAssembler {
    pending: Option<Pending>,
    classrooms: Vec<Classroom>,
}

impl ClassroomAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_info(&mut self, info: ClassroomInfo) {
        self.commit();
        self.pending = Some(Pending {
            info,
            ..Pending::default()
        });
    }

    /// Schedules seen before the first info fragment have no owner.
    pub fn push_schedule(&mut self, schedule: Option<Vec<ScheduleSlot>>) {
        if let Some(pending) = self.pending.as_mut() {
            pending.schedule = schedule;
        }
    }

    pub fn push_vacancies(&mut self, vacancies: Option<Vacancies>) {
        if let Some(pending) = self.pending.as_mut() {
            pending.vacancies = vacancies;
        }
    }

    pub fn finish(mut self) -> Vec<Classroom> {
        self.commit();
        self.classrooms
    }

    fn commit(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let code = pending.info.code.clone();
        match pending.into_classroom() {
            Some(classroom) => self.classrooms.push(classroom),
            None => log::debug!("Dropping incomplete classroom {code:?}"),
        }
    }
}

/// Combine a lecture page's header and credits with its classrooms.
///
/// Returns `None` when there is no classroom or the subject code could not
/// be read.
pub fn assemble_lecture(
    header: Option<SubjectHeader>,
    credits: Option<Credits>,
    classrooms: Vec<Classroom>,
    units: &UnitDirectory,
) -> Option<Lecture> {
    if classrooms.is_empty() {
        return None;
    }
    let header = header?;
    let code = header.code?;
    let credits = credits.unwrap_or_default();

    Some(Lecture {
        code,
        name: header.name.unwrap_or_default(),
        campus: units.campus_of(&header.unit).to_string(),
        unit: header.unit,
        department: header.department,
        credit_class: credits.class,
        credit_work: credits.work,
        classrooms,
    })
}

/// Identifiers carried by a course detail link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseLink {
    /// `"{codcur}-{codhab}"`
    pub code: Option<String>,

    /// `codcg` unit code
    pub unit_code: Option<String>,
}

/// Combine a course listing, its link identifiers and its curriculum.
///
/// Returns `None` when the link carries no course code.
pub fn assemble_course(
    listing: &CourseListing,
    link: CourseLink,
    name: String,
    periods: Option<Periods>,
    units: &UnitDirectory,
) -> Option<Course> {
    let code = link.code?;
    let unit = link
        .unit_code
        .as_deref()
        .and_then(|c| units.name_of(c))
        .map(str::to_string);

    Some(Course {
        code,
        name,
        unit,
        period: listing.ideal_period.clone(),
        periods: periods.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurriculumCategory, CurriculumEntry, VacancyCategory};

    fn info(code: Option<&str>) -> ClassroomInfo {
        ClassroomInfo {
            code: code.map(str::to_string),
            ..ClassroomInfo::default()
        }
    }

    fn schedule() -> Option<Vec<ScheduleSlot>> {
        Some(vec![ScheduleSlot {
            day: "seg".to_string(),
            start_time: "08:00".to_string(),
            end_time: "10:00".to_string(),
            professors: vec![],
        }])
    }

    fn vacancies() -> Option<Vacancies> {
        let mut v = Vacancies::new();
        v.insert("Obrigatória".to_string(), VacancyCategory::default());
        Some(v)
    }

    fn units() -> UnitDirectory {
        UnitDirectory::new(vec![(
            "Instituto de Matemática e Estatística".to_string(),
            "45".to_string(),
        )])
    }

    #[test]
    fn incomplete_slot_is_dropped_but_earlier_one_kept() {
        let mut assembler = ClassroomAssembler::new();
        assembler.push_info(info(Some("2024101")));
        assembler.push_schedule(schedule());
        assembler.push_vacancies(vacancies());
        assembler.push_info(info(Some("2024102")));
        assembler.push_schedule(schedule());

        let classrooms = assembler.finish();
        assert_eq!(classrooms.len(), 1);
        assert_eq!(classrooms[0].code, "2024101");
    }

    #[test]
    fn slot_without_code_is_dropped() {
        let mut assembler = ClassroomAssembler::new();
        assembler.push_info(info(None));
        assembler.push_schedule(schedule());
        assembler.push_vacancies(vacancies());
        assert!(assembler.finish().is_empty());
    }

    #[test]
    fn fragments_before_first_info_are_discarded() {
        let mut assembler = ClassroomAssembler::new();
        assembler.push_schedule(schedule());
        assembler.push_vacancies(vacancies());
        assembler.push_info(info(Some("2024101")));
        assert!(assembler.finish().is_empty());
    }

    #[test]
    fn later_fragments_overwrite_earlier_ones() {
        let mut assembler = ClassroomAssembler::new();
        assembler.push_info(info(Some("2024101")));
        assembler.push_schedule(schedule());
        assembler.push_schedule(None);
        assembler.push_vacancies(vacancies());
        assert!(assembler.finish().is_empty());
    }

    #[test]
    fn lecture_requires_code_and_classrooms() {
        let header = SubjectHeader {
            unit: "Instituto de Matemática e Estatística".to_string(),
            department: "Ciência da Computação".to_string(),
            code: Some("MAC0110".to_string()),
            name: Some("Introdução à Computação".to_string()),
        };

        let mut assembler = ClassroomAssembler::new();
        assembler.push_info(info(Some("2024101")));
        assembler.push_schedule(schedule());
        assembler.push_vacancies(vacancies());
        let classrooms = assembler.finish();

        let lecture = assemble_lecture(
            Some(header.clone()),
            Some(Credits { class: 4, work: 0 }),
            classrooms.clone(),
            &units(),
        )
        .unwrap();
        assert_eq!(lecture.code, "MAC0110");
        assert_eq!(lecture.campus, "São Paulo");
        assert_eq!(lecture.credit_class, 4);
        assert_eq!(lecture.classrooms.len(), 1);

        assert!(assemble_lecture(Some(header.clone()), None, vec![], &units()).is_none());

        let unresolved = SubjectHeader {
            code: None,
            ..header
        };
        assert!(assemble_lecture(Some(unresolved), None, classrooms, &units()).is_none());
    }

    #[test]
    fn unknown_unit_falls_back_to_other_campus() {
        let header = SubjectHeader {
            unit: "Unidade Desconhecida".to_string(),
            department: String::new(),
            code: Some("XYZ0001".to_string()),
            name: None,
        };
        let mut assembler = ClassroomAssembler::new();
        assembler.push_info(info(Some("1")));
        assembler.push_schedule(schedule());
        assembler.push_vacancies(vacancies());

        let lecture =
            assemble_lecture(Some(header), None, assembler.finish(), &units()).unwrap();
        assert_eq!(lecture.campus, crate::models::OTHER_CAMPUS);
        assert_eq!(lecture.credit_class, 0);
        assert_eq!(lecture.name, "");
    }

    #[test]
    fn course_resolves_unit_and_keeps_period_label() {
        let listing = CourseListing {
            link: "listarGradeCurricular?codcg=45&codcur=45052&codhab=1".to_string(),
            ideal_period: "8".to_string(),
        };
        let mut periods = Periods::new();
        periods.insert(
            "1".to_string(),
            vec![CurriculumEntry::new("MAC0110", CurriculumCategory::Mandatory)],
        );

        let course = assemble_course(
            &listing,
            CourseLink {
                code: Some("45052-1".to_string()),
                unit_code: Some("45".to_string()),
            },
            "Ciência da Computação".to_string(),
            Some(periods),
            &units(),
        )
        .unwrap();

        assert_eq!(course.code, "45052-1");
        assert_eq!(
            course.unit.as_deref(),
            Some("Instituto de Matemática e Estatística")
        );
        assert_eq!(course.period, "8");
        assert_eq!(course.periods["1"].len(), 1);

        assert!(
            assemble_course(&listing, CourseLink::default(), String::new(), None, &units())
                .is_none()
        );
    }
}
