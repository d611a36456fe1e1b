//! Vacancy table extraction.

use indexmap::IndexMap;

use crate::extract::{Fragment, FragmentExtractor, Row, to_int};
use crate::models::{Vacancies, VacancyCategory, VacancyCounts, VacancySubgroup};

/// Rebuilds vacancy categories and their subgroups.
///
/// Five-cell rows with a label open a category; six-cell rows that follow
/// add subgroups to it. Other row shapes carry headers or totals and are
/// skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct VacancyExtractor;

impl FragmentExtractor for VacancyExtractor {
    type Record = Vacancies;

    fn extract(&self, fragment: &Fragment) -> Option<Self::Record> {
        let mut vacancies = Vacancies::new();
        let mut current: Option<(String, VacancyCategory)> = None;

        for row in &fragment.rows {
            match row.len() {
                5 if !row.text(0).is_empty() => {
                    if let Some((label, category)) = current.take() {
                        vacancies.insert(label, category);
                    }
                    let category = VacancyCategory {
                        counts: counts(row, 1),
                        subgroups: IndexMap::new(),
                    };
                    current = Some((row.text(0).to_string(), category));
                }
                6 => {
                    if let Some((_, category)) = current.as_mut() {
                        category.subgroups.insert(
                            row.text(1).to_string(),
                            VacancySubgroup {
                                counts: counts(row, 2),
                            },
                        );
                    }
                }
                _ => {}
            }
        }

        if let Some((label, category)) = current {
            vacancies.insert(label, category);
        }

        (!vacancies.is_empty()).then_some(vacancies)
    }
}

/// Four consecutive integer cells starting at `offset`.
fn counts(row: &Row, offset: usize) -> VacancyCounts {
    VacancyCounts {
        offered: to_int(row.text(offset)),
        interested: to_int(row.text(offset + 1)),
        pending: to_int(row.text(offset + 2)),
        enrolled: to_int(row.text(offset + 3)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(rows: &[&[&str]]) -> Option<Vacancies> {
        VacancyExtractor.extract(&Fragment::from_rows(rows))
    }

    #[test]
    fn category_with_subgroup() {
        let vacancies = extract(&[
            &["", "Vagas", "Inscritos", "Pendentes", "Matriculados"],
            &["Diurno", "10", "5", "1", "4"],
            &["", "G1", "3", "2", "0", "2"],
        ])
        .unwrap();

        assert_eq!(vacancies.len(), 1);
        let diurno = &vacancies["Diurno"];
        assert_eq!(
            diurno.counts,
            VacancyCounts {
                offered: 10,
                interested: 5,
                pending: 1,
                enrolled: 4
            }
        );
        assert_eq!(
            diurno.subgroups["G1"].counts,
            VacancyCounts {
                offered: 3,
                interested: 2,
                pending: 0,
                enrolled: 2
            }
        );
    }

    #[test]
    fn several_categories_are_flushed() {
        let vacancies = extract(&[
            &["Obrigatória", "60", "70", "0", "58"],
            &["", "IME - Bacharelado", "50", "55", "0", "50"],
            &["", "IME - Licenciatura", "10", "15", "0", "8"],
            &["Optativa", "20", "3", "", "n/d"],
        ])
        .unwrap();

        assert_eq!(vacancies.len(), 2);
        assert_eq!(vacancies["Obrigatória"].subgroups.len(), 2);
        let optativa = &vacancies["Optativa"];
        assert_eq!(optativa.counts.offered, 20);
        assert_eq!(optativa.counts.pending, 0);
        assert_eq!(optativa.counts.enrolled, 0);
        assert!(optativa.subgroups.is_empty());
    }

    #[test]
    fn categories_keep_table_order() {
        let vacancies = extract(&[
            &["Optativa", "20", "3", "0", "2"],
            &["", "IME - Licenciatura", "10", "15", "0", "8"],
            &["", "IME - Bacharelado", "50", "55", "0", "50"],
            &["Obrigatória", "60", "70", "0", "58"],
        ])
        .unwrap();

        assert_eq!(
            vacancies.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Optativa", "Obrigatória"]
        );
        assert_eq!(
            vacancies["Optativa"].subgroups.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["IME - Licenciatura", "IME - Bacharelado"]
        );
    }

    #[test]
    fn subgroup_without_category_is_ignored() {
        assert_eq!(extract(&[&["", "G1", "3", "2", "0", "2"]]), None);
    }

    #[test]
    fn other_row_lengths_are_ignored() {
        let vacancies = extract(&[
            &["Vagas"],
            &["Geral", "1", "2", "3", "4"],
            &["Total", "9", "9", "9"],
            &["", "a", "b", "c", "d", "e", "f"],
        ])
        .unwrap();

        assert_eq!(vacancies.len(), 1);
        assert!(vacancies["Geral"].subgroups.is_empty());
    }
}
