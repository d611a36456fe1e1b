//! Curriculum table extraction from course pages.
//!
//! The table is one long run of rows: category headers, period headers,
//! subject rows (first cell is a 7-character code) and requisite rows that
//! belong to the subject row right above them.

use regex::Regex;

use crate::error::Result;
use crate::extract::{Fragment, FragmentExtractor, normalize_whitespace};
use crate::models::{CurriculumCategory, CurriculumEntry, Periods};

/// Length of a subject code.
const CODE_LEN: usize = 7;

pub struct CurriculumExtractor {
    period: Regex,
}

impl CurriculumExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            period: Regex::new(r"(\d+)º Período Ideal")?,
        })
    }

    /// Period label exactly as printed, leading zeros included.
    fn period_label(&self, text: &str) -> Option<String> {
        self.period
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl FragmentExtractor for CurriculumExtractor {
    type Record = Periods;

    fn extract(&self, fragment: &Fragment) -> Option<Periods> {
        let mut periods = Periods::new();
        let mut category = CurriculumCategory::default();
        let mut current: Option<String> = None;

        for row in &fragment.rows {
            let lead = normalize_whitespace(row.lead.as_deref().unwrap_or(""));

            if let Some(header) = CurriculumCategory::from_header(&lead) {
                category = header;
                continue;
            }
            if let Some(label) = self.period_label(&lead) {
                periods.entry(label.clone()).or_default();
                current = Some(label);
                continue;
            }

            // Rows above the first period header have nowhere to go.
            let Some(entries) = current.as_ref().and_then(|p| periods.get_mut(p)) else {
                continue;
            };

            let first = row.cells.first().map_or("", |c| c.first_or_empty());
            if first.chars().count() == CODE_LEN {
                entries.push(CurriculumEntry::new(first, category));
            } else if row.len() >= 2 {
                let Some(last) = entries.last_mut() else {
                    continue;
                };
                // Requisite codes are cut to CODE_LEN but never length-checked.
                let code: String = first.chars().take(CODE_LEN).collect();
                match row.cells[1].first_or_empty() {
                    "Requisito fraco" => last.weak_requisites.push(code),
                    "Requisito" => last.strong_requisites.push(code),
                    "Indicação de Conjunto" => last.set_indications.push(code),
                    _ => {}
                }
            }
        }

        Some(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(rows: &[&[&str]]) -> Periods {
        CurriculumExtractor::new()
            .unwrap()
            .extract(&Fragment::from_rows(rows))
            .unwrap()
    }

    #[test]
    fn builds_periods_with_requisites() {
        let periods = extract(&[
            &["Disciplinas Obrigatórias"],
            &["1º Período Ideal"],
            &["MAC0110", "Introdução à Computação", "4", "0"],
            &["MAT2453", "Cálculo Diferencial e Integral I", "6", "0"],
            &["2º Período Ideal"],
            &["MAC0121", "Algoritmos e Estruturas de Dados I", "4", "0"],
            &["MAC0110 - Introdução à Computação", "Requisito"],
            &["MAT2453 - Cálculo I", "Requisito fraco"],
            &["MAC0105 - Fundamentos", "Indicação de Conjunto"],
            &["MAC0000 - Outra", "Co-requisito"],
        ]);

        assert_eq!(periods.len(), 2);
        assert_eq!(periods["1"].len(), 2);
        assert!(periods["1"].iter().all(|e| e.category == CurriculumCategory::Mandatory));

        let mac0121 = &periods["2"][0];
        assert_eq!(mac0121.code, "MAC0121");
        assert_eq!(mac0121.strong_requisites, vec!["MAC0110".to_string()]);
        assert_eq!(mac0121.weak_requisites, vec!["MAT2453".to_string()]);
        assert_eq!(mac0121.set_indications, vec!["MAC0105".to_string()]);
    }

    #[test]
    fn code_cell_must_be_exactly_seven_characters() {
        let periods = extract(&[
            &["1º Período Ideal"],
            &["MAC011", "Seis caracteres", "4", "0"],
            &["MAC01100", "Oito caracteres", "4", "0"],
            &["MAC0110", "Sete caracteres", "4", "0"],
        ]);

        assert_eq!(periods["1"].len(), 1);
        assert_eq!(periods["1"][0].code, "MAC0110");
    }

    #[test]
    fn requisites_attach_within_current_period_only() {
        let periods = extract(&[
            &["1º Período Ideal"],
            &["MAC0110", "Introdução à Computação"],
            &["3º Período Ideal"],
            &["MAC0110 - Introdução", "Requisito"],
            &["MAC0323", "Algoritmos II"],
        ]);

        assert!(periods["1"][0].strong_requisites.is_empty());
        assert_eq!(periods["3"].len(), 1);
        assert!(periods["3"][0].strong_requisites.is_empty());
    }

    #[test]
    fn category_changes_apply_to_later_entries() {
        let periods = extract(&[
            &["Disciplinas Obrigatórias"],
            &["1º Período Ideal"],
            &["MAC0110", "Obrigatória"],
            &["Disciplinas  Optativas\nEletivas"],
            &["1º Período Ideal"],
            &["MAC0499", "Eletiva"],
            &["Disciplinas Optativas Livres"],
            &["5º Período Ideal"],
            &["FLF0115", "Livre"],
        ]);

        assert_eq!(periods["1"][0].category, CurriculumCategory::Mandatory);
        assert_eq!(periods["1"][1].category, CurriculumCategory::ElectiveTechnical);
        assert_eq!(periods["5"][0].category, CurriculumCategory::ElectiveFree);
    }

    #[test]
    fn rows_before_first_period_are_ignored() {
        let periods = extract(&[
            &["Disciplinas Obrigatórias"],
            &["MAC0110", "Sem período"],
            &["1º Período Ideal"],
        ]);

        assert_eq!(periods.len(), 1);
        assert!(periods["1"].is_empty());
    }

    #[test]
    fn short_requisite_code_is_kept_whole() {
        let periods = extract(&[
            &["1º Período Ideal"],
            &["MAC0110", "Introdução"],
            &["ABC", "Requisito"],
        ]);
        assert_eq!(periods["1"][0].strong_requisites, vec!["ABC".to_string()]);
    }

    #[test]
    fn period_labels_are_kept_as_printed() {
        let periods = extract(&[
            &["01º Período Ideal"],
            &["MAC0110", "Introdução"],
            &["99999999999999999999º Período Ideal"],
            &["MAC0499", "Trabalho de Formatura"],
        ]);

        assert_eq!(
            periods.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["01", "99999999999999999999"]
        );
        assert_eq!(periods["01"][0].code, "MAC0110");
        assert_eq!(periods["99999999999999999999"][0].code, "MAC0499");
    }
}
