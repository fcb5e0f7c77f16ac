//! Read-only projections of an [`AnalysisResult`] into what each results tab
//! shows. Shared by the terminal dashboard and the plain-text report.

use crate::models::{AnalysisResult, BulletAnalysis, StructureAnalysis};

pub const TOP_ACTIONS: usize = 4;
pub const MISSING_SKILLS_PREVIEW: usize = 15;
const MIN_EXTRACTED_TEXT: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Overview,
    Skills,
    Market,
    ResumeStudio,
    Interview,
}

impl ResultTab {
    pub const ALL: [ResultTab; 5] = [
        ResultTab::Overview,
        ResultTab::Skills,
        ResultTab::Market,
        ResultTab::ResumeStudio,
        ResultTab::Interview,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ResultTab::Overview => "Overview",
            ResultTab::Skills => "Skills",
            ResultTab::Market => "Market",
            ResultTab::ResumeStudio => "Resume Studio",
            ResultTab::Interview => "Interview",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Traffic-light grade used to colour scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

pub fn score_grade(score: f64) -> Grade {
    if score >= 80.0 {
        Grade::Good
    } else if score >= 50.0 {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Interview likelihood uses a lower bar than the match score.
pub fn probability_grade(probability: f64) -> Grade {
    if probability >= 70.0 {
        Grade::Good
    } else if probability >= 40.0 {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Bullets are only flagged when weak; anything else is neutral.
pub fn bullet_grade(score: f64) -> Grade {
    if score < 50.0 { Grade::Poor } else { Grade::Fair }
}

pub fn score_label(score: f64) -> &'static str {
    if score >= 75.0 {
        "Excellent Match"
    } else if score >= 50.0 {
        "Good Potential"
    } else {
        "Needs Improvement"
    }
}

/// Gauge ratio in `0.0..=1.0`; out-of-range scores are clamped.
pub fn score_ratio(score: f64) -> f64 {
    (score / 100.0).clamp(0.0, 1.0)
}

pub fn top_actions(result: &AnalysisResult) -> &[String] {
    let n = result.recommendations.len().min(TOP_ACTIONS);
    &result.recommendations[..n]
}

/// Missing skills to list, plus how many were held back.
pub fn visible_missing_skills(result: &AnalysisResult, show_all: bool) -> (&[String], usize) {
    let skills = &result.missing_skills;
    if show_all || skills.len() <= MISSING_SKILLS_PREVIEW {
        (skills, 0)
    } else {
        (
            &skills[..MISSING_SKILLS_PREVIEW],
            skills.len() - MISSING_SKILLS_PREVIEW,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtsCheck {
    pub label: &'static str,
    pub passed: bool,
    pub detail: String,
}

pub fn ats_checks(structure: &StructureAnalysis) -> Vec<AtsCheck> {
    let readable = structure.text_length >= MIN_EXTRACTED_TEXT && !structure.is_scanned_pdf;
    vec![
        AtsCheck {
            label: "File size",
            passed: true,
            detail: format!("{:.1} KB", structure.file_size_kb),
        },
        AtsCheck {
            label: "Text readability",
            passed: readable,
            detail: if structure.is_scanned_pdf {
                "Looks like a scanned PDF; ATS may not read it".to_string()
            } else if structure.text_length < MIN_EXTRACTED_TEXT {
                format!("Only {} characters extracted", structure.text_length)
            } else {
                format!("{} characters extracted", structure.text_length)
            },
        },
        AtsCheck {
            label: "Contact info",
            passed: structure.contact_info_present,
            detail: if structure.contact_info_present {
                "Email or phone found".to_string()
            } else {
                "No email or phone detected".to_string()
            },
        },
    ]
}

/// Extra coaching shown next to a bullet suggestion, keyed on its wording.
pub fn suggestion_hint(suggestion: &str) -> Option<&'static str> {
    let lower = suggestion.to_lowercase();
    if lower.contains("action verb") {
        Some("e.g. Led, Built, Reduced, Automated, Shipped")
    } else if lower.contains("quantif") {
        Some("Add a number: %, $, time saved, users served")
    } else {
        None
    }
}

pub const BULLET_FORMULA: &str = "Action Verb + Task/Project + Result/Impact (Metrics)";

pub fn bullet_at(result: &AnalysisResult, index: usize) -> Option<&BulletAnalysis> {
    result.bullet_analysis.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_result_json;

    fn sample() -> AnalysisResult {
        serde_json::from_str(sample_result_json()).unwrap()
    }

    #[test]
    fn test_score_label_thresholds() {
        assert_eq!(score_label(75.0), "Excellent Match");
        assert_eq!(score_label(74.9), "Good Potential");
        assert_eq!(score_label(50.0), "Good Potential");
        assert_eq!(score_label(49.9), "Needs Improvement");
    }

    #[test]
    fn test_score_grade_thresholds() {
        assert_eq!(score_grade(80.0), Grade::Good);
        assert_eq!(score_grade(79.0), Grade::Fair);
        assert_eq!(score_grade(50.0), Grade::Fair);
        assert_eq!(score_grade(10.0), Grade::Poor);
    }

    #[test]
    fn test_score_ratio_clamps() {
        assert_eq!(score_ratio(68.5), 0.685);
        assert_eq!(score_ratio(140.0), 1.0);
        assert_eq!(score_ratio(-3.0), 0.0);
    }

    #[test]
    fn test_top_actions_limits_to_four() {
        let result = sample();
        assert_eq!(result.recommendations.len(), 5);
        let actions = top_actions(&result);
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], "Add Kubernetes experience");

        let mut short = sample();
        short.recommendations.truncate(2);
        assert_eq!(top_actions(&short).len(), 2);
    }

    #[test]
    fn test_missing_skills_preview() {
        let mut result = sample();
        result.missing_skills = (0..20).map(|i| format!("skill-{i}")).collect();

        let (visible, hidden) = visible_missing_skills(&result, false);
        assert_eq!(visible.len(), 15);
        assert_eq!(hidden, 5);

        let (visible, hidden) = visible_missing_skills(&result, true);
        assert_eq!(visible.len(), 20);
        assert_eq!(hidden, 0);

        let short = sample();
        let (visible, hidden) = visible_missing_skills(&short, false);
        assert_eq!(visible.len(), 2);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_probability_grade_thresholds() {
        assert_eq!(probability_grade(70.0), Grade::Good);
        assert_eq!(probability_grade(69.9), Grade::Fair);
        assert_eq!(probability_grade(54.2), Grade::Fair);
        assert_eq!(probability_grade(40.0), Grade::Fair);
        assert_eq!(probability_grade(39.9), Grade::Poor);
    }

    #[test]
    fn test_bullet_grade_flags_weak_bullets() {
        assert_eq!(bullet_grade(35.0), Grade::Poor);
        assert_eq!(bullet_grade(49.9), Grade::Poor);
        assert_eq!(bullet_grade(50.0), Grade::Fair);
        assert_eq!(bullet_grade(90.0), Grade::Fair);
    }

    #[test]
    fn test_ats_checks_short_text_fails() {
        let structure = StructureAnalysis {
            file_size_kb: 12.0,
            text_length: 150,
            is_scanned_pdf: false,
            contact_info_present: false,
        };
        let checks = ats_checks(&structure);
        assert_eq!(checks.len(), 3);
        assert!(!checks[1].passed);
        assert!(checks[1].detail.contains("150"));
        assert!(!checks[2].passed);
    }

    #[test]
    fn test_ats_checks_scanned_pdf_fails() {
        let structure = StructureAnalysis {
            file_size_kb: 900.0,
            text_length: 5000,
            is_scanned_pdf: true,
            contact_info_present: true,
        };
        let checks = ats_checks(&structure);
        assert!(!checks[1].passed);
        assert!(checks[1].detail.contains("scanned"));
        assert!(checks[2].passed);
    }

    #[test]
    fn test_suggestion_hint() {
        assert!(suggestion_hint("Start with a strong action verb").is_some());
        assert!(suggestion_hint("Add quantification (numbers, %)").is_some());
        assert!(suggestion_hint("Too long").is_none());
    }

    #[test]
    fn test_tab_cycling() {
        assert_eq!(ResultTab::Overview.next(), ResultTab::Skills);
        assert_eq!(ResultTab::Interview.next(), ResultTab::Overview);
        assert_eq!(ResultTab::Overview.prev(), ResultTab::Interview);
        assert_eq!(ResultTab::ResumeStudio.index(), 3);
    }
}
