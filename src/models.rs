use serde::{Deserialize, Serialize};

/// Payload returned by `POST /api/analyze`.
///
/// Sections the backend may leave out default to empty, so an older service
/// that only returns the score, missing skills and recommendations still
/// parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: f64,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub present_skills: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub trajectory: Vec<TrajectoryItem>,
    #[serde(default)]
    pub interview_questions: Vec<InterviewQuestion>,
    #[serde(default)]
    pub bullet_analysis: Vec<BulletAnalysis>,
    #[serde(default)]
    pub market_analysis: Option<MarketAnalysis>,
    #[serde(default)]
    pub success_prediction: Option<SuccessPrediction>,
    #[serde(default)]
    pub structure_analysis: Option<StructureAnalysis>,
    #[serde(default)]
    pub github_analysis: Option<serde_json::Value>, // carried through, not rendered
    #[serde(default)]
    pub resume_parsing_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryItem {
    pub skill: String,
    pub new_score: f64,
    pub boost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub category: String,
    pub skill: String,
    pub question: String,
    pub difficulty: String, // "Hard", "Medium", "N/A", ...
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletAnalysis {
    pub text: String,
    pub score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub role: String,
    pub salary_range: String,
    pub demand_level: String,
    pub demand_growth: String,
    #[serde(default)]
    pub top_skills: Vec<String>,
    pub avg_tenure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessPrediction {
    pub interview_probability: f64, // percent, 0-100
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub file_size_kb: f64,
    pub text_length: u64,
    pub is_scanned_pdf: bool,
    pub contact_info_present: bool,
}

#[cfg(test)]
pub(crate) fn sample_result_json() -> &'static str {
    r#"{
        "score": 68.5,
        "missing_skills": ["Kubernetes", "Terraform"],
        "present_skills": ["Go", "PostgreSQL", "Docker"],
        "recommendations": [
            "Add Kubernetes experience",
            "Quantify your impact",
            "Mention CI/CD pipelines",
            "Highlight on-call ownership",
            "Trim the summary"
        ],
        "trajectory": [
            {"skill": "Kubernetes", "new_score": 76.0, "boost": 7.5}
        ],
        "interview_questions": [
            {"category": "Weakness / Missing Skill", "skill": "Kubernetes",
             "question": "How would you debug a crash-looping pod?", "difficulty": "Hard"},
            {"category": "Behavioral", "skill": "Soft Skills",
             "question": "Tell me about a conflict you resolved.", "difficulty": "N/A"}
        ],
        "bullet_analysis": [
            {"text": "Worked on backend services", "score": 35,
             "suggestions": ["Start with a strong action verb", "Add quantification"]}
        ],
        "market_analysis": {
            "role": "Backend Developer", "salary_range": "$95k - $165k",
            "demand_level": "High", "demand_growth": "+15%",
            "top_skills": ["Python", "Go", "PostgreSQL", "Redis", "Kubernetes"],
            "avg_tenure": "2.3 years"
        },
        "success_prediction": {"interview_probability": 54.2, "tips": ["Tailor your summary"]},
        "structure_analysis": {"file_size_kb": 84.1, "text_length": 3120,
                               "is_scanned_pdf": false, "contact_info_present": true},
        "github_analysis": null,
        "resume_parsing_status": "success"
    }"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_result() {
        let result: AnalysisResult = serde_json::from_str(sample_result_json()).unwrap();
        assert_eq!(result.score, 68.5);
        assert_eq!(result.missing_skills, vec!["Kubernetes", "Terraform"]);
        assert_eq!(result.trajectory[0].boost, 7.5);
        assert_eq!(result.interview_questions.len(), 2);
        assert_eq!(result.bullet_analysis[0].score, 35.0);
        assert_eq!(result.market_analysis.as_ref().unwrap().demand_growth, "+15%");
        assert_eq!(result.success_prediction.as_ref().unwrap().tips.len(), 1);
        assert!(result.structure_analysis.as_ref().unwrap().contact_info_present);
        assert!(result.github_analysis.is_none());
        assert_eq!(result.resume_parsing_status, "success");
    }

    #[test]
    fn test_parse_minimal_result() {
        // Shape produced by the bare scoring endpoint
        let body = r#"{
            "score": 42.0,
            "missing_skills": ["Rust"],
            "recommendations": ["Learn Rust"],
            "resume_parsing_status": "success"
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.score, 42.0);
        assert!(result.present_skills.is_empty());
        assert!(result.trajectory.is_empty());
        assert!(result.market_analysis.is_none());
        assert!(result.structure_analysis.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_score() {
        let result = serde_json::from_str::<AnalysisResult>(r#"{"missing_skills": []}"#);
        assert!(result.is_err());
    }
}
