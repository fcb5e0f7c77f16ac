use std::fmt::Write;

use crate::dashboard::{
    ats_checks, score_label, top_actions, visible_missing_skills,
};
use crate::models::AnalysisResult;

const WIDTH: usize = 76;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.len()));
}

fn wrapped(out: &mut String, prefix: &str, text: &str) {
    let indent = " ".repeat(prefix.len());
    let options = textwrap::Options::new(WIDTH)
        .initial_indent(prefix)
        .subsequent_indent(&indent);
    let _ = writeln!(out, "{}", textwrap::fill(text, options));
}

/// Plain-text rendering of every dashboard tab, for `skillgap analyze`.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Match score: {:.0}/100 ({})",
        result.score,
        score_label(result.score)
    );
    if !result.resume_parsing_status.is_empty() {
        let _ = writeln!(out, "Resume parsing: {}", result.resume_parsing_status);
    }

    if let Some(structure) = &result.structure_analysis {
        section(&mut out, "ATS Compatibility");
        for check in ats_checks(structure) {
            let mark = if check.passed { "ok" } else { "!!" };
            let _ = writeln!(out, "  [{}] {:<18} {}", mark, check.label, check.detail);
        }
    }

    let actions = top_actions(result);
    if !actions.is_empty() {
        section(&mut out, "Top Priority Actions");
        for (i, action) in actions.iter().enumerate() {
            wrapped(&mut out, &format!("  {}. ", i + 1), action);
        }
    }

    section(&mut out, "Skills");
    let (missing, hidden) = visible_missing_skills(result, true);
    debug_assert_eq!(hidden, 0);
    if missing.is_empty() {
        let _ = writeln!(out, "  Missing: none");
    } else {
        wrapped(&mut out, "  Missing: ", &missing.join(", "));
    }
    if result.present_skills.is_empty() {
        let _ = writeln!(out, "  Matched: none");
    } else {
        wrapped(&mut out, "  Matched: ", &result.present_skills.join(", "));
    }

    if !result.trajectory.is_empty() {
        section(&mut out, "Job-Fit Simulation");
        for item in &result.trajectory {
            let _ = writeln!(
                out,
                "  + Learn {:<20} +{:.1}%  ({:.0}% -> {:.0}%)",
                item.skill,
                item.boost,
                result.score,
                item.new_score
            );
        }
    }

    if let Some(market) = &result.market_analysis {
        section(&mut out, &format!("Market Insights: {}", market.role));
        let _ = writeln!(out, "  Salary range: {}", market.salary_range);
        let _ = writeln!(out, "  Demand:       {} ({})", market.demand_level, market.demand_growth);
        let _ = writeln!(out, "  Avg tenure:   {}", market.avg_tenure);
        if !market.top_skills.is_empty() {
            wrapped(&mut out, "  Top skills:   ", &market.top_skills.join(", "));
        }
    }

    if let Some(prediction) = &result.success_prediction {
        section(&mut out, "Application Success Predictor");
        let _ = writeln!(
            out,
            "  Interview probability: {:.1}%",
            prediction.interview_probability
        );
        for tip in &prediction.tips {
            wrapped(&mut out, "  - ", tip);
        }
    }

    if !result.bullet_analysis.is_empty() {
        section(&mut out, "Resume Studio");
        for bullet in &result.bullet_analysis {
            wrapped(&mut out, &format!("  [{:>3.0}] ", bullet.score), &bullet.text);
            for suggestion in &bullet.suggestions {
                wrapped(&mut out, "        -> ", suggestion);
            }
        }
    }

    if !result.interview_questions.is_empty() {
        section(&mut out, "Mock Interview Prep");
        for (i, q) in result.interview_questions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. [{}] {} ({})",
                i + 1,
                q.category,
                q.skill,
                q.difficulty
            );
            wrapped(&mut out, "     ", &q.question);
        }
    }

    out
}
