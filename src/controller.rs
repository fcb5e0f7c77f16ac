use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::models::AnalysisResult;
use crate::request::{AnalysisRequest, Upload};
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading { ticket: u64 },
    ShowingResults(AnalysisResult),
}

/// A request released by [`Controller::begin_submit`]. The ticket must be
/// handed back to [`Controller::complete`] with the outcome.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: u64,
    pub request: AnalysisRequest,
}

/// Form inputs plus the upload → analyze → display state machine.
#[derive(Debug)]
pub struct Controller {
    resume: Option<Upload>,
    jd_text: String,
    jd_file: Option<Upload>,
    github_url: String,
    phase: Phase,
    error: Option<String>,
    analyzed_at: Option<DateTime<Local>>,
    next_ticket: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            resume: None,
            jd_text: String::new(),
            jd_file: None,
            github_url: String::new(),
            phase: Phase::Idle,
            error: None,
            analyzed_at: None,
            next_ticket: 1,
        }
    }

    // --- Form state ---

    pub fn set_resume(&mut self, resume: Option<Upload>) {
        self.resume = resume;
    }

    pub fn set_jd_text(&mut self, text: &str) {
        self.jd_text = text.to_string();
        if !text.is_empty() {
            self.jd_file = None;
        }
    }

    pub fn set_jd_file(&mut self, file: Option<Upload>) {
        if file.is_some() {
            self.jd_text.clear();
        }
        self.jd_file = file;
    }

    pub fn set_github_url(&mut self, url: &str) {
        self.github_url = url.to_string();
    }

    pub fn resume(&self) -> Option<&Upload> {
        self.resume.as_ref()
    }

    pub fn jd_text(&self) -> &str {
        &self.jd_text
    }

    pub fn jd_file(&self) -> Option<&Upload> {
        self.jd_file.as_ref()
    }

    pub fn github_url(&self) -> &str {
        &self.github_url
    }

    // --- View state ---

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::ShowingResults(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analyzed_at(&self) -> Option<DateTime<Local>> {
        self.analyzed_at
    }

    /// Local error raised outside of submission, e.g. an unreadable file path.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    // --- Transitions ---

    /// Idle → Loading. Returns `None` without touching the network when a
    /// request is already in flight, results are showing, or inputs are
    /// missing (the latter leaves a validation message in the error slot).
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase_name(), "Submit ignored");
            return None;
        }

        self.error = None;

        let request = match AnalysisRequest::build(
            self.resume.clone(),
            &self.jd_text,
            self.jd_file.clone(),
            &self.github_url,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = Phase::Loading { ticket };
        info!(ticket, "Analysis started");

        Some(Submission { ticket, request })
    }

    /// Loading → ShowingResults on success, Loading → Idle with an error
    /// message on failure. Outcomes for any other ticket are dropped.
    pub fn complete(&mut self, ticket: u64, outcome: Result<AnalysisResult, TransportError>) {
        if self.phase != (Phase::Loading { ticket }) {
            warn!(ticket, phase = ?self.phase_name(), "Discarding stale analysis outcome");
            return;
        }

        match outcome {
            Ok(result) => {
                self.error = None;
                self.analyzed_at = Some(Local::now());
                self.phase = Phase::ShowingResults(result);
            }
            Err(e) => {
                warn!(ticket, error = %e, "Analysis failed");
                self.error = Some(e.to_string());
                self.phase = Phase::Idle;
            }
        }
    }

    /// Runs a whole submission synchronously on the calling thread.
    pub fn analyze(&mut self, transport: &dyn Transport) {
        if let Some(submission) = self.begin_submit() {
            let outcome = transport.submit(&submission.request);
            self.complete(submission.ticket, outcome);
        }
    }

    /// ShowingResults → Idle. Form inputs are kept for the next run.
    pub fn start_new_analysis(&mut self) {
        if let Phase::ShowingResults(_) = self.phase {
            self.phase = Phase::Idle;
            self.error = None;
            self.analyzed_at = None;
        }
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "idle",
            Phase::Loading { .. } => "loading",
            Phase::ShowingResults(_) => "showing_results",
        }
    }
}
