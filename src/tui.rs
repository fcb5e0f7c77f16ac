use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info};

use crate::controller::{Controller, Phase};
use crate::dashboard::{self, Grade, ResultTab};
use crate::models::{AnalysisResult, BulletAnalysis};
use crate::request::Upload;
use crate::transport::{Transport, TransportError};

type Outcome = (u64, Result<AnalysisResult, TransportError>);

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Resume,
    JobDescription,
    GithubUrl,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Resume => Field::JobDescription,
            Field::JobDescription => Field::GithubUrl,
            Field::GithubUrl => Field::Resume,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Resume => Field::GithubUrl,
            Field::JobDescription => Field::Resume,
            Field::GithubUrl => Field::JobDescription,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JdMode {
    Text,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Quit,
}

/// Initial form values, usually from the command line.
#[derive(Debug, Default, Clone)]
pub struct Prefill {
    pub resume: Option<String>,
    pub jd_text: Option<String>,
    pub jd_file: Option<String>,
    pub github_url: Option<String>,
}

pub struct App {
    controller: Controller,
    focus: Field,
    jd_mode: JdMode,
    resume_path: String,
    jd_file_path: String,
    tab: ResultTab,
    selected_bullet: usize,
    show_all_missing: bool,
    scroll_offset: u16,
    tick: usize,
}

impl App {
    pub fn new(prefill: Prefill) -> Self {
        let mut controller = Controller::new();
        if let Some(text) = &prefill.jd_text {
            controller.set_jd_text(text);
        }
        if let Some(url) = &prefill.github_url {
            controller.set_github_url(url);
        }
        let jd_mode = if prefill.jd_file.is_some() {
            JdMode::File
        } else {
            JdMode::Text
        };

        Self {
            controller,
            focus: Field::Resume,
            jd_mode,
            resume_path: prefill.resume.unwrap_or_default(),
            jd_file_path: prefill.jd_file.unwrap_or_default(),
            tab: ResultTab::Overview,
            selected_bullet: 0,
            show_all_missing: false,
            scroll_offset: 0,
            tick: 0,
        }
    }

    fn inputs_ready(&self) -> bool {
        let jd_ready = match self.jd_mode {
            JdMode::Text => !self.controller.jd_text().trim().is_empty(),
            JdMode::File => !self.jd_file_path.trim().is_empty(),
        };
        !self.resume_path.trim().is_empty() && jd_ready
    }

    /// Loads the typed paths into the controller. Returns false (with the
    /// error shown) if a file could not be read.
    fn sync_inputs(&mut self) -> bool {
        let resume = match load_optional(&self.resume_path) {
            Ok(upload) => upload,
            Err(e) => {
                self.controller.report_error(format!("{:#}", e));
                return false;
            }
        };
        self.controller.set_resume(resume);

        // Only the selected source is submitted.
        match self.jd_mode {
            JdMode::Text => self.controller.set_jd_file(None),
            JdMode::File => match load_optional(&self.jd_file_path) {
                Ok(file) => {
                    self.controller.set_jd_text("");
                    self.controller.set_jd_file(file);
                }
                Err(e) => {
                    self.controller.report_error(format!("{:#}", e));
                    return false;
                }
            },
        }
        true
    }

    /// Starts an analysis on a worker thread. Does nothing unless the
    /// controller is idle, so at most one request is ever in flight.
    pub fn dispatch(&mut self, transport: &Arc<dyn Transport>, tx: &Sender<Outcome>) {
        if *self.controller.phase() != Phase::Idle {
            return;
        }
        if !self.sync_inputs() {
            return;
        }
        let Some(submission) = self.controller.begin_submit() else {
            return;
        };

        let transport = Arc::clone(transport);
        let tx = tx.clone();
        thread::spawn(move || {
            let outcome = transport.submit(&submission.request);
            // Receiver is gone if the user quit mid-request.
            let _ = tx.send((submission.ticket, outcome));
        });
    }

    pub fn apply_outcome(&mut self, ticket: u64, outcome: Result<AnalysisResult, TransportError>) {
        let was_showing = self.controller.result().is_some();
        self.controller.complete(ticket, outcome);
        if !was_showing && self.controller.result().is_some() {
            self.tab = ResultTab::Overview;
            self.selected_bullet = 0;
            self.show_all_missing = false;
            self.scroll_offset = 0;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if self.controller.result().is_some() {
            self.handle_results_key(key)
        } else {
            self.handle_input_key(key)
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::F(5) => return Action::Submit,
            KeyCode::Char('r') if ctrl => return Action::Submit,
            KeyCode::F(2) => {
                self.jd_mode = match self.jd_mode {
                    JdMode::Text => JdMode::File,
                    JdMode::File => JdMode::Text,
                };
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => {
                if self.focus == Field::JobDescription && self.jd_mode == JdMode::Text {
                    self.edit_focused(|buf| buf.push('\n'));
                } else {
                    return Action::Submit;
                }
            }
            KeyCode::Backspace => self.edit_focused(|buf| {
                buf.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit_focused(|buf| buf.push(c)),
            _ => {}
        }
        Action::None
    }

    fn edit_focused<F: FnOnce(&mut String)>(&mut self, edit: F) {
        if self.controller.is_loading() {
            return;
        }
        match (self.focus, self.jd_mode) {
            (Field::Resume, _) => edit(&mut self.resume_path),
            (Field::JobDescription, JdMode::File) => edit(&mut self.jd_file_path),
            (Field::JobDescription, JdMode::Text) => {
                let mut text = self.controller.jd_text().to_string();
                edit(&mut text);
                self.controller.set_jd_text(&text);
            }
            (Field::GithubUrl, _) => {
                let mut url = self.controller.github_url().to_string();
                edit(&mut url);
                self.controller.set_github_url(&url);
            }
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Action {
        let bullets = self
            .controller
            .result()
            .map(|r| r.bullet_analysis.len())
            .unwrap_or(0);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('n') => {
                self.controller.start_new_analysis();
                self.focus = Field::Resume;
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.set_tab(self.tab.next()),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.set_tab(self.tab.prev()),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.set_tab(ResultTab::ALL[index]);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.tab == ResultTab::ResumeStudio {
                    if self.selected_bullet + 1 < bullets {
                        self.selected_bullet += 1;
                        self.scroll_offset = 0;
                    }
                } else {
                    self.scroll_offset = self.scroll_offset.saturating_add(1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.tab == ResultTab::ResumeStudio {
                    if self.selected_bullet > 0 {
                        self.selected_bullet -= 1;
                        self.scroll_offset = 0;
                    }
                } else {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
            }
            KeyCode::Char('J') | KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(5)
            }
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(5)
            }
            KeyCode::Char('m') if self.tab == ResultTab::Skills => {
                self.show_all_missing = !self.show_all_missing;
            }
            _ => {}
        }
        Action::None
    }

    fn set_tab(&mut self, tab: ResultTab) {
        if self.tab != tab {
            self.tab = tab;
            self.scroll_offset = 0;
        }
    }
}

fn load_optional(path: &str) -> Result<Option<Upload>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload::from_path(&expand_home(path))?))
}

/// Resolves a leading `~/` against the user's home directory. Paths are left
/// untouched when no home directory is known.
fn expand_home(path: &str) -> PathBuf {
    path.strip_prefix("~/")
        .and_then(|rest| directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(rest)))
        .unwrap_or_else(|| PathBuf::from(path))
}

pub fn run_dashboard(transport: Arc<dyn Transport>, prefill: Prefill) -> Result<()> {
    let mut app = App::new(prefill);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app, transport);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        error!(error = %e, "Dashboard exited with an error");
    }
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let (tx, rx): (Sender<Outcome>, Receiver<Outcome>) = mpsc::channel();
    info!("Dashboard started");

    loop {
        while let Ok((ticket, outcome)) = rx.try_recv() {
            app.apply_outcome(ticket, outcome);
        }

        terminal.draw(|frame| draw(frame, app))?;

        if !event::poll(Duration::from_millis(120))? {
            app.tick = app.tick.wrapping_add(1);
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Action::Quit => break,
                Action::Submit => app.dispatch(&transport, &tx),
                Action::None => {}
            }
        }
    }

    info!("Dashboard closed");
    Ok(())
}

// --- Drawing ---

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Good => Color::Green,
        Grade::Fair => Color::Yellow,
        Grade::Poor => Color::Red,
    }
}

fn bold(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", title))
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = match app.controller.analyzed_at() {
        Some(at) => format!(" Skill Gap Analyzer  |  analyzed {}", at.format("%H:%M:%S")),
        None => " Skill Gap Analyzer".to_string(),
    };
    frame.render_widget(
        Paragraph::new(header).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let help = match app.controller.result() {
        Some(result) => {
            draw_results(frame, app, result, chunks[1]);
            " h/l:tab  1-5:jump  j/k:scroll/select  m:more skills  n:new analysis  q:quit"
        }
        None => {
            draw_input(frame, app, chunks[1]);
            " Tab:next field  F2:text/file  Enter/F5:analyze  Esc:quit"
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let error_height = if app.controller.error().is_some() { 4 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(error_height),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(3), Constraint::Min(0)])
        .split(cols[0]);

    // Resume
    let resume_lines = vec![
        Line::from(format!("> {}", app.resume_path)),
        match app.controller.resume() {
            Some(upload) => dim(format!("loaded {} ({:.1} KB)", upload.file_name, upload.size_kb())),
            None => dim("PDF or DOCX path"),
        },
    ];
    frame.render_widget(
        Paragraph::new(resume_lines)
            .block(field_block("Upload Resume", app.focus == Field::Resume)),
        left[0],
    );

    // Profile URL
    frame.render_widget(
        Paragraph::new(format!("> {}", app.controller.github_url()))
            .block(field_block("GitHub URL (optional)", app.focus == Field::GithubUrl)),
        left[1],
    );

    // Job description
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(cols[1]);

    let mode_index = match app.jd_mode {
        JdMode::Text => 0,
        JdMode::File => 1,
    };
    frame.render_widget(
        Tabs::new(vec!["Paste Text", "Upload JD File"])
            .select(mode_index)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        right[0],
    );

    let focused = app.focus == Field::JobDescription;
    let jd_widget = match app.jd_mode {
        JdMode::Text => {
            let text = app.controller.jd_text();
            let body = if text.is_empty() {
                Text::from(dim("Paste job description here..."))
            } else {
                Text::raw(text.to_string())
            };
            Paragraph::new(body).wrap(Wrap { trim: false })
        }
        JdMode::File => Paragraph::new(vec![
            Line::from(format!("> {}", app.jd_file_path)),
            match app.controller.jd_file() {
                Some(upload) => dim(format!("loaded {} ({:.1} KB)", upload.file_name, upload.size_kb())),
                None => dim("PDF, DOCX or TXT path"),
            },
        ]),
    };
    frame.render_widget(jd_widget.block(field_block("Job Details", focused)), right[1]);

    // Submit status
    let status = if app.controller.is_loading() {
        Line::from(Span::styled(
            format!(" {} Analyzing...", SPINNER[app.tick % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        ))
    } else if app.inputs_ready() {
        Line::from(Span::styled(
            " Start Analysis (Enter / F5)",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        dim(" Start Analysis: add a resume and a job description first")
    };
    frame.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
        rows[1],
    );

    if let Some(message) = app.controller.error() {
        frame.render_widget(
            Paragraph::new(message.to_string())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red))
                        .title(" Error "),
                ),
            rows[2],
        );
    }
}

fn draw_results(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<String> = ResultTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()))
        .collect();
    frame.render_widget(
        Tabs::new(titles)
            .select(app.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        rows[0],
    );

    match app.tab {
        ResultTab::Overview => draw_overview(frame, app, result, rows[1]),
        ResultTab::ResumeStudio => draw_resume_studio(frame, app, result, rows[1]),
        tab => {
            let (title, lines) = match tab {
                ResultTab::Skills => ("Skill Gap Analysis", skills_lines(app, result)),
                ResultTab::Market => ("Market Insights", market_lines(result)),
                _ => ("Mock Interview Prep", interview_lines(result)),
            };
            frame.render_widget(
                Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
                    .wrap(Wrap { trim: false })
                    .scroll((app.scroll_offset, 0)),
                rows[1],
            );
        }
    }
}

fn draw_overview(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Resume Match Score "))
        .gauge_style(Style::default().fg(grade_color(dashboard::score_grade(result.score))))
        .ratio(dashboard::score_ratio(result.score))
        .label(format!(
            "{:.0}/100  {}",
            result.score,
            dashboard::score_label(result.score)
        ));
    frame.render_widget(gauge, rows[0]);

    let mut lines: Vec<Line> = Vec::new();

    if let Some(structure) = &result.structure_analysis {
        lines.push(bold("ATS Compatibility"));
        for check in dashboard::ats_checks(structure) {
            let (mark, color) = if check.passed {
                ("ok", Color::Green)
            } else {
                ("!!", Color::Red)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  [{}] ", mark), Style::default().fg(color)),
                Span::raw(format!("{:<18}", check.label)),
                Span::styled(check.detail, Style::default().fg(Color::DarkGray)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let actions = dashboard::top_actions(result);
    lines.push(bold("Top Priority Actions"));
    if actions.is_empty() {
        lines.push(dim("  No recommendations returned."));
    }
    for (i, action) in actions.iter().enumerate() {
        for (j, line) in textwrap::wrap(action, 70).iter().enumerate() {
            let prefix = if j == 0 {
                format!("  {}. ", i + 1)
            } else {
                "     ".to_string()
            };
            lines.push(Line::from(format!("{}{}", prefix, line)));
        }
    }

    if !result.resume_parsing_status.is_empty() {
        lines.push(Line::from(""));
        lines.push(dim(format!("Resume parsing: {}", result.resume_parsing_status)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Overview "))
            .scroll((app.scroll_offset, 0)),
        rows[1],
    );
}

fn skills_lines(app: &App, result: &AnalysisResult) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let (missing, hidden) = dashboard::visible_missing_skills(result, app.show_all_missing);

    lines.push(Line::from(Span::styled(
        format!("Missing Skills ({})", result.missing_skills.len()),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    if missing.is_empty() {
        lines.push(dim("  No missing skills found. Great job!"));
    } else {
        for line in textwrap::wrap(&missing.join(", "), 70) {
            lines.push(Line::from(format!("  {}", line)));
        }
    }
    if hidden > 0 {
        lines.push(dim(format!("  +{} more skills (m to show)", hidden)));
    } else if app.show_all_missing && result.missing_skills.len() > dashboard::MISSING_SKILLS_PREVIEW {
        lines.push(dim("  (m to show less)"));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("Matched Skills ({})", result.present_skills.len()),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    if result.present_skills.is_empty() {
        lines.push(dim("  No matching skills detected."));
    } else {
        for line in textwrap::wrap(&result.present_skills.join(", "), 70) {
            lines.push(Line::from(format!("  {}", line)));
        }
    }

    if !result.trajectory.is_empty() {
        lines.push(Line::from(""));
        lines.push(bold("Job-Fit Simulation"));
        for item in &result.trajectory {
            lines.push(Line::from(vec![
                Span::styled(format!("  + Learn {:<20}", item.skill), Style::default().fg(Color::Cyan)),
                Span::styled(format!(" +{:.1}%", item.boost), Style::default().fg(Color::Green)),
                Span::raw(format!("  {:.0}% -> {:.0}%", result.score, item.new_score)),
            ]));
        }
    }

    lines
}

fn market_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    match &result.market_analysis {
        Some(market) => {
            lines.push(bold(format!("Market Insights: {}", market.role)));
            lines.push(Line::from(format!("  Salary range:  {}", market.salary_range)));
            lines.push(Line::from(format!(
                "  Demand:        {} ({})",
                market.demand_level, market.demand_growth
            )));
            lines.push(Line::from(format!("  Avg tenure:    {}", market.avg_tenure)));
            if !market.top_skills.is_empty() {
                lines.push(Line::from(format!("  Top skills:    {}", market.top_skills.join(", "))));
            }
        }
        None => lines.push(dim("No market data returned for this role.")),
    }

    if let Some(prediction) = &result.success_prediction {
        lines.push(Line::from(""));
        lines.push(bold("Application Success Predictor"));
        lines.push(Line::from(vec![
            Span::raw("  Interview probability: "),
            Span::styled(
                format!("{:.1}%", prediction.interview_probability),
                Style::default()
                    .fg(grade_color(dashboard::probability_grade(
                        prediction.interview_probability,
                    )))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        for tip in &prediction.tips {
            lines.push(Line::from(format!("  - {}", tip)));
        }
    }

    lines
}

fn interview_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    if result.interview_questions.is_empty() {
        return vec![dim("No interview questions returned.")];
    }

    let mut lines = Vec::new();
    for (i, q) in result.interview_questions.iter().enumerate() {
        let difficulty_color = match q.difficulty.as_str() {
            "Hard" => Color::Red,
            "Medium" => Color::Yellow,
            "Easy" => Color::Green,
            _ => Color::DarkGray,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}. {}", i + 1, q.category), Style::default().fg(Color::Cyan)),
            Span::raw(format!("  {}  ", q.skill)),
            Span::styled(q.difficulty.clone(), Style::default().fg(difficulty_color)),
        ]));
        for line in textwrap::wrap(&q.question, 74) {
            lines.push(Line::from(format!("   {}", line)));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn draw_resume_studio(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    if result.bullet_analysis.is_empty() {
        frame.render_widget(
            Paragraph::new("No weak bullet points detected! Your resume is looking strong.")
                .style(Style::default().fg(Color::Green))
                .block(Block::default().borders(Borders::ALL).title(" Resume Studio ")),
            area,
        );
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = result
        .bullet_analysis
        .iter()
        .map(|bullet| {
            let text = if bullet.text.chars().count() > 40 {
                format!("{}...", bullet.text.chars().take(37).collect::<String>())
            } else {
                bullet.text.clone()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3.0} ", bullet.score),
                    Style::default().fg(grade_color(dashboard::bullet_grade(bullet.score))),
                ),
                Span::raw(text),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Needs Improvement "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.selected_bullet));
    frame.render_stateful_widget(list, cols[0], &mut list_state);

    let detail = dashboard::bullet_at(result, app.selected_bullet)
        .map(bullet_detail)
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(detail)
            .block(Block::default().borders(Borders::ALL).title(" Bullet Analysis "))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll_offset, 0)),
        cols[1],
    );
}

fn bullet_detail(bullet: &BulletAnalysis) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(
                format!("{:.0}/100", bullet.score),
                Style::default()
                    .fg(grade_color(dashboard::bullet_grade(bullet.score)))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        bold("Original"),
        Line::from(format!("  \"{}\"", bullet.text)),
        Line::from(""),
        bold("Suggestions"),
    ];
    for suggestion in &bullet.suggestions {
        lines.push(Line::from(format!("  - {}", suggestion)));
        if let Some(hint) = dashboard::suggestion_hint(suggestion) {
            lines.push(dim(format!("    {}", hint)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Pro Tip",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("  {}", dashboard::BULLET_FORMULA)));
    lines
}
