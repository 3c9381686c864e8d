// Shared test doubles: a shell that records what the engine asked of it.
#![allow(dead_code)]

use codecraft_site::quiz::{AdvanceTicket, QuestionBank, QuizEngine, ResultView, Shell};
use codecraft_site::{MemoryStore, SiteConfig};

#[derive(Debug, Default)]
pub struct RecordingShell {
    pub missing_markup: bool,
    pub overlay_visible: bool,
    pub active_question: Option<usize>,
    pub progress: Option<u8>,
    pub focused: Option<usize>,
    pub questions_hidden: bool,
    pub clears: usize,
    pub result: Option<ResultView>,
    pub escape_listeners: i32,
    pub escape_attaches: usize,
    pub timers: Vec<(AdvanceTicket, u32)>,
    pub cancelled: Vec<AdvanceTicket>,
    pub scrolled_to: Vec<String>,
    pub progress_history: Vec<u8>,
}

impl RecordingShell {
    pub fn last_timer(&self) -> AdvanceTicket {
        self.timers.last().expect("no timer scheduled").0
    }
}

impl Shell for RecordingShell {
    fn is_ready(&self) -> bool {
        !self.missing_markup
    }
    fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }
    fn show_question(&mut self, index: usize) {
        self.active_question = Some(index);
    }
    fn set_progress(&mut self, percent: u8) {
        self.progress = Some(percent);
        self.progress_history.push(percent);
    }
    fn focus_first_option(&mut self, index: usize) {
        self.focused = Some(index);
    }
    fn set_questions_hidden(&mut self, hidden: bool) {
        self.questions_hidden = hidden;
    }
    fn clear_selections(&mut self) {
        self.clears += 1;
    }
    fn render_result(&mut self, view: &ResultView) {
        self.result = Some(view.clone());
    }
    fn hide_result(&mut self) {
        self.result = None;
    }
    fn set_escape_listener(&mut self, active: bool) {
        if active {
            self.escape_listeners += 1;
            self.escape_attaches += 1;
        } else {
            self.escape_listeners -= 1;
        }
    }
    fn schedule_advance(&mut self, ticket: AdvanceTicket, delay_ms: u32) {
        self.timers.push((ticket, delay_ms));
    }
    fn cancel_advance(&mut self, ticket: AdvanceTicket) {
        self.cancelled.push(ticket);
    }
    fn scroll_to(&mut self, anchor_id: &str) {
        self.scrolled_to.push(anchor_id.to_string());
    }
}

pub type TestEngine = QuizEngine<RecordingShell, MemoryStore>;

pub fn engine() -> TestEngine {
    QuizEngine::new(
        QuestionBank::default(),
        RecordingShell::default(),
        MemoryStore::new(),
        &SiteConfig::default(),
    )
}

/// Answer the active question with `tag` and let its timer fire.
pub fn answer(engine: &mut TestEngine, tag: &str) {
    let q = engine.session().current();
    let ticket = engine
        .select_answer(q, tag)
        .expect("answer rejected")
        .expect("quiz not accepting answers");
    engine.fire_advance(ticket);
}
