//! House sorting quiz engine.
//!
//! The engine owns progression and scoring and talks to the page only through
//! the [`Shell`] trait, so the same flow runs against the real DOM
//! (`crate::dom::DomShell`) and against a recording shell in tests. Each
//! answer schedules a one-shot advance identified by an [`AdvanceTicket`];
//! closing or re-answering invalidates the pending ticket, so a late timer can
//! never move a closed quiz.

mod category;
mod questions;
mod record;
mod session;
mod tally;

pub use category::Category;
pub use questions::{Answer, DEFAULT_QUESTIONS, Question, QuestionBank};
pub use record::{ENTER_BUTTON_ID, RETAKE_BUTTON_ID, ResultRecord, ResultView};
pub use session::{AdvanceTicket, QuizSession, progress_percent};
pub use tally::Tally;

use crate::config::SiteConfig;
use crate::error::QuizError;
use crate::store::{KeyValueStore, save_record};

/// Presentation surface the engine drives (overlay, questions, progress, result).
pub trait Shell {
    /// False when the page lacks the quiz markup; every engine call is then a no-op.
    fn is_ready(&self) -> bool {
        true
    }
    fn set_overlay_visible(&mut self, visible: bool);
    fn show_question(&mut self, index: usize);
    fn set_progress(&mut self, percent: u8);
    fn focus_first_option(&mut self, index: usize);
    fn set_questions_hidden(&mut self, hidden: bool);
    fn clear_selections(&mut self);
    fn render_result(&mut self, view: &ResultView);
    fn hide_result(&mut self);
    fn set_escape_listener(&mut self, active: bool);
    fn schedule_advance(&mut self, ticket: AdvanceTicket, delay_ms: u32);
    fn cancel_advance(&mut self, ticket: AdvanceTicket);
    fn scroll_to(&mut self, anchor_id: &str);
}

pub struct QuizEngine<S: Shell, K: KeyValueStore> {
    bank: QuestionBank,
    session: QuizSession,
    shell: S,
    store: K,
    storage_key: String,
    continue_anchor: String,
    advance_delay_ms: u32,
}

impl<S: Shell, K: KeyValueStore> QuizEngine<S, K> {
    pub fn new(bank: QuestionBank, shell: S, store: K, config: &SiteConfig) -> Self {
        let session = QuizSession::new(bank.len());
        Self {
            bank,
            session,
            shell,
            store,
            storage_key: config.storage_key.clone(),
            continue_anchor: config.continue_anchor_id.clone(),
            advance_delay_ms: config.advance_delay_ms,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }
    pub fn session(&self) -> &QuizSession {
        &self.session
    }
    pub fn shell(&self) -> &S {
        &self.shell
    }
    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }
    pub fn store(&self) -> &K {
        &self.store
    }
    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }
    /// Key the sorting result is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Show the overlay on question 0 and start listening for Escape.
    pub fn open(&mut self) {
        if !self.shell.is_ready() || self.session.is_open() {
            return;
        }
        self.session = QuizSession::new(self.bank.len());
        self.session.set_open(true);
        self.shell.set_overlay_visible(true);
        self.shell.set_escape_listener(true);
        self.restart();
        log::debug!("quiz opened ({} questions)", self.bank.len());
    }

    /// Record `tag` for the active question and schedule the advance.
    ///
    /// Returns the scheduled ticket, or `None` when the quiz is not accepting
    /// answers (closed, missing markup, or already resolved).
    pub fn select_answer(
        &mut self,
        question: usize,
        tag: &str,
    ) -> Result<Option<AdvanceTicket>, QuizError> {
        if !self.shell.is_ready() || !self.session.is_open() || self.session.resolved().is_some() {
            return Ok(None);
        }
        if question != self.session.current() {
            return Err(QuizError::NotActive {
                answered: question,
                active: self.session.current(),
            });
        }
        let answer = self.bank.answer(question, tag)?;
        self.session.record(answer);
        self.cancel_pending();
        let ticket = self.session.schedule();
        self.shell.schedule_advance(ticket, self.advance_delay_ms);
        Ok(Some(ticket))
    }

    /// Timer callback: advance to the next question, or resolve after the last.
    pub fn fire_advance(&mut self, ticket: AdvanceTicket) {
        if !self.session.take_ticket(ticket) {
            log::debug!("ignoring stale advance {ticket:?}");
            return;
        }
        let index = self.session.current();
        if self.session.is_last(index) {
            self.resolve();
        } else {
            self.show(index + 1);
        }
    }

    /// Score recorded answers, render and persist the outcome.
    pub fn resolve(&mut self) -> ResultRecord {
        let tally = Tally::from_answers(self.session.answers());
        let record = ResultRecord::for_category(tally.winner());
        if !self.shell.is_ready() {
            return record;
        }
        self.cancel_pending();
        let view = ResultView {
            record: record.clone(),
            selections: self.session.answers().map(|a| a.tag().to_string()).collect(),
        };
        self.shell.render_result(&view);
        self.shell.set_progress(100);
        self.shell.set_questions_hidden(true);
        save_record(&mut self.store, &self.storage_key, &record);
        self.session.set_resolved(record.clone());
        log::info!(
            "sorted into {} / {} ({} of {} answered)",
            record.house,
            record.path,
            tally.total(),
            self.bank.len()
        );
        record
    }

    /// "Enter" action on the result card.
    pub fn accept_and_continue(&mut self) {
        if !self.shell.is_ready() {
            return;
        }
        self.close();
        self.shell.scroll_to(&self.continue_anchor);
    }

    pub fn close(&mut self) {
        if !self.shell.is_ready() || !self.session.is_open() {
            return;
        }
        self.cancel_pending();
        self.session = QuizSession::new(self.bank.len());
        self.shell.set_overlay_visible(false);
        self.shell.set_escape_listener(false);
        self.shell.set_questions_hidden(false);
        self.shell.hide_result();
        log::debug!("quiz closed");
    }

    /// Clear every answer and go back to question 0 (also the "Retake" action).
    pub fn restart(&mut self) {
        if !self.shell.is_ready() {
            return;
        }
        self.cancel_pending();
        self.session.reset();
        self.shell.clear_selections();
        self.show(0);
    }

    pub fn handle_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    fn show(&mut self, index: usize) {
        self.session.go_to(index);
        let current = self.session.current();
        self.shell.set_questions_hidden(false);
        self.shell.show_question(current);
        self.shell.hide_result();
        self.shell.set_progress(self.session.progress());
        self.shell.focus_first_option(current);
    }

    fn cancel_pending(&mut self) {
        if let Some(old) = self.session.cancel_pending() {
            self.shell.cancel_advance(old);
        }
    }
}
