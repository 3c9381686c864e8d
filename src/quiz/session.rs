//! Progression state for one open quiz: active question, recorded answers and
//! the pending one-shot advance.

use super::{Answer, ResultRecord};

/// Map question index `0..n` onto a 0..=100 progress fill. Last question is 100.
pub fn progress_percent(index: usize, n: usize) -> u8 {
    let denom = n.saturating_sub(1).max(1) as f64;
    let pct = (index as f64 / denom * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Handle identifying one scheduled advance. Stale tickets are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(pub u32);

#[derive(Clone, Debug)]
pub struct QuizSession {
    len: usize,
    current: usize,
    open: bool,
    answers: Vec<Option<Answer>>,
    pending: Option<AdvanceTicket>,
    next_ticket: u32,
    resolved: Option<ResultRecord>,
}

impl QuizSession {
    /// A closed session over `len` questions (`len >= 1`).
    pub fn new(len: usize) -> Self {
        let len = len.max(1);
        Self {
            len,
            current: 0,
            open: false,
            answers: vec![None; len],
            pending: None,
            next_ticket: 0,
            resolved: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn current(&self) -> usize {
        self.current
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.len
    }
    pub fn pending(&self) -> Option<AdvanceTicket> {
        self.pending
    }
    pub fn resolved(&self) -> Option<&ResultRecord> {
        self.resolved.as_ref()
    }
    pub fn progress(&self) -> u8 {
        progress_percent(self.current, self.len)
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Clamp and move to `index`, clearing any shown result.
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.len - 1);
        self.resolved = None;
    }

    /// Record (or overwrite) the answer for its question slot.
    pub fn record(&mut self, answer: Answer) {
        let slot = answer.question();
        if slot < self.len {
            self.answers[slot] = Some(answer);
        }
    }

    /// Answers in question order, skipping unanswered slots.
    pub fn answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().flatten()
    }

    pub fn answered(&self) -> usize {
        self.answers().count()
    }

    /// Allocate a fresh ticket; any previously pending one becomes stale.
    pub fn schedule(&mut self) -> AdvanceTicket {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let t = AdvanceTicket(self.next_ticket);
        self.pending = Some(t);
        t
    }

    /// Consume `ticket` if it is the pending one and the session is still open.
    pub fn take_ticket(&mut self, ticket: AdvanceTicket) -> bool {
        if self.open && self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel_pending(&mut self) -> Option<AdvanceTicket> {
        self.pending.take()
    }

    pub fn set_resolved(&mut self, record: ResultRecord) {
        self.resolved = Some(record);
    }

    /// Drop answers, pending work and any result; back to question 0.
    pub fn reset(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.pending = None;
        self.current = 0;
        self.resolved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_spans_zero_to_hundred() {
        assert_eq!(progress_percent(0, 5), 0);
        assert_eq!(progress_percent(1, 5), 25);
        assert_eq!(progress_percent(2, 3), 100);
        assert_eq!(progress_percent(4, 5), 100);
        assert_eq!(progress_percent(1, 4), 33);
        assert_eq!(progress_percent(2, 4), 67);
    }

    #[test]
    fn single_question_progress_is_zero_then_clamped() {
        assert_eq!(progress_percent(0, 1), 0);
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(7, 3), 100);
    }

    #[test]
    fn progress_is_monotonic() {
        for n in 1..=12 {
            let mut last = 0;
            for i in 0..n {
                let p = progress_percent(i, n);
                assert!(p >= last, "n={n} i={i}");
                last = p;
            }
            assert_eq!(progress_percent(n - 1, n), if n == 1 { 0 } else { 100 });
        }
    }

    #[test]
    fn stale_and_closed_tickets_are_refused() {
        let mut s = QuizSession::new(3);
        s.set_open(true);
        let first = s.schedule();
        let second = s.schedule();
        assert!(!s.take_ticket(first));
        assert!(s.take_ticket(second));
        assert!(!s.take_ticket(second));

        let third = s.schedule();
        s.set_open(false);
        assert!(!s.take_ticket(third));
    }

    #[test]
    fn go_to_clamps_to_last_question() {
        let mut s = QuizSession::new(3);
        s.go_to(10);
        assert_eq!(s.current(), 2);
    }
}
