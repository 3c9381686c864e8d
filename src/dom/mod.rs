//! Browser side: the DOM-backed [`Shell`], page bootstrap and listener wiring.
//!
//! Listeners are registered once in [`start`] and dispatch into a thread-local
//! engine. The answer form and the result card each get one delegated
//! listener, so reopening the quiz never stacks handlers.

mod widgets;

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent,
    Node, NodeList, ScrollBehavior, ScrollIntoViewOptions, window,
};

use crate::config::SiteConfig;
use crate::quiz::{
    AdvanceTicket, ENTER_BUTTON_ID, QuestionBank, QuizEngine, RETAKE_BUTTON_ID, ResultView,
    Shell,
};
use crate::store::{LocalStore, load_record};

pub type PageEngine = QuizEngine<DomShell, LocalStore>;

const FIRST_QUESTION_SUBHEADING: &str =
    "Every great wizard begins with a spark — tell us where yours lies.";

thread_local! {
    static ENGINE: RefCell<Option<PageEngine>> = const { RefCell::new(None) };
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the page engine. No-op before `start` or while the engine
/// is already borrowed further up the stack.
pub fn with_engine<R>(f: impl FnOnce(&mut PageEngine) -> R) -> Option<R> {
    ENGINE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            log::debug!("quiz engine busy; dropping re-entrant call");
            None
        }
    })
}

/// Storage key of the running page; the stock key before `start`.
pub fn storage_key() -> String {
    with_engine(|e| e.storage_key().to_string())
        .unwrap_or_else(|| SiteConfig::default().storage_key)
}

/// Wire the whole page. Only the first call per page load does anything.
pub fn start(config: SiteConfig) -> Result<(), JsValue> {
    if STARTED.with(|s| s.replace(true)) {
        log::warn!("site already started; ignoring repeated start");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let bank = QuestionBank::default();
    let mut shell = DomShell::from_document(&doc, &config);
    // Unknown radio values would stall the quiz mid-way; disable it up front.
    let mismatch = shell
        .parts
        .as_ref()
        .and_then(|parts| bank.check_markup(&parts.option_values()).err());
    if let Some(err) = mismatch {
        log::error!("sorting quiz markup does not match the question bank: {err}");
        shell.parts = None;
    }
    let ready = shell.is_ready();
    let parts = shell.parts.clone();
    let engine = QuizEngine::new(bank, shell, LocalStore, &config);
    ENGINE.with(|cell| cell.replace(Some(engine)));

    if let Some(parts) = parts {
        bind_quiz(&doc, &parts, &config)?;
    } else {
        log::debug!("sorting quiz markup not found; quiz disabled");
    }
    widgets::bind_all(&doc, &config)?;

    match load_record(&LocalStore, &config.storage_key) {
        Some(saved) => log::debug!("found saved profile: {} / {}", saved.house, saved.path),
        None => log::debug!("no saved profile"),
    }
    log::info!("codecraft site ready (quiz {})", if ready { "on" } else { "off" });
    Ok(())
}

/// Attach `f` as a `ty` listener for the lifetime of the page.
pub(crate) fn listen(
    target: &EventTarget,
    ty: &str,
    f: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(ty, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` once after `delay_ms`; returns the timeout handle.
pub(crate) fn after(delay_ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let cb = Closure::once_into_js(f);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            delay_ms as i32,
        )
        .ok()
}

pub(crate) fn next_frame(f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(move |_ts: f64| f());
    if let Some(w) = window() {
        let _ = w.request_animation_frame(cb.unchecked_ref());
    }
}

pub(crate) fn elements<T: JsCast>(list: Result<NodeList, JsValue>) -> Vec<T> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<T>().ok())
        .collect()
}

pub(crate) fn scroll_to_id(doc: &Document, id: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

fn set_display(el: &HtmlElement, visible: bool) {
    let style = el.style();
    let _ = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
}

// --- Shell -------------------------------------------------------------------

/// Elements the quiz cannot work without, plus the optional ones.
#[derive(Clone)]
pub struct ShellParts {
    overlay: HtmlElement,
    form: HtmlElement,
    questions: Vec<HtmlElement>,
    progress_fill: Option<HtmlElement>,
    result: Option<HtmlElement>,
}

impl ShellParts {
    /// Radio values of every question view, in view order.
    fn option_values(&self) -> Vec<Vec<String>> {
        self.questions
            .iter()
            .map(|q| {
                elements::<HtmlInputElement>(q.query_selector_all("input[type=\"radio\"]"))
                    .iter()
                    .map(|input| input.value())
                    .collect()
            })
            .collect()
    }
}

pub struct DomShell {
    doc: Document,
    parts: Option<ShellParts>,
    escape: Closure<dyn FnMut(Event)>,
    escape_attached: bool,
    timer: Option<(AdvanceTicket, i32)>,
}

impl DomShell {
    pub fn from_document(doc: &Document, cfg: &SiteConfig) -> Self {
        let by_id = |id: &str| {
            doc.get_element_by_id(id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        };
        let parts = match (by_id(cfg.overlay_id.as_str()), by_id(cfg.form_id.as_str())) {
            (Some(overlay), Some(form)) => {
                let questions: Vec<HtmlElement> =
                    elements(form.query_selector_all(&cfg.question_selector));
                (!questions.is_empty()).then(|| ShellParts {
                    progress_fill: doc
                        .query_selector(&cfg.progress_selector)
                        .ok()
                        .flatten()
                        .and_then(|e| e.dyn_into().ok()),
                    result: by_id(cfg.result_id.as_str()),
                    overlay,
                    form,
                    questions,
                })
            }
            _ => None,
        };
        let escape = Closure::wrap(Box::new(|evt: Event| {
            if let Some(key) = evt.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                with_engine(|e| e.handle_key(&key));
            }
        }) as Box<dyn FnMut(Event)>);
        Self {
            doc: doc.clone(),
            parts,
            escape,
            escape_attached: false,
            timer: None,
        }
    }

    /// Index of the question view containing `el`, if any.
    pub fn question_of(&self, el: &Element, selector: &str) -> Option<usize> {
        let parts = self.parts.as_ref()?;
        let q: Node = el.closest(selector).ok().flatten()?.into();
        parts
            .questions
            .iter()
            .position(|candidate| candidate.is_same_node(Some(&q)))
    }

    fn subheading(&self, first: &HtmlElement, create: bool) -> Option<HtmlElement> {
        if let Some(el) = first.query_selector(".subheading").ok().flatten() {
            return el.dyn_into().ok();
        }
        if !create {
            return None;
        }
        let p: HtmlElement = self.doc.create_element("p").ok()?.dyn_into().ok()?;
        p.set_class_name("subheading");
        p.set_text_content(Some(FIRST_QUESTION_SUBHEADING));
        let anchor = first
            .query_selector("h3")
            .ok()
            .flatten()
            .and_then(|h| h.next_sibling())
            .or_else(|| first.first_child());
        first.insert_before(&p, anchor.as_ref()).ok()?;
        Some(p)
    }
}

impl Shell for DomShell {
    fn is_ready(&self) -> bool {
        self.parts.is_some()
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        let Some(parts) = &self.parts else { return };
        let _ = parts
            .overlay
            .set_attribute("aria-hidden", if visible { "false" } else { "true" });
        if let Some(body) = self.doc.body() {
            let _ = if visible {
                body.class_list().add_1("no-scroll")
            } else {
                body.class_list().remove_1("no-scroll")
            };
        }
        if !visible {
            for q in &parts.questions {
                let _ = q.class_list().remove_1("active");
            }
        }
    }

    fn show_question(&mut self, index: usize) {
        let Some(parts) = &self.parts else { return };
        for (i, q) in parts.questions.iter().enumerate() {
            let _ = q.class_list().toggle_with_force("active", i == index);
            set_display(q, true);
        }
        if let Some(first) = parts.questions.first() {
            if let Some(sub) = self.subheading(first, index == 0) {
                set_display(&sub, index == 0);
            }
        }
    }

    fn set_progress(&mut self, percent: u8) {
        if let Some(fill) = self.parts.as_ref().and_then(|p| p.progress_fill.as_ref()) {
            let _ = fill.style().set_property("width", &format!("{percent}%"));
        }
    }

    fn focus_first_option(&mut self, index: usize) {
        let Some(q) = self.parts.as_ref().and_then(|p| p.questions.get(index)) else {
            return;
        };
        if let Some(radio) = q
            .query_selector("input[type=\"radio\"]")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let _ = radio.focus();
        }
    }

    fn set_questions_hidden(&mut self, hidden: bool) {
        let Some(parts) = &self.parts else { return };
        for q in &parts.questions {
            set_display(q, !hidden);
        }
    }

    fn clear_selections(&mut self) {
        let Some(parts) = &self.parts else { return };
        let inputs: Vec<HtmlInputElement> = elements(parts.form.query_selector_all("input"));
        for input in inputs {
            input.set_checked(false);
        }
    }

    fn render_result(&mut self, view: &ResultView) {
        if let Some(result) = self.parts.as_ref().and_then(|p| p.result.as_ref()) {
            result.set_inner_html(&view.to_markup());
            set_display(result, true);
        }
    }

    fn hide_result(&mut self) {
        if let Some(result) = self.parts.as_ref().and_then(|p| p.result.as_ref()) {
            set_display(result, false);
        }
    }

    fn set_escape_listener(&mut self, active: bool) {
        if active == self.escape_attached {
            return;
        }
        let cb = self.escape.as_ref().unchecked_ref();
        let outcome = if active {
            self.doc.add_event_listener_with_callback("keydown", cb)
        } else {
            self.doc.remove_event_listener_with_callback("keydown", cb)
        };
        match outcome {
            Ok(()) => self.escape_attached = active,
            Err(e) => log::warn!("could not toggle escape listener: {e:?}"),
        }
    }

    fn schedule_advance(&mut self, ticket: AdvanceTicket, delay_ms: u32) {
        let handle = after(delay_ms, move || {
            with_engine(|e| {
                e.shell_mut().timer = None;
                e.fire_advance(ticket);
            });
        });
        match handle {
            Some(h) => self.timer = Some((ticket, h)),
            None => log::warn!("could not schedule quiz advance"),
        }
    }

    fn cancel_advance(&mut self, ticket: AdvanceTicket) {
        if let Some((pending, handle)) = self.timer.take() {
            if pending == ticket {
                if let Some(w) = window() {
                    w.clear_timeout_with_handle(handle);
                }
            } else {
                self.timer = Some((pending, handle));
            }
        }
    }

    fn scroll_to(&mut self, anchor_id: &str) {
        scroll_to_id(&self.doc, anchor_id);
    }
}

// --- Listener wiring ---------------------------------------------------------

fn bind_quiz(doc: &Document, parts: &ShellParts, cfg: &SiteConfig) -> Result<(), JsValue> {
    // One delegated change listener for every radio in the form.
    let selector = cfg.question_selector.clone();
    listen(&parts.form, "change", move |evt| {
        let Some(input) = evt
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if input.type_() != "radio" {
            return;
        }
        let value = input.value();
        with_engine(|e| {
            let Some(index) = e.shell().question_of(&input, &selector) else {
                return;
            };
            if let Err(err) = e.select_answer(index, &value) {
                log::warn!("ignored answer: {err}");
            }
        });
    })?;

    // One delegated click listener for the result card actions.
    if let Some(result) = &parts.result {
        listen(result, "click", |evt| {
            let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let hit = |id: &str| {
                target
                    .closest(&format!("#{id}"))
                    .ok()
                    .flatten()
                    .is_some()
            };
            if hit(ENTER_BUTTON_ID) {
                with_engine(|e| e.accept_and_continue());
            } else if hit(RETAKE_BUTTON_ID) {
                with_engine(|e| e.restart());
            }
        })?;
    }

    // Clicking the backdrop (not the modal itself) closes.
    let overlay: Node = parts.overlay.clone().into();
    listen(&parts.overlay, "click", move |evt| {
        let on_backdrop = evt
            .target()
            .and_then(|t| t.dyn_into::<Node>().ok())
            .is_some_and(|n| n.is_same_node(Some(&overlay)));
        if on_backdrop {
            with_engine(|e| e.close());
        }
    })?;

    if let Some(btn) = doc.get_element_by_id(&cfg.start_button_id) {
        listen(&btn, "click", |_| {
            widgets::fade_in_audio(800);
            with_engine(|e| e.open());
        })?;
    }
    if let Some(btn) = doc.get_element_by_id(&cfg.close_button_id) {
        listen(&btn, "click", |_| {
            with_engine(|e| e.close());
        })?;
    }
    if let Some(btn) = doc.get_element_by_id(&cfg.skip_button_id) {
        let anchor = cfg.continue_anchor_id.clone();
        let doc = doc.clone();
        listen(&btn, "click", move |_| scroll_to_id(&doc, &anchor))?;
    }

    // Initial state: first question marked active, progress at zero.
    with_engine(|e| {
        let shell = e.shell_mut();
        shell.set_progress(0);
        if let Some(parts) = &shell.parts {
            for (i, q) in parts.questions.iter().enumerate() {
                let _ = q.class_list().toggle_with_force("active", i == 0);
            }
        }
    });
    Ok(())
}
