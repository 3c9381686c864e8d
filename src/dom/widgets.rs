// DOM wiring for the page mini-games, audio and download buttons.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, Event, HtmlAnchorElement, HtmlAudioElement,
    HtmlButtonElement, HtmlElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Url, window,
};

use super::{after, elements, listen, next_frame};
use crate::config::SiteConfig;
use crate::store::{LocalStore, load_record_or_placeholder};
use crate::widgets::{
    Brew, BrewTick, CHEAT_PACK, CHEAT_PACK_FILE, CTF_TYPE_MS, FADE_STEPS, POTION_LINE_PAUSE_MS,
    POTION_START, POTION_WELCOME, RESUME_FILE, WHY_CS_TYPE_MS, ctf_reply, divination_verdict,
    fade_step_ms, fade_volume, first_data_text, resume_text, typewriter_frames,
};

pub(super) fn bind_all(doc: &Document, cfg: &SiteConfig) -> Result<(), JsValue> {
    bind_audio(doc)?;
    bind_downloads(doc, cfg)?;
    bind_potions(doc)?;
    bind_divination(doc)?;
    bind_defense(doc)?;
    bind_why_cs(doc)?;
    bind_spell_cards(doc)?;
    bind_nav(doc)?;
    Ok(())
}

fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    let found = doc.get_element_by_id(id).and_then(|e| e.dyn_into::<T>().ok());
    if found.is_none() {
        log::debug!("#{id} not on page");
    }
    found
}

fn select<T: JsCast>(doc: &Document, selector: &str) -> Option<T> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<T>().ok())
}

/// Type `text` into `el` one char every `step_ms`.
fn type_into(el: Element, text: &str, step_ms: u32) {
    let frames: Rc<Vec<String>> = Rc::new(typewriter_frames(text).map(str::to_owned).collect());
    type_frame(el, frames, 0, step_ms);
}

fn type_frame(el: Element, frames: Rc<Vec<String>>, i: usize, step_ms: u32) {
    let Some(frame) = frames.get(i) else { return };
    el.set_text_content(Some(frame));
    if i + 1 < frames.len() {
        after(step_ms, move || type_frame(el, frames, i + 1, step_ms));
    }
}

fn observer(
    threshold: f64,
    mut on_visible: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
) -> Result<IntersectionObserver, JsValue> {
    let cb = Closure::wrap(Box::new(
        move |entries: js_sys::Array, obs: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    if entry.is_intersecting() {
                        on_visible(&entry, &obs);
                    }
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let obs = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)?;
    cb.forget();
    Ok(obs)
}

// --- Audio -------------------------------------------------------------------

/// Ramp `#bg-audio` from silent to full over `duration_ms`.
pub(crate) fn fade_in_audio(duration_ms: u32) {
    let (Some(win), Some(doc)) = (window(), window().and_then(|w| w.document())) else {
        return;
    };
    let Some(audio) = by_id::<HtmlAudioElement>(&doc, "bg-audio") else {
        return;
    };
    audio.set_volume(0.0);
    audio.set_muted(false);

    let step = Rc::new(Cell::new(0u32));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let handle_in = handle.clone();
    let tick = Closure::wrap(Box::new(move || {
        let i = step.get() + 1;
        step.set(i);
        audio.set_volume(fade_volume(i));
        if i >= FADE_STEPS {
            if let (Some(w), Some(h)) = (window(), handle_in.get()) {
                w.clear_interval_with_handle(h);
            }
        }
    }) as Box<dyn FnMut()>);
    match win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        fade_step_ms(duration_ms) as i32,
    ) {
        Ok(h) => {
            handle.set(Some(h));
            tick.forget();
        }
        Err(e) => log::warn!("audio fade not started: {e:?}"),
    }
}

fn bind_audio(doc: &Document) -> Result<(), JsValue> {
    let Some(toggle) = by_id::<HtmlElement>(doc, "audio-toggle") else {
        return Ok(());
    };
    let doc = doc.clone();
    let button = toggle.clone();
    listen(&toggle, "click", move |_| {
        let Some(audio) = by_id::<HtmlAudioElement>(&doc, "bg-audio") else {
            return;
        };
        if audio.paused() || audio.muted() {
            audio.set_muted(false);
            // Autoplay rejection is fine; the next click retries.
            let _ = audio.play();
            fade_in_audio(900);
            let _ = button.set_attribute("aria-pressed", "true");
            button.set_text_content(Some("🔊"));
        } else {
            let _ = audio.pause();
            let _ = button.set_attribute("aria-pressed", "false");
            button.set_text_content(Some("🔈"));
        }
    })
}

// --- Downloads ---------------------------------------------------------------

fn download_text(doc: &Document, filename: &str, text: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let opts = BlobPropertyBag::new();
    opts.set_type("text/plain");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    a.set_href(&url);
    a.set_download(filename);
    a.click();
    Url::revoke_object_url(&url)
}

fn bind_downloads(doc: &Document, cfg: &SiteConfig) -> Result<(), JsValue> {
    if let Some(btn) = by_id::<Element>(doc, "download-cheats") {
        let doc = doc.clone();
        listen(&btn, "click", move |_| {
            if let Err(e) = download_text(&doc, CHEAT_PACK_FILE, CHEAT_PACK) {
                log::warn!("cheat pack download failed: {e:?}");
            }
        })?;
    }
    if let Some(btn) = by_id::<Element>(doc, "download-resume") {
        let doc = doc.clone();
        let key = cfg.storage_key.clone();
        listen(&btn, "click", move |_| {
            let record = load_record_or_placeholder(&LocalStore, &key);
            if let Err(e) = download_text(&doc, RESUME_FILE, &resume_text(&record)) {
                log::warn!("resume download failed: {e:?}");
            }
        })?;
    }
    Ok(())
}

// --- Potions terminal --------------------------------------------------------

struct Potions {
    output: HtmlElement,
    run: HtmlButtonElement,
    brew: Brew,
    // Bumped on every Run/Reset so frames from an abandoned run stop.
    generation: u32,
}

thread_local! {
    static POTIONS: RefCell<Option<Potions>> = const { RefCell::new(None) };
}

fn brew_frame(generation: u32) {
    let tick = POTIONS.with(|cell| {
        let mut slot = cell.borrow_mut();
        let p = slot.as_mut()?;
        if p.generation != generation {
            return None;
        }
        let tick = p.brew.tick();
        match &tick {
            BrewTick::Type(s) | BrewTick::LineDone(s) => {
                let mut text = p.output.text_content().unwrap_or_default();
                text.push_str(s);
                p.output.set_text_content(Some(&text));
                p.output.set_scroll_top(p.output.scroll_height());
            }
            BrewTick::Finished => p.run.set_disabled(false),
        }
        Some(tick)
    });
    match tick {
        Some(BrewTick::Type(_)) => next_frame(move || brew_frame(generation)),
        Some(BrewTick::LineDone(_)) => {
            after(POTION_LINE_PAUSE_MS, move || brew_frame(generation));
        }
        _ => {}
    }
}

fn bind_potions(doc: &Document) -> Result<(), JsValue> {
    let (Some(output), Some(run), Some(reset)) = (
        by_id::<HtmlElement>(doc, "term-output"),
        by_id::<HtmlButtonElement>(doc, "term-run"),
        by_id::<Element>(doc, "term-reset"),
    ) else {
        return Ok(());
    };
    POTIONS.with(|cell| {
        cell.replace(Some(Potions {
            output,
            run: run.clone(),
            brew: Brew::default(),
            generation: 0,
        }))
    });

    listen(&run, "click", |_| {
        let started = POTIONS.with(|cell| {
            let mut slot = cell.borrow_mut();
            let p = slot.as_mut()?;
            if !p.brew.start() {
                return None;
            }
            p.generation = p.generation.wrapping_add(1);
            p.output.set_text_content(Some(POTION_START));
            p.run.set_disabled(true);
            Some(p.generation)
        });
        if let Some(generation) = started {
            brew_frame(generation);
        }
    })?;

    listen(&reset, "click", |_| {
        POTIONS.with(|cell| {
            if let Some(p) = cell.borrow_mut().as_mut() {
                p.brew.reset();
                p.generation = p.generation.wrapping_add(1);
                p.output.set_text_content(Some(POTION_WELCOME));
                p.run.set_disabled(false);
            }
        });
    })
}

// --- Divination --------------------------------------------------------------

fn bind_divination(doc: &Document) -> Result<(), JsValue> {
    if let Some(insight) = by_id::<Element>(doc, "orb-insight") {
        let orbs: Vec<Element> = elements(doc.query_selector_all(".orb"));
        for orb in orbs {
            for ty in ["mouseenter", "click"] {
                let (orb_in, insight) = (orb.clone(), insight.clone());
                listen(&orb, ty, move |_| {
                    insight.set_text_content(orb_in.get_attribute("data-insight").as_deref());
                })?;
            }
        }
    }

    let (Some(check), Some(result)) = (
        by_id::<Element>(doc, "dq-check"),
        by_id::<HtmlElement>(doc, "dq-result"),
    ) else {
        return Ok(());
    };
    let doc = doc.clone();
    listen(&check, "click", move |_| {
        let selected = select::<HtmlInputElement>(&doc, "input[name=\"dq\"]:checked").map(|i| i.value());
        let verdict = divination_verdict(selected.as_deref());
        result.set_text_content(Some(verdict.text));
        let _ = result.style().set_property("color", verdict.color);
    })
}

// --- Defense (CTF) -----------------------------------------------------------

fn bind_defense(doc: &Document) -> Result<(), JsValue> {
    let (Some(input), Some(check), Some(result)) = (
        by_id::<HtmlInputElement>(doc, "ctf-input"),
        by_id::<Element>(doc, "ctf-check"),
        by_id::<Element>(doc, "ctf-result"),
    ) else {
        return Ok(());
    };
    listen(&check, "click", move |_| {
        let Some(reply) = ctf_reply(&input.value()) else {
            return;
        };
        type_into(result.clone(), reply, CTF_TYPE_MS);
        input.set_value("");
    })
}

// --- Why CS typewriter -------------------------------------------------------

fn bind_why_cs(doc: &Document) -> Result<(), JsValue> {
    let (Some(el), Some(section)) = (
        select::<Element>(doc, ".typewrite"),
        by_id::<Element>(doc, "why-cs"),
    ) else {
        return Ok(());
    };
    let Some(text) = el.get_attribute("data-text").as_deref().and_then(first_data_text) else {
        log::debug!(".typewrite has no usable data-text");
        return Ok(());
    };
    let obs = observer(0.5, move |_, _| type_into(el.clone(), &text, WHY_CS_TYPE_MS))?;
    obs.observe(&section);
    Ok(())
}

// --- Spell cards & nav -------------------------------------------------------

fn bind_spell_cards(doc: &Document) -> Result<(), JsValue> {
    let cards: Vec<Element> = elements(doc.query_selector_all(".spell-card"));
    if cards.is_empty() {
        return Ok(());
    }
    let obs = observer(0.2, |entry, obs| {
        let target = entry.target();
        let _ = target.class_list().add_1("visible");
        obs.unobserve(&target);
    })?;
    for card in cards {
        obs.observe(&card);
        let card_in = card.clone();
        listen(&card, "click", move |_: Event| {
            let _ = card_in.class_list().toggle("flipped");
            if let Some(inner) = card_in.query_selector(".spell-inner").ok().flatten() {
                let _ = inner.class_list().toggle("active");
            }
        })?;
    }
    Ok(())
}

fn bind_nav(doc: &Document) -> Result<(), JsValue> {
    let (Some(toggle), Some(menu)) = (
        select::<Element>(doc, ".nav-toggle"),
        select::<Element>(doc, ".main-nav ul"),
    ) else {
        return Ok(());
    };
    listen(&toggle, "click", move |_| {
        let _ = menu.class_list().toggle("active");
    })
}
