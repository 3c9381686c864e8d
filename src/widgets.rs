//! Page mini-games and downloads that sit around the quiz.
//!
//! Only the state and text live here; `dom::widgets` wires them to elements.

use crate::quiz::ResultRecord;

// --- Downloads ---------------------------------------------------------------

pub const CHEAT_PACK_FILE: &str = "codecraft_cheatpack.txt";
pub const RESUME_FILE: &str = "codecraft_resume.txt";

pub const CHEAT_PACK: &str = "-- Codecraft Cheat Pack --\n\
HTML: semantic tags\n\
CSS: flexbox/grid cheats\n\
JS: common patterns\n\
Algorithms: Big-O cheats\n\
Security: input validation checklist\n\n";

/// Plain-text summary built from the stored sorting result.
pub fn resume_text(record: &ResultRecord) -> String {
    format!(
        "-- Codecraft Wizard Resume --\n\
         House: {}\n\
         Path: {}\n\
         Track: {}\n\n\
         Sorted by the Codecraft Sorting Hat.\n",
        record.house, record.path, record.label
    )
}

// --- Audio fade --------------------------------------------------------------

pub const FADE_STEPS: u32 = 20;

/// Interval between fade steps for a fade of `duration_ms`.
pub fn fade_step_ms(duration_ms: u32) -> u32 {
    (duration_ms / FADE_STEPS).max(1)
}

/// Volume after `step` of [`FADE_STEPS`] (1-based), capped at 1.0.
pub fn fade_volume(step: u32) -> f64 {
    (step as f64 / FADE_STEPS as f64).min(1.0)
}

// --- Potions terminal --------------------------------------------------------

pub const POTION_WELCOME: &str = "> Welcome to the Potions Lab. Press Run to brew a potion...";
pub const POTION_START: &str = "> Brewing potion... 🍯\n\n";
pub const POTION_LINE_PAUSE_MS: u32 = 350;

pub const POTION_STEPS: [&str; 6] = [
    "> Adding mystical server base... 🧪",
    "> Mixing routes and endpoints... ✨",
    "> Adding magical data validation... 🔮",
    "> Containers are bubbling... 🐉",
    "> CI/CD pipeline activated... ⚡",
    "> Potion brewed successfully! 🍵",
];

/// What the terminal should do after one animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrewTick {
    /// Append text, then request the next frame.
    Type(String),
    /// A line just finished (text ends with a newline); wait before the next one.
    LineDone(String),
    Finished,
}

/// Character-at-a-time brewing script. One instance per Run press.
#[derive(Clone, Debug, Default)]
pub struct Brew {
    line: usize,
    col: usize,
    brewing: bool,
}

impl Brew {
    pub fn is_brewing(&self) -> bool {
        self.brewing
    }

    /// Start a run; `false` if one is already in progress.
    pub fn start(&mut self) -> bool {
        if self.brewing {
            return false;
        }
        *self = Brew {
            line: 0,
            col: 0,
            brewing: true,
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Brew::default();
    }

    pub fn tick(&mut self) -> BrewTick {
        if !self.brewing {
            return BrewTick::Finished;
        }
        let Some(line) = POTION_STEPS.get(self.line) else {
            self.brewing = false;
            return BrewTick::Finished;
        };
        let Some(c) = line.chars().nth(self.col) else {
            // Empty line; move on without typing.
            self.line += 1;
            self.col = 0;
            return BrewTick::LineDone("\n".into());
        };
        self.col += 1;
        if self.col >= line.chars().count() {
            self.line += 1;
            self.col = 0;
            BrewTick::LineDone(format!("{c}\n"))
        } else {
            BrewTick::Type(c.to_string())
        }
    }
}

// --- Divination & Defense ----------------------------------------------------

/// Feedback line and its colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub text: &'static str,
    pub color: &'static str,
}

pub fn divination_verdict(selected: Option<&str>) -> Verdict {
    match selected {
        None => Verdict {
            text: "Please select an answer!",
            color: "#ffcc00",
        },
        Some("f1") => Verdict {
            text: "Correct! F1-score is best for imbalanced datasets.",
            color: "#00ff99",
        },
        Some(_) => Verdict {
            text: "Not quite — try thinking about precision and recall balance.",
            color: "#ff5555",
        },
    }
}

pub const CTF_TOKEN: &str = "witches2025";
pub const CTF_TYPE_MS: u32 = 40;

/// Line to type for a CTF submission; `None` when the trimmed input is empty.
pub fn ctf_reply(input: &str) -> Option<&'static str> {
    match input.trim() {
        "" => None,
        CTF_TOKEN => Some("> Correct! The firewall stands strong 🛡️"),
        _ => Some("> Incorrect! Check your hints and try again 🔒"),
    }
}

// --- Typewriter --------------------------------------------------------------

pub const WHY_CS_TYPE_MS: u32 = 70;

/// Successive prefixes of `text`, from empty to complete, split on char boundaries.
pub fn typewriter_frames(text: &str) -> impl Iterator<Item = &str> {
    std::iter::once(0)
        .chain(text.char_indices().map(|(i, c)| i + c.len_utf8()))
        .map(move |end| &text[..end])
}

/// First entry of a `data-text` JSON array.
pub fn first_data_text(raw: &str) -> Option<String> {
    serde_json::from_str::<Vec<String>>(raw)
        .ok()
        .and_then(|v| v.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Category;

    #[test]
    fn resume_uses_record_fields() {
        let text = resume_text(&ResultRecord::for_category(Category::Iot));
        assert!(text.contains("House: Slytherin"));
        assert!(text.contains("Path: iot"));
        assert!(text.contains("Track: Hardware Hexes (IoT & Robotics)"));
    }

    #[test]
    fn fade_ramp_reaches_full_volume() {
        assert_eq!(fade_step_ms(800), 40);
        assert_eq!(fade_step_ms(10), 1);
        assert_eq!(fade_volume(0), 0.0);
        assert_eq!(fade_volume(FADE_STEPS), 1.0);
        assert_eq!(fade_volume(FADE_STEPS + 3), 1.0);
    }

    #[test]
    fn brew_types_every_line_then_finishes() {
        let mut brew = Brew::default();
        assert!(brew.start());
        assert!(!brew.start(), "second run while brewing is ignored");
        let mut out = String::new();
        let mut lines = 0;
        loop {
            match brew.tick() {
                BrewTick::Type(s) => out.push_str(&s),
                BrewTick::LineDone(s) => {
                    out.push_str(&s);
                    lines += 1;
                }
                BrewTick::Finished => break,
            }
        }
        assert_eq!(lines, POTION_STEPS.len());
        assert_eq!(out, POTION_STEPS.join("\n") + "\n");
        assert!(!brew.is_brewing());
        assert!(brew.start());
    }

    #[test]
    fn divination_and_ctf_verdicts() {
        assert_eq!(divination_verdict(None).color, "#ffcc00");
        assert_eq!(divination_verdict(Some("f1")).color, "#00ff99");
        assert_eq!(divination_verdict(Some("accuracy")).color, "#ff5555");
        assert_eq!(ctf_reply("   "), None);
        assert!(ctf_reply(" witches2025 ").unwrap().contains("Correct"));
        assert!(ctf_reply("hunter2").unwrap().contains("Incorrect"));
    }

    #[test]
    fn typewriter_respects_char_boundaries() {
        let frames: Vec<_> = typewriter_frames("hé!").collect();
        assert_eq!(frames, vec!["", "h", "hé", "hé!"]);
        assert_eq!(first_data_text(r#"["Because magic", "x"]"#).as_deref(), Some("Because magic"));
        assert_eq!(first_data_text("nope"), None);
    }
}
