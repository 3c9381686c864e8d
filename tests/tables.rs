// Invariants for the static category and question tables.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use codecraft_site::quiz::DEFAULT_QUESTIONS;
use codecraft_site::{Category, QuestionBank};

#[test]
fn category_table_matches_published_mapping() {
    let expected = [
        ("web", "Ravenclaw", "Web Wizardry (Frontend & UX)"),
        ("data", "Ravenclaw", "Data Divination (AI & Data Science)"),
        ("sec", "Gryffindor", "Cyber Charms (Cybersecurity)"),
        ("sys", "Slytherin", "Systems Sorcery (Systems & Infra)"),
        ("devops", "Slytherin", "Cloud Conjurors (DevOps & Infra)"),
        ("team", "Hufflepuff", "Software Guild (Engineering & Teamwork)"),
        ("iot", "Slytherin", "Hardware Hexes (IoT & Robotics)"),
    ];
    assert_eq!(Category::ALL.len(), expected.len());
    for (c, (tag, house, label)) in Category::ALL.iter().zip(expected) {
        assert_eq!(c.tag(), tag);
        assert_eq!(c.house(), house, "house for '{}'", tag);
        assert_eq!(c.label(), label, "label for '{}'", tag);
    }
    assert_eq!(Category::DEFAULT.tag(), "web");
}

#[test]
fn option_tags_are_lowercase_and_unique_per_question() {
    for q in DEFAULT_QUESTIONS.iter() {
        let mut seen = HashSet::new();
        for (tag, _) in q.options {
            assert!(seen.insert(*tag), "duplicate tag '{}' in question '{}'", tag, q.id);
            assert!(
                tag.chars().all(|c| c.is_ascii_lowercase()),
                "tag '{}' in question '{}' is not lowercase ascii",
                tag,
                q.id
            );
        }
    }
}

#[test]
fn question_ids_are_unique_and_prompts_present() {
    let mut ids = HashSet::new();
    for q in DEFAULT_QUESTIONS.iter() {
        assert!(ids.insert(q.id), "duplicate question id '{}'", q.id);
        assert!(!q.prompt.is_empty(), "question '{}' has no prompt", q.id);
    }
}

#[test]
fn first_question_uses_bare_category_tags() {
    let bank = QuestionBank::default();
    for c in Category::ALL {
        let answer = bank.answer(0, c.tag()).unwrap();
        assert_eq!(answer.category(), c);
        assert!(bank.questions()[0].options.contains(&(c.tag(), c)));
    }
}

#[test]
fn themed_tags_never_spell_another_category() {
    for q in DEFAULT_QUESTIONS.iter() {
        for (tag, category) in q.options {
            if let Ok(bare) = tag.parse::<Category>() {
                assert_eq!(bare, *category, "tag '{}' in question '{}'", tag, q.id);
            }
            assert_eq!(q.contribution(tag), Some((*tag, *category)));
        }
    }
}
