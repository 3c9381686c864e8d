//! Question bank and per-question contribution tables.
//!
//! Each option tag maps to exactly one [`Category`]. Every question also accepts
//! the bare category tags (`web`, `sec`, ...), which is what plain page markup
//! carries. Answers can only be built through [`QuestionBank::answer`], and
//! [`QuestionBank::check_markup`] lets the page reject unknown radio values at
//! startup instead of on the first click.

use super::Category;
use crate::error::QuizError;

/// One question and its option table (`tag -> category`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [(&'static str, Category)],
}

impl Question {
    /// Canonical tag and category for `tag`: a themed option first, then a bare
    /// category tag.
    pub fn contribution(&self, tag: &str) -> Option<(&'static str, Category)> {
        self.options
            .iter()
            .copied()
            .find(|(t, _)| *t == tag)
            .or_else(|| tag.parse::<Category>().ok().map(|c| (c.tag(), c)))
    }
}

/// A validated selection: question slot, raw tag and the category it counts for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    question: usize,
    tag: &'static str,
    category: Category,
}

impl Answer {
    pub fn question(&self) -> usize {
        self.question
    }
    pub fn tag(&self) -> &'static str {
        self.tag
    }
    pub fn category(&self) -> Category {
        self.category
    }
}

/// Ordered, validated list of questions. Never empty.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        for (qi, q) in questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(QuizError::EmptyQuestion(qi));
            }
            for (oi, (tag, category)) in q.options.iter().enumerate() {
                if q.options[..oi].iter().any(|(t, _)| t == tag) {
                    return Err(QuizError::DuplicateOption {
                        question: qi,
                        tag: tag.to_string(),
                    });
                }
                // A themed tag spelled like a category must count for it.
                if let Ok(bare) = tag.parse::<Category>() {
                    if bare != *category {
                        return Err(QuizError::ShadowedCategory {
                            question: qi,
                            tag: tag.to_string(),
                            shadows: bare.tag().to_string(),
                        });
                    }
                }
            }
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answer(&self, question: usize, tag: &str) -> Result<Answer, QuizError> {
        let q = self.questions.get(question).ok_or(QuizError::OutOfRange {
            index: question,
            len: self.questions.len(),
        })?;
        q.contribution(tag)
            .map(|(tag, category)| Answer {
                question,
                tag,
                category,
            })
            .ok_or_else(|| QuizError::UnknownOption {
                question,
                tag: tag.to_string(),
            })
    }

    /// Check the option values found in each question view of the page.
    /// `views[i]` holds the radio values of the `i`-th view.
    pub fn check_markup<V: AsRef<str>>(&self, views: &[Vec<V>]) -> Result<(), QuizError> {
        if views.len() != self.questions.len() {
            return Err(QuizError::ViewCountMismatch {
                views: views.len(),
                questions: self.questions.len(),
            });
        }
        for (qi, values) in views.iter().enumerate() {
            for value in values {
                self.answer(qi, value.as_ref())?;
            }
        }
        Ok(())
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.to_vec(),
        }
    }
}

// --- Stock question set -------------------------------------------------------
// Question 1 uses the bare category tags; later questions use themed tags.

use Category::{Data, DevOps, Iot, Sec, Sys, Team, Web};

static Q1_SPARK: &[(&str, Category)] = &[
    ("web", Web),
    ("data", Data),
    ("sec", Sec),
    ("sys", Sys),
    ("devops", DevOps),
    ("team", Team),
    ("iot", Iot),
];

static Q2_VIRTUE: &[(&str, Category)] = &[
    ("creativity", Web),
    ("wisdom", Data),
    ("bravery", Sec),
    ("ambition", Sys),
    ("resourcefulness", DevOps),
    ("loyalty", Team),
    ("curiosity", Iot),
];

static Q3_ARTIFACT: &[(&str, Category)] = &[
    ("wand", Web),
    ("notebook", Data),
    ("shield", Sec),
    ("compass", Sys),
    ("cauldron", DevOps),
    ("quill", Team),
    ("clockwork", Iot),
];

static Q4_SPELL: &[(&str, Category)] = &[
    ("illusion", Web),
    ("ai", Data),
    ("ward", Sec),
    ("summoning", Sys),
    ("automation", DevOps),
    ("communion", Team),
    ("animation", Iot),
];

static Q5_TRAIT: &[(&str, Category)] = &[
    ("design", Web),
    ("insight", Data),
    ("vigilance", Sec),
    ("control", Sys),
    ("reliability", DevOps),
    ("empathy", Team),
    ("tinkering", Iot),
];

pub static DEFAULT_QUESTIONS: [Question; 5] = [
    Question {
        id: "spark",
        prompt: "Which spark of magic calls to you?",
        options: Q1_SPARK,
    },
    Question {
        id: "virtue",
        prompt: "Which virtue guides your wand?",
        options: Q2_VIRTUE,
    },
    Question {
        id: "artifact",
        prompt: "Pick an artifact for your trunk.",
        options: Q3_ARTIFACT,
    },
    Question {
        id: "spell",
        prompt: "Which spell would you master first?",
        options: Q4_SPELL,
    },
    Question {
        id: "trait",
        prompt: "What do your friends rely on you for?",
        options: Q5_TRAIT,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bank_validates() {
        let bank = QuestionBank::new(DEFAULT_QUESTIONS.to_vec()).unwrap();
        assert_eq!(bank.len(), 5);
    }

    #[test]
    fn every_question_covers_every_category() {
        for q in DEFAULT_QUESTIONS.iter() {
            for c in Category::ALL {
                assert!(
                    q.options.iter().any(|(_, oc)| *oc == c),
                    "question '{}' has no option for {}",
                    q.id,
                    c
                );
            }
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let bank = QuestionBank::default();
        assert_eq!(
            bank.answer(1, "wand"),
            Err(QuizError::UnknownOption {
                question: 1,
                tag: "wand".into()
            })
        );
        assert!(matches!(
            bank.answer(9, "web"),
            Err(QuizError::OutOfRange { index: 9, len: 5 })
        ));
    }

    #[test]
    fn bare_category_tags_count_on_every_question() {
        let bank = QuestionBank::default();
        for qi in 0..bank.len() {
            for c in Category::ALL {
                let a = bank.answer(qi, c.tag()).unwrap();
                assert_eq!(a.category(), c);
                assert_eq!(a.tag(), c.tag());
            }
        }
    }

    #[test]
    fn markup_check_accepts_plain_and_themed_values() {
        let bank = QuestionBank::default();
        let plain: Vec<Vec<&str>> = (0..5)
            .map(|_| Category::ALL.map(|c| c.tag()).to_vec())
            .collect();
        assert_eq!(bank.check_markup(&plain), Ok(()));

        let themed: Vec<Vec<&str>> = DEFAULT_QUESTIONS
            .iter()
            .map(|q| q.options.iter().map(|(t, _)| *t).collect())
            .collect();
        assert_eq!(bank.check_markup(&themed), Ok(()));
    }

    #[test]
    fn markup_check_rejects_unknown_values_and_missing_views() {
        let bank = QuestionBank::default();
        let mut views: Vec<Vec<&str>> = vec![vec!["web"]; 5];
        views[3].push("quidditch");
        assert_eq!(
            bank.check_markup(&views),
            Err(QuizError::UnknownOption {
                question: 3,
                tag: "quidditch".into()
            })
        );
        views.truncate(4);
        views[3].pop();
        assert_eq!(
            bank.check_markup(&views),
            Err(QuizError::ViewCountMismatch {
                views: 4,
                questions: 5
            })
        );
    }

    #[test]
    fn themed_tag_cannot_shadow_another_category() {
        static SHADOW: &[(&str, Category)] = &[("sec", Web), ("data", Data)];
        let q = Question {
            id: "shadow",
            prompt: "",
            options: SHADOW,
        };
        assert!(matches!(
            QuestionBank::new(vec![q]),
            Err(QuizError::ShadowedCategory { question: 0, .. })
        ));
    }

    #[test]
    fn duplicate_tags_and_empty_banks_fail_construction() {
        static DUP: &[(&str, Category)] = &[("x", Web), ("x", Sec)];
        let q = Question {
            id: "dup",
            prompt: "",
            options: DUP,
        };
        assert!(matches!(
            QuestionBank::new(vec![q]),
            Err(QuizError::DuplicateOption { question: 0, .. })
        ));
        assert!(matches!(QuestionBank::new(vec![]), Err(QuizError::EmptyBank)));
        let empty = Question {
            id: "none",
            prompt: "",
            options: &[],
        };
        assert!(matches!(
            QuestionBank::new(vec![empty]),
            Err(QuizError::EmptyQuestion(0))
        ));
    }
}
