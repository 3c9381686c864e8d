use maud::html;
use serde::{Deserialize, Serialize};

use super::Category;

/// Resolved quiz outcome; the only state persisted between visits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub house: String,
    /// Category tag (`web`, `sec`, ...).
    pub path: String,
    pub label: String,
}

impl ResultRecord {
    pub fn for_category(category: Category) -> Self {
        Self {
            house: category.house().to_string(),
            path: category.tag().to_string(),
            label: category.label().to_string(),
        }
    }

    /// Substitute shown by consumers when nothing valid is stored.
    pub fn placeholder() -> Self {
        Self::for_category(Category::DEFAULT)
    }

    pub fn category(&self) -> Option<Category> {
        self.path.parse().ok()
    }
}

/// What the result region displays: the record plus the raw selections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub record: ResultRecord,
    pub selections: Vec<String>,
}

/// Element ids of the two actions rendered inside the result card.
pub const ENTER_BUTTON_ID: &str = "enter-site";
pub const RETAKE_BUTTON_ID: &str = "restart-quiz";

impl ResultView {
    pub fn to_markup(&self) -> String {
        let selections = if self.selections.is_empty() {
            "—".to_string()
        } else {
            self.selections.join(", ")
        };
        html! {
            div class="result-card" role="status" aria-live="polite" {
                h3 { "Your House: " strong { (self.record.house) } }
                p class="result-path" { "Recommended Path: " em { (self.record.label) } }
                p class="result-choices" { "Selections: " (selections) }
                div class="result-actions" {
                    button id=(ENTER_BUTTON_ID) class="btn primary" { "Enter" }
                    button id=(RETAKE_BUTTON_ID) class="btn ghost" { "Retake" }
                }
            }
        }
        .into_string()
    }
}
