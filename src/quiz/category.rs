// Category table: the seven quiz outcomes, their house and their path label.
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Closed set of quiz outcomes. Declaration order is the tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Web,
    Data,
    Sec,
    Sys,
    DevOps,
    Team,
    Iot,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Web,
        Category::Data,
        Category::Sec,
        Category::Sys,
        Category::DevOps,
        Category::Team,
        Category::Iot,
    ];

    /// Outcome used when nothing was answered.
    pub const DEFAULT: Category = Category::Web;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn tag(self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Data => "data",
            Category::Sec => "sec",
            Category::Sys => "sys",
            Category::DevOps => "devops",
            Category::Team => "team",
            Category::Iot => "iot",
        }
    }

    pub fn house(self) -> &'static str {
        match self {
            Category::Web | Category::Data => "Ravenclaw",
            Category::Sec => "Gryffindor",
            Category::Sys | Category::DevOps | Category::Iot => "Slytherin",
            Category::Team => "Hufflepuff",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Web => "Web Wizardry (Frontend & UX)",
            Category::Data => "Data Divination (AI & Data Science)",
            Category::Sec => "Cyber Charms (Cybersecurity)",
            Category::Sys => "Systems Sorcery (Systems & Infra)",
            Category::DevOps => "Cloud Conjurors (DevOps & Infra)",
            Category::Team => "Software Guild (Engineering & Teamwork)",
            Category::Iot => "Hardware Hexes (IoT & Robotics)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.tag() == s)
            .ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}
