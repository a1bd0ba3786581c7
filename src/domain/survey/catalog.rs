//! Question catalog - the ordered, read-only question bank.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Identifies one question: its group and its position inside that group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionKey {
    pub group: String,
    pub index: u32,
}

impl QuestionKey {
    pub fn new(group: impl Into<String>, index: u32) -> Self {
        Self {
            group: group.into(),
            index,
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.group, self.index)
    }
}

/// A single pairwise-comparison question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: QuestionKey,
    pub text: String,
}

impl Question {
    pub fn group(&self) -> &str {
        &self.key.group
    }

    pub fn index(&self) -> u32 {
        self.key.index
    }
}

/// Questions sharing a group, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionGroup {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Ordered question bank.
///
/// Groups keep the order of their first appearance in the source; questions
/// keep source order inside their group and are indexed from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionCatalog {
    groups: Vec<QuestionGroup>,
}

impl QuestionCatalog {
    /// Builds a catalog from `(group, question)` rows.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` for a blank group or question.
    pub fn from_rows<I, G, Q>(rows: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (G, Q)>,
        G: Into<String>,
        Q: Into<String>,
    {
        let mut groups: Vec<QuestionGroup> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (group, text) in rows {
            let group = group.into().trim().to_string();
            let text = text.into().trim().to_string();
            if group.is_empty() {
                return Err(ValidationError::empty_field("group"));
            }
            if text.is_empty() {
                return Err(ValidationError::empty_field("question"));
            }

            let pos = *positions.entry(group.clone()).or_insert_with(|| {
                groups.push(QuestionGroup {
                    name: group.clone(),
                    questions: Vec::new(),
                });
                groups.len() - 1
            });
            let bucket = &mut groups[pos];
            let index = bucket.questions.len() as u32;
            bucket.questions.push(Question {
                key: QuestionKey::new(group, index),
                text,
            });
        }

        Ok(Self { groups })
    }

    /// Returns the groups in catalog order.
    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    /// Iterates over every question in catalog order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.groups.iter().flat_map(|g| g.questions.iter())
    }

    /// Looks up a question by key.
    pub fn get(&self, key: &QuestionKey) -> Option<&Question> {
        self.groups
            .iter()
            .find(|g| g.name == key.group)
            .and_then(|g| g.questions.get(key.index as usize))
    }

    pub fn contains(&self, key: &QuestionKey) -> bool {
        self.get(key).is_some()
    }

    /// Total number of questions.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuestionCatalog {
        QuestionCatalog::from_rows(vec![
            ("Gestalt Laws", "Closure vs Continuity"),
            ("Wickens", "Legibility vs Redundancy"),
            ("Gestalt Laws", "Proximity vs Similarity"),
        ])
        .unwrap()
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let catalog = sample();
        let names: Vec<_> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Gestalt Laws", "Wickens"]);
    }

    #[test]
    fn questions_are_indexed_within_their_group() {
        let catalog = sample();
        let keys: Vec<_> = catalog.questions().map(|q| q.key.to_string()).collect();
        assert_eq!(keys, vec!["Gestalt Laws_0", "Gestalt Laws_1", "Wickens_0"]);
    }

    #[test]
    fn get_finds_question_by_key() {
        let catalog = sample();
        let question = catalog.get(&QuestionKey::new("Gestalt Laws", 1)).unwrap();
        assert_eq!(question.text, "Proximity vs Similarity");
        assert!(!catalog.contains(&QuestionKey::new("Wickens", 1)));
        assert!(!catalog.contains(&QuestionKey::new("Unknown", 0)));
    }

    #[test]
    fn len_counts_all_questions() {
        assert_eq!(sample().len(), 3);
        assert!(QuestionCatalog::default().is_empty());
    }

    #[test]
    fn blank_cells_are_rejected() {
        let err = QuestionCatalog::from_rows(vec![("  ", "Q")]).unwrap_err();
        assert_eq!(err.field(), "group");
        let err = QuestionCatalog::from_rows(vec![("G", "")]).unwrap_err();
        assert_eq!(err.field(), "question");
    }

    #[test]
    fn cells_are_trimmed() {
        let catalog = QuestionCatalog::from_rows(vec![(" G1 ", " Q ")]).unwrap();
        assert_eq!(catalog.groups()[0].name, "G1");
        assert_eq!(catalog.groups()[0].questions[0].text, "Q");
    }
}
