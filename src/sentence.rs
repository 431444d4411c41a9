// WHY: Sentences and tokens are detached snapshots of the tree so callers can
// keep them after the owning RmhFile is dropped

use serde::Serialize;

use crate::tree::Element;

/// Stand-in for an identifier, paragraph number or sentence number that the
/// document does not provide
pub const ABSENT: &str = "None";

/// One annotated word form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub tag: String,
}

impl Token {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }

    /// Build a token from a word or punctuation element
    ///
    /// `lemma` and `type` attributes fall back to the element text, each on its own.
    pub fn from_element(element: Element<'_>) -> Self {
        let text = element.text().unwrap_or_default();
        Self::new(
            text,
            element.attr("lemma").unwrap_or(text),
            element.attr("type").unwrap_or(text),
        )
    }
}

/// A sentence with its corpus-wide index `"{identifier}.{paragraph}.{sentence}"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub index: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Token texts joined by single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn from_element(identifier: Option<&str>, paragraph: Option<&str>, sentence: Element<'_>) -> Self {
        Self {
            index: compose_index(identifier, paragraph, sentence.attr("n")),
            tokens: sentence.children().map(Token::from_element).collect(),
        }
    }
}

/// Join the three index components with `.`, writing [`ABSENT`] for missing ones
pub fn compose_index(identifier: Option<&str>, paragraph: Option<&str>, sentence: Option<&str>) -> String {
    format!(
        "{}.{}.{}",
        identifier.unwrap_or(ABSENT),
        paragraph.unwrap_or(ABSENT),
        sentence.unwrap_or(ABSENT)
    )
}
