use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Word — One vocabulary entry ("caption")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(rename = "_id")]
    pub id: String,
    pub national: String,
    pub foreign: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub in_sentences: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordsResponse {
    #[serde(default)]
    pub words: Vec<Word>,
}

/// Body for both adding and editing a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInput {
    pub national: String,
    pub foreign: String,
}

impl WordInput {
    pub fn new(national: impl Into<String>, foreign: impl Into<String>) -> Self {
        Self {
            national: national.into(),
            foreign: foreign.into(),
        }
    }
}
