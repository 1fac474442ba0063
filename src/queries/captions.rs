//! Vocabulary ("captions") CRUD against the dashboard API.
//!
//! Inputs are checked before any request is made: both sides of a word must
//! be non-blank and ids must be non-blank.

use crate::client::ApiClient;
use crate::config;
use crate::error::{Result, WordbookError};
use crate::models::{Word, WordInput, WordsResponse};

/// Query interface for the signed-in user's word list.
pub struct CaptionQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> CaptionQuery<'a> {
    /// Create a new `CaptionQuery` bound to the given client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All words of the signed-in user.
    pub fn list(&self) -> Result<Vec<Word>> {
        let response: WordsResponse = self.client.get(config::WORDS_PATH)?;
        Ok(response.words)
    }

    pub fn add(&self, word: &WordInput) -> Result<Word> {
        validate_word(word)?;
        self.client.post(config::ADD_WORD_PATH, word)
    }

    pub fn edit(&self, id: &str, word: &WordInput) -> Result<Word> {
        validate_id(id)?;
        validate_word(word)?;
        self.client
            .put(&format!("{}/{}", config::EDIT_WORD_PATH, id.trim()), word)
            .map_err(|e| missing_word(e, id))
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        validate_id(id)?;
        self.client
            .delete(&format!("{}/{}", config::DELETE_WORD_PATH, id.trim()))
            .map_err(|e| missing_word(e, id))
    }
}

/// A 404 on an id-addressed call means the word is gone.
fn missing_word(error: WordbookError, id: &str) -> WordbookError {
    match error {
        WordbookError::Api { status: 404, .. } => {
            WordbookError::NotFound(format!("Word {}", id.trim()))
        }
        other => other,
    }
}

fn validate_word(word: &WordInput) -> Result<()> {
    if word.national.trim().is_empty() || word.foreign.trim().is_empty() {
        return Err(WordbookError::InvalidArgument(
            "Both national and foreign words are required".into(),
        ));
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(WordbookError::InvalidArgument("Word ID is required".into()));
    }
    Ok(())
}
