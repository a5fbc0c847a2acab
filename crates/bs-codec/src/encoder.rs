//! Text → code encoding: greedy, leftmost, longest-match tokenization.

use crate::normalizer::normalize;
use crate::phrase_index::PhraseIndex;
use crate::splitter::split_sentences;
use bs_dictionary::DictionaryStore;
use std::sync::Arc;

/// Separator between encoded sentences.
pub const SENTENCE_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Multi-word phrase from the phrase index.
    Phrase,
    /// Single word found by exact reverse lookup.
    Word,
    /// Unknown word, emitted unchanged.
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The normalized source words covered by this token.
    pub source: String,
    /// The emitted code, or the source word for pass-through tokens.
    pub output: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn is_code(&self) -> bool {
        self.kind != TokenKind::PassThrough
    }
}

#[derive(Debug, Clone)]
pub struct Encoder {
    store: Arc<DictionaryStore>,
    phrases: PhraseIndex,
}

impl Encoder {
    pub fn new(store: Arc<DictionaryStore>, max_phrase_words: usize) -> Self {
        let phrases = PhraseIndex::build(&store, max_phrase_words);
        Self { store, phrases }
    }

    pub fn phrases(&self) -> &PhraseIndex {
        &self.phrases
    }

    /// Tokenize an already-normalized sentence.
    pub fn tokenize(&self, sentence: &str) -> Vec<Token> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let mut tokens = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            let window = self.phrases.max_words().min(words.len() - i);
            let matched = (2..=window).rev().find_map(|len| {
                let candidate = words[i..i + len].join(" ");
                self.phrases.lookup(&candidate).map(|code| (candidate, code.to_string(), len))
            });

            if let Some((source, output, len)) = matched {
                tokens.push(Token { source, output, kind: TokenKind::Phrase });
                i += len;
                continue;
            }

            let word = words[i];
            let token = match self.store.code_for(word) {
                Some(code) => Token { source: word.to_string(), output: code.to_string(), kind: TokenKind::Word },
                None => Token { source: word.to_string(), output: word.to_string(), kind: TokenKind::PassThrough },
            };
            tokens.push(token);
            i += 1;
        }

        tokens
    }

    /// Normalize and encode one sentence into space-separated codes.
    pub fn encode_sentence(&self, sentence: &str) -> String {
        if sentence.trim().is_empty() {
            return String::new();
        }
        let normalized = normalize(sentence);
        self.tokenize(&normalized)
            .into_iter()
            .map(|t| t.output)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize and tokenize every sentence of `text`, skipping sentences
    /// that normalize to nothing.
    pub fn tokenize_text(&self, text: &str) -> Vec<Vec<Token>> {
        split_sentences(text)
            .map(|sentence| self.tokenize(&normalize(sentence)))
            .filter(|tokens| !tokens.is_empty())
            .collect()
    }

    /// Encode every sentence of `text`, joined by [`SENTENCE_SEPARATOR`].
    pub fn encode_text(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        join_sentences(&self.tokenize_text(text))
    }
}

/// Render tokenized sentences as a code string.
pub fn join_sentences(sentences: &[Vec<Token>]) -> String {
    sentences
        .iter()
        .map(|tokens| {
            tokens
                .iter()
                .map(|t| t.output.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(SENTENCE_SEPARATOR)
}
