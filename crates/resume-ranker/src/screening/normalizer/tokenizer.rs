use std::sync::Arc;

use super::stopwords::is_english_stop_word;

/// Model identifier for the built-in English rule set.
pub const DEFAULT_TOKENIZER_MODEL: &str = "en_rules";

/// Coarse classification attached to every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Punctuation,
    Symbol,
}

/// A slice of the input text together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    fn classify(text: &'a str) -> Self {
        Self {
            text,
            kind: classify(text),
        }
    }

    pub fn is_punct(&self) -> bool {
        self.kind == TokenKind::Punctuation
    }
}

/// Linguistic tokenization capability used by the normalizer.
///
/// Implementations are loaded once at startup and shared, so they must be
/// immutable after construction.
pub trait Tokenizer: Send + Sync {
    /// Identifier of the loaded model, reported in logs and health output.
    fn model(&self) -> &str;

    /// Split `text` into tokens. Whitespace never appears in the output.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>>;

    /// Whether `word` belongs to the closed stop-word list of the model.
    fn is_stop_word(&self, word: &str) -> bool;
}

/// Failure to resolve a tokenizer model at startup.
#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("unknown tokenizer model '{0}' (available: en_rules)")]
    UnknownModel(String),
}

/// Resolve a tokenizer model identifier into a shared tokenizer instance.
pub fn load_tokenizer(model: &str) -> Result<Arc<dyn Tokenizer>, TokenizerError> {
    match model.trim().to_ascii_lowercase().as_str() {
        "en_rules" | "en" | "english" => Ok(Arc::new(RuleBasedTokenizer::english())),
        _ => Err(TokenizerError::UnknownModel(model.trim().to_string())),
    }
}

/// Whitespace splitter with prefix, suffix and infix rules for English text.
///
/// Leading and trailing punctuation is peeled into separate tokens, clitics
/// (`n't`, `'s`, `'ll`, ...) are split from their host word, and hyphens or
/// slashes between alphanumerics become their own tokens. Dotted
/// abbreviations such as `e.g.` are kept whole.
#[derive(Debug, Clone)]
pub struct RuleBasedTokenizer {
    model: String,
}

impl RuleBasedTokenizer {
    pub fn english() -> Self {
        Self {
            model: DEFAULT_TOKENIZER_MODEL.to_string(),
        }
    }
}

impl Default for RuleBasedTokenizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Tokenizer for RuleBasedTokenizer {
    fn model(&self) -> &str {
        &self.model
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            split_chunk(chunk, &mut tokens);
        }
        tokens
    }

    fn is_stop_word(&self, word: &str) -> bool {
        is_english_stop_word(word)
    }
}

const PREFIXES: &[char] = &[
    '(', '[', '{', '"', '\'', '`', '\u{201c}', '\u{2018}', '\u{ab}', '\u{bf}', '\u{a1}', '*',
    '\u{2026}',
];

const SUFFIXES: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\'', '\u{201d}', '\u{2019}', '\u{bb}',
    '\u{2026}', '*',
];

const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

fn split_chunk<'a>(chunk: &'a str, out: &mut Vec<Token<'a>>) {
    if chunk.chars().all(|c| !c.is_alphanumeric()) {
        out.push(Token::classify(chunk));
        return;
    }

    let mut core = chunk;
    let mut prefixes = Vec::new();
    let mut suffixes = Vec::new();

    while let Some(first) = core.chars().next() {
        if core.len() == first.len_utf8() || !PREFIXES.contains(&first) {
            break;
        }
        let (head, rest) = core.split_at(first.len_utf8());
        prefixes.push(Token::classify(head));
        core = rest;
    }

    while let Some(last) = core.chars().next_back() {
        if core.len() == last.len_utf8() || !SUFFIXES.contains(&last) {
            break;
        }
        if last == '.' && is_abbreviation(core) {
            break;
        }
        let (rest, tail) = core.split_at(core.len() - last.len_utf8());
        suffixes.push(Token::classify(tail));
        core = rest;
    }

    out.extend(prefixes);

    let (host, clitic) = split_clitic(core);
    split_infixes(host, out);
    if let Some(clitic) = clitic {
        out.push(Token::classify(clitic));
    }

    out.extend(suffixes.into_iter().rev());
}

/// `e.g.`, `u.s.`, `i.e.`: single letters separated by periods.
fn is_abbreviation(word: &str) -> bool {
    let mut expect_letter = true;
    let mut letters = 0;
    for c in word.chars() {
        if expect_letter {
            if !c.is_alphabetic() {
                return false;
            }
            letters += 1;
        } else if c != '.' {
            return false;
        }
        expect_letter = !expect_letter;
    }
    letters >= 2 && word.ends_with('.')
}

fn split_clitic(word: &str) -> (&str, Option<&str>) {
    for clitic in CLITICS {
        if let Some(found) = find_clitic(word, clitic) {
            return found;
        }
    }
    (word, None)
}

fn find_clitic<'a>(word: &'a str, clitic: &str) -> Option<(&'a str, Option<&'a str>)> {
    let curly = clitic.replace('\'', "\u{2019}");
    for candidate in [clitic, curly.as_str()] {
        if word.len() > candidate.len() && ends_with_ignore_case(word, candidate) {
            let split = word.len() - candidate.len();
            if !word.is_char_boundary(split) {
                continue;
            }
            let (host, tail) = word.split_at(split);
            if host.chars().next_back().is_some_and(char::is_alphabetic) {
                return Some((host, Some(tail)));
            }
        }
    }
    None
}

fn ends_with_ignore_case(word: &str, suffix: &str) -> bool {
    let split = word.len() - suffix.len();
    word.is_char_boundary(split) && word[split..].eq_ignore_ascii_case(suffix)
}

fn split_infixes<'a>(word: &'a str, out: &mut Vec<Token<'a>>) {
    if word.is_empty() {
        return;
    }

    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut start = 0;
    for (position, &(offset, c)) in chars.iter().enumerate() {
        if !matches!(c, '-' | '/' | '\u{2013}' | '\u{2014}') {
            continue;
        }
        let before = position
            .checked_sub(1)
            .map(|prev| chars[prev].1.is_alphanumeric())
            .unwrap_or(false);
        let after = chars
            .get(position + 1)
            .map(|(_, next)| next.is_alphabetic())
            .unwrap_or(false);
        if before && after {
            out.push(Token::classify(&word[start..offset]));
            let end = offset + c.len_utf8();
            out.push(Token::classify(&word[offset..end]));
            start = end;
        }
    }
    out.push(Token::classify(&word[start..]));
}

fn classify(text: &str) -> TokenKind {
    if text.chars().all(is_punctuation) {
        TokenKind::Punctuation
    } else if text.chars().all(|c| !c.is_alphanumeric()) {
        TokenKind::Symbol
    } else if is_number(text) {
        TokenKind::Number
    } else {
        TokenKind::Word
    }
}

fn is_number(text: &str) -> bool {
    let digits = text.chars().filter(char::is_ascii_digit).count();
    digits > 0
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%'))
}

/// Unicode punctuation categories, restricted to what shows up in resumes.
/// Symbols (`+ $ < = > ^ | ~` and currency) are not punctuation.
pub(crate) fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"'
            | '#'
            | '%'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | ','
            | '-'
            | '.'
            | '/'
            | ':'
            | ';'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '_'
            | '{'
            | '}'
            | '\u{a1}'
            | '\u{a7}'
            | '\u{ab}'
            | '\u{b6}'
            | '\u{b7}'
            | '\u{bb}'
            | '\u{bf}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205e}'
            | '\u{3001}'..='\u{3003}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        RuleBasedTokenizer::english()
            .tokenize(input)
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn peels_trailing_punctuation_and_possessive_quote() {
        assert_eq!(
            texts("Python NLP expert, five years' experience."),
            vec!["Python", "NLP", "expert", ",", "five", "years", "'", "experience", "."]
        );
    }

    #[test]
    fn splits_clitics_from_their_host() {
        assert_eq!(texts("don't"), vec!["do", "n't"]);
        assert_eq!(texts("team's"), vec!["team", "'s"]);
        assert_eq!(texts("we\u{2019}ll"), vec!["we", "\u{2019}ll"]);
    }

    #[test]
    fn splits_hyphen_and_slash_infixes() {
        assert_eq!(
            texts("state-of-the-art CI/CD"),
            vec!["state", "-", "of", "-", "the", "-", "art", "CI", "/", "CD"]
        );
    }

    #[test]
    fn keeps_technical_terms_and_abbreviations_whole() {
        assert_eq!(texts("C++ node.js e.g."), vec!["C++", "node.js", "e.g."]);
        assert_eq!(texts("(C#)"), vec!["(", "C#", ")"]);
    }

    #[test]
    fn classifies_tokens() {
        let tokenizer = RuleBasedTokenizer::english();
        let kinds: Vec<TokenKind> = tokenizer
            .tokenize("Rust 2021 ... $")
            .into_iter()
            .map(|token| token.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Number,
                TokenKind::Punctuation,
                TokenKind::Symbol
            ]
        );
    }

    #[test]
    fn empty_and_whitespace_inputs_have_no_tokens() {
        assert!(texts("").is_empty());
        assert!(texts(" \n\t ").is_empty());
    }

    #[test]
    fn load_tokenizer_accepts_aliases_and_rejects_unknown_models() {
        let tokenizer = load_tokenizer("EN").expect("alias resolves");
        assert_eq!(tokenizer.model(), DEFAULT_TOKENIZER_MODEL);

        match load_tokenizer("en_core_web_sm") {
            Err(TokenizerError::UnknownModel(model)) => assert_eq!(model, "en_core_web_sm"),
            Ok(_) => panic!("unexpected model resolution"),
        }
    }
}
