//! Token classification for fenced code blocks.
//!
//! Uses syntect's Sublime Text grammars to split code into the four token
//! kinds a code theme can color: keywords, strings, comments and function
//! names. Everything else stays plain.

use std::sync::OnceLock;

use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Color slot a token maps to in a code theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Comment,
    Function,
}

impl TokenKind {
    /// CSS class used on the token's `span`.
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Keyword => Some("tok-keyword"),
            Self::String => Some("tok-string"),
            Self::Comment => Some("tok-comment"),
            Self::Function => Some("tok-function"),
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "tok-keyword" => Some(Self::Keyword),
            "tok-string" => Some(Self::String),
            "tok-comment" => Some(Self::Comment),
            "tok-function" => Some(Self::Function),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// Split `code` into classified tokens.
///
/// Unknown or missing languages produce a single plain token. Adjacent
/// tokens of the same kind are merged, and concatenating every token's text
/// reproduces `code` exactly.
pub fn classify(language: Option<&str>, code: &str) -> Vec<Token> {
    let syntax_set = syntax_set();
    let Some(syntax) = language.and_then(|lang| find_syntax(syntax_set, lang)) else {
        return plain(code);
    };

    let _scope = crate::perf::scope("highlight.classify");
    let mut state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();
    let mut tokens: Vec<Token> = Vec::new();
    let mut consumed = 0;

    for line in LinesWithEndings::from(code) {
        let Ok(ops) = state.parse_line(line, syntax_set) else {
            tracing::debug!(language, "syntax parse failed, rest of block stays plain");
            break;
        };
        for (range, op) in ScopeRangeIterator::new(&ops, line) {
            let kind = match stack.apply(op) {
                Ok(()) => kind_for(stack.as_slice()),
                Err(err) => {
                    tracing::debug!(?err, "scope stack rejected op, token stays plain");
                    TokenKind::Plain
                }
            };
            if !range.is_empty() {
                push_token(&mut tokens, kind, &line[range]);
            }
        }
        consumed += line.len();
    }

    if consumed < code.len() {
        push_token(&mut tokens, TokenKind::Plain, &code[consumed..]);
    }
    tokens
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, lang: &str) -> Option<&'a SyntaxReference> {
    syntax_set
        .find_syntax_by_token(lang)
        .or_else(|| syntax_set.find_syntax_by_name(lang))
}

fn plain(code: &str) -> Vec<Token> {
    if code.is_empty() {
        return Vec::new();
    }
    vec![Token {
        kind: TokenKind::Plain,
        text: code.to_string(),
    }]
}

fn push_token(tokens: &mut Vec<Token>, kind: TokenKind, text: &str) {
    if let Some(last) = tokens.last_mut()
        && last.kind == kind
    {
        last.text.push_str(text);
        return;
    }
    tokens.push(Token {
        kind,
        text: text.to_string(),
    });
}

/// Innermost scope wins.
fn kind_for(scopes: &[Scope]) -> TokenKind {
    for scope in scopes.iter().rev() {
        let name = scope.build_string();
        if name.starts_with("comment") {
            return TokenKind::Comment;
        }
        if name.starts_with("string") {
            return TokenKind::String;
        }
        if name.starts_with("entity.name.function")
            || name.starts_with("support.function")
            || name.starts_with("variable.function")
        {
            return TokenKind::Function;
        }
        if name.starts_with("keyword") || name.starts_with("storage") {
            return TokenKind::Keyword;
        }
    }
    TokenKind::Plain
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}
