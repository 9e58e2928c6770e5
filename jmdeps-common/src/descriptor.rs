// jmdeps-common/src/descriptor.rs
//! Reads the `requires` directives out of a `module-info.java` file.
//!
//! Only as much of the module declaration grammar is understood as is needed
//! to extract the module name and its `requires` statements. Other directives
//! (`exports`, `opens`, `uses`, `provides`) are skipped up to their `;`.

use std::fmt;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{JmdError, Result};

lazy_static! {
    static ref QUALIFIED_NAME_RE: Regex =
        Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*(\.[\p{L}_$][\p{L}\p{N}_$]*)*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    Requires,
    RequiresTransitive,
    RequiresStatic,
    RequiresStaticTransitive,
}

impl DirectiveKind {
    /// All kinds, in the order their directives are processed.
    pub const ALL: [DirectiveKind; 4] = [
        DirectiveKind::Requires,
        DirectiveKind::RequiresTransitive,
        DirectiveKind::RequiresStatic,
        DirectiveKind::RequiresStaticTransitive,
    ];

    fn from_modifiers(is_static: bool, is_transitive: bool) -> Self {
        match (is_static, is_transitive) {
            (false, false) => Self::Requires,
            (false, true) => Self::RequiresTransitive,
            (true, false) => Self::RequiresStatic,
            (true, true) => Self::RequiresStaticTransitive,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Requires => "requires",
            Self::RequiresTransitive => "requires transitive",
            Self::RequiresStatic => "requires static",
            Self::RequiresStaticTransitive => "requires static transitive",
        };
        f.write_str(text)
    }
}

/// Parsed module descriptor: the module name and its `requires` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    module_name: String,
    requires: Vec<String>,
    requires_transitive: Vec<String>,
    requires_static: Vec<String>,
    requires_static_transitive: Vec<String>,
}

/// Stand-in for projects without a descriptor.
pub static EMPTY: ModuleDescriptor = ModuleDescriptor {
    module_name: String::new(),
    requires: Vec::new(),
    requires_transitive: Vec::new(),
    requires_static: Vec::new(),
    requires_static_transitive: Vec::new(),
};

/// Syntax error in descriptor text, before a file path is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl ModuleDescriptor {
    pub fn empty() -> &'static ModuleDescriptor {
        &EMPTY
    }

    /// Reads and parses a descriptor file. Both read and syntax errors name the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading module descriptor {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| JmdError::ReadFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| JmdError::Descriptor {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        let tokens = tokenize(text)?;
        Parser { tokens, pos: 0 }.descriptor()
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn is_empty(&self) -> bool {
        self.module_name.is_empty() && DirectiveKind::ALL.iter().all(|k| self.get(*k).is_empty())
    }

    pub fn get(&self, kind: DirectiveKind) -> &[String] {
        match kind {
            DirectiveKind::Requires => &self.requires,
            DirectiveKind::RequiresTransitive => &self.requires_transitive,
            DirectiveKind::RequiresStatic => &self.requires_static,
            DirectiveKind::RequiresStaticTransitive => &self.requires_static_transitive,
        }
    }

    /// Every directive, grouped by kind in [`DirectiveKind::ALL`] order.
    pub fn directives(&self) -> impl Iterator<Item = (DirectiveKind, &str)> + '_ {
        DirectiveKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |name| (kind, name.as_str())))
    }

    fn push(&mut self, kind: DirectiveKind, name: String) {
        let list = match kind {
            DirectiveKind::Requires => &mut self.requires,
            DirectiveKind::RequiresTransitive => &mut self.requires_transitive,
            DirectiveKind::RequiresStatic => &mut self.requires_static,
            DirectiveKind::RequiresStaticTransitive => &mut self.requires_static_transitive,
        };
        list.push(name);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Punct(char),
    Str,
}

#[derive(Debug, Clone, Copy)]
struct Spanned<'a> {
    token: Token<'a>,
    line: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

fn tokenize(text: &str) -> std::result::Result<Vec<Spanned<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let comment_line = line;
                let mut previous = '\0';
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                    }
                    if previous == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    previous = c;
                }
                if !closed {
                    return Err(ParseError {
                        line: comment_line,
                        message: "unterminated block comment".to_string(),
                    });
                }
            }
            '"' => {
                let mut escaped = false;
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                    if c == '"' && !escaped {
                        closed = true;
                        break;
                    }
                    escaped = c == '\\' && !escaped;
                }
                if !closed {
                    return Err(ParseError {
                        line,
                        message: "unterminated string literal".to_string(),
                    });
                }
                tokens.push(Spanned { token: Token::Str, line });
            }
            c if is_word_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some((i, next)) = chars.peek().copied() {
                    if !is_word_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                tokens.push(Spanned {
                    token: Token::Word(&text[start..end]),
                    line,
                });
            }
            other => tokens.push(Spanned {
                token: Token::Punct(other),
                line,
            }),
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|t| t.token)
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + offset).map(|t| t.token)
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn error<T>(&self, message: impl Into<String>) -> std::result::Result<T, ParseError> {
        Err(ParseError {
            line: self.line(),
            message: message.into(),
        })
    }

    fn expect_punct(&mut self, expected: char) -> std::result::Result<(), ParseError> {
        match self.peek() {
            Some(Token::Punct(c)) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(other) => self.error(format!("expected '{expected}', found {}", describe(other))),
            None => self.error(format!("expected '{expected}', found end of file")),
        }
    }

    fn qualified_name(&mut self, what: &str) -> std::result::Result<String, ParseError> {
        match self.peek() {
            Some(Token::Word(word)) if QUALIFIED_NAME_RE.is_match(word) => {
                self.pos += 1;
                Ok(word.to_string())
            }
            Some(Token::Word(word)) => self.error(format!("'{word}' is not a valid {what}")),
            Some(other) => self.error(format!("expected {what}, found {}", describe(other))),
            None => self.error(format!("expected {what}, found end of file")),
        }
    }

    fn descriptor(mut self) -> std::result::Result<ModuleDescriptor, ParseError> {
        self.skip_header()?;
        if self.peek().is_none() {
            return Ok(ModuleDescriptor::default());
        }

        if self.peek() == Some(Token::Word("open")) {
            self.pos += 1;
        }
        match self.next() {
            Some(Token::Word("module")) => {}
            Some(other) => {
                self.pos -= 1;
                return self.error(format!(
                    "expected module declaration, found {}",
                    describe(other)
                ));
            }
            None => return self.error("expected 'module' after 'open'"),
        }

        let mut descriptor = ModuleDescriptor {
            module_name: self.qualified_name("module name")?,
            ..Default::default()
        };
        self.expect_punct('{')?;

        loop {
            match self.peek() {
                Some(Token::Punct('}')) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::Word("requires")) => {
                    self.pos += 1;
                    let (kind, name) = self.requires()?;
                    descriptor.push(kind, name);
                }
                Some(Token::Word(_)) => self.skip_statement()?,
                Some(other) => {
                    return self.error(format!("unexpected {} in module body", describe(other)))
                }
                None => return self.error("missing closing '}' of module declaration"),
            }
        }

        if let Some(trailing) = self.peek() {
            return self.error(format!(
                "unexpected {} after module declaration",
                describe(trailing)
            ));
        }
        Ok(descriptor)
    }

    /// Skips `import` statements and annotations ahead of the module declaration.
    fn skip_header(&mut self) -> std::result::Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(Token::Word("import")) => self.skip_statement()?,
                Some(Token::Punct('@')) => {
                    self.pos += 1;
                    self.qualified_name("annotation name")?;
                    if self.peek() == Some(Token::Punct('(')) {
                        self.skip_parenthesized()?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_parenthesized(&mut self) -> std::result::Result<(), ParseError> {
        let mut depth = 0usize;
        while let Some(token) = self.next() {
            match token {
                Token::Punct('(') => depth += 1,
                Token::Punct(')') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        self.error("unbalanced parentheses in annotation")
    }

    fn skip_statement(&mut self) -> std::result::Result<(), ParseError> {
        while let Some(token) = self.next() {
            match token {
                Token::Punct(';') => return Ok(()),
                Token::Punct('}') | Token::Punct('{') => {
                    self.pos -= 1;
                    return self.error("statement is missing its terminating ';'");
                }
                _ => {}
            }
        }
        self.error("statement is missing its terminating ';'")
    }

    // `requires` has been consumed. Modifiers may come in either order; a word
    // directly followed by ';' is the module name even if it reads `transitive`.
    fn requires(&mut self) -> std::result::Result<(DirectiveKind, String), ParseError> {
        let mut is_static = false;
        let mut is_transitive = false;
        loop {
            let modifier = match (self.peek(), self.peek_at(1)) {
                (Some(Token::Word(word @ ("static" | "transitive"))), Some(next))
                    if next != Token::Punct(';') =>
                {
                    word
                }
                _ => break,
            };
            let flag = if modifier == "static" {
                &mut is_static
            } else {
                &mut is_transitive
            };
            if *flag {
                return self.error(format!("duplicate '{modifier}' modifier"));
            }
            *flag = true;
            self.pos += 1;
        }

        let name = self.qualified_name("module name in requires")?;
        match self.peek() {
            Some(Token::Punct(';')) => self.pos += 1,
            _ => return self.error(format!("'requires {name}' is missing its terminating ';'")),
        }
        Ok((DirectiveKind::from_modifiers(is_static, is_transitive), name))
    }
}

fn describe(token: Token<'_>) -> String {
    match token {
        Token::Word(word) => format!("'{word}'"),
        Token::Punct(c) => format!("'{c}'"),
        Token::Str => "string literal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(descriptor: &ModuleDescriptor, kind: DirectiveKind) -> Vec<&str> {
        descriptor.get(kind).iter().map(String::as_str).collect()
    }

    #[test]
    fn parses_all_requires_variants_in_order() {
        let descriptor = ModuleDescriptor::parse(
            r#"
            module org.example.app {
                requires org.example.lib;
                requires transitive org.slf4j;
                requires static com.github.spotbugs.annotations;
                requires static transitive org.jspecify;
                requires transitive static org.apiguardian.api;
                requires org.example.lib;
            }"#,
        )
        .unwrap();

        assert_eq!(descriptor.module_name(), "org.example.app");
        assert_eq!(
            names(&descriptor, DirectiveKind::Requires),
            vec!["org.example.lib", "org.example.lib"]
        );
        assert_eq!(names(&descriptor, DirectiveKind::RequiresTransitive), vec!["org.slf4j"]);
        assert_eq!(
            names(&descriptor, DirectiveKind::RequiresStatic),
            vec!["com.github.spotbugs.annotations"]
        );
        assert_eq!(
            names(&descriptor, DirectiveKind::RequiresStaticTransitive),
            vec!["org.jspecify", "org.apiguardian.api"]
        );
    }

    #[test]
    fn skips_comments_annotations_and_other_directives() {
        let descriptor = ModuleDescriptor::parse(
            r#"
            import org.example.api.Service;
            /** Module docs with requires fake.module; inside. */
            @SuppressWarnings({"module", "requires-automatic"})
            open module org.example.app {
                // requires commented.out;
                exports org.example.app.api to org.example.other, org.example.third;
                opens org.example.app.internal;
                uses Service;
                provides Service with org.example.app.ServiceImpl;
                requires /* inline */ java.sql;
            }
            "#,
        )
        .unwrap();

        assert_eq!(descriptor.module_name(), "org.example.app");
        assert_eq!(
            descriptor.directives().collect::<Vec<_>>(),
            vec![(DirectiveKind::Requires, "java.sql")]
        );
    }

    #[test]
    fn module_named_transitive_is_a_plain_requires() {
        let descriptor =
            ModuleDescriptor::parse("module a { requires transitive; requires static transitive; }")
                .unwrap();
        assert_eq!(names(&descriptor, DirectiveKind::Requires), vec!["transitive"]);
        assert_eq!(names(&descriptor, DirectiveKind::RequiresStatic), vec!["transitive"]);
    }

    #[test]
    fn text_without_declaration_is_empty() {
        let descriptor = ModuleDescriptor::parse("// nothing here\n/* really */").unwrap();
        assert!(descriptor.is_empty());
        assert_eq!(&descriptor, ModuleDescriptor::empty());
    }

    #[test]
    fn module_without_directives_has_empty_lists() {
        let descriptor = ModuleDescriptor::parse("module org.example.lib { }").unwrap();
        assert_eq!(descriptor.module_name(), "org.example.lib");
        assert_eq!(descriptor.directives().count(), 0);
        assert!(!descriptor.is_empty());
    }

    #[test]
    fn reports_line_of_error() {
        let err = ModuleDescriptor::parse("module a {\n  requires b\n}").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("requires b"));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "module { }",
            "module a",
            "module a { requires b; ",
            "module a { requires ; }",
            "module a { requires static static b; }",
            "module a { requires b-c; }",
            "module a { } trailing",
            "module a { /* open comment }",
            "class Foo { }",
        ] {
            assert!(ModuleDescriptor::parse(text).is_err(), "accepted: {text}");
        }
    }
}
