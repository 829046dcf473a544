//! Front end for the declarative style-file format.
//!
//! A style file is evaluated top-to-bottom and contains three directive
//! forms:
//!
//! ```text
//! all
//! rule 'MD013', :line_length => 80, :tables => false
//! exclude_rule 'MD033'
//! ```
//!
//! `all` selects the all-enabled base policy (`no_rules` the all-disabled
//! one); `rule` enables a rule and sets zero or more style options;
//! `exclude_rule` disables a rule. Option values are integers, booleans
//! (`true`/`false` or the symbol forms `:true`/`:false`), quoted strings,
//! or bare symbols (`:atx` reads as the string `atx`). `#` starts a
//! comment. Unlike Markdown parsing, configuration parsing is strict:
//! malformed lines fail with the offending line number.

use crate::config::{BasePolicy, Directive, OptionValue};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parsed style file: base policy plus the ordered directive sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleFile {
    pub base: BasePolicy,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read style file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("style file syntax error at line {line}: {reason}")]
    Syntax { line: usize, reason: String },
}

/// Load and parse a style file from disk.
pub fn load_style(path: &Path) -> Result<StyleFile, StyleError> {
    let content = fs::read_to_string(path).map_err(|source| StyleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_style(&content)
}

/// Parse style-file source text.
pub fn parse_style(source: &str) -> Result<StyleFile, StyleError> {
    let mut style = StyleFile::default();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let tokens = tokenize(raw, line)?;
        if tokens.is_empty() {
            continue;
        }
        parse_line(&tokens, line, &mut style)?;
    }

    Ok(style)
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    /// Bare word: `all`, `rule`, `true`, ...
    Word(String),
    /// Symbol: `:line_length`, `:atx`, ...
    Sym(String),
    /// Quoted string: `'MD013'`, `".,;:!"`, ...
    Str(String),
    Int(i64),
    Comma,
    Arrow,
}

fn syntax(line: usize, reason: impl Into<String>) -> StyleError {
    StyleError::Syntax {
        line,
        reason: reason.into(),
    }
}

fn tokenize(text: &str, line: usize) -> Result<Vec<Tok>, StyleError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' => {
                chars.next();
            }
            '#' => break,
            ',' => {
                chars.next();
                tokens.push(Tok::Comma);
            }
            '=' => {
                chars.next();
                if chars.next() != Some('>') {
                    return Err(syntax(line, "expected '=>'"));
                }
                tokens.push(Tok::Arrow);
            }
            '\'' | '"' => {
                let quote = ch;
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => return Err(syntax(line, "unterminated string")),
                    }
                }
                tokens.push(Tok::Str(value));
            }
            ':' => {
                chars.next();
                let word = take_word(&mut chars);
                if word.is_empty() {
                    return Err(syntax(line, "expected symbol name after ':'"));
                }
                tokens.push(Tok::Sym(word));
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = digits
                    .parse::<i64>()
                    .map_err(|_| syntax(line, format!("integer out of range: {}", digits)))?;
                tokens.push(Tok::Int(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                tokens.push(Tok::Word(take_word(&mut chars)));
            }
            c => {
                return Err(syntax(line, format!("unexpected character '{}'", c)));
            }
        }
    }

    Ok(tokens)
}

fn take_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }
    word
}

fn parse_line(tokens: &[Tok], line: usize, style: &mut StyleFile) -> Result<(), StyleError> {
    let Tok::Word(keyword) = &tokens[0] else {
        return Err(syntax(line, "expected a directive keyword"));
    };

    match keyword.as_str() {
        "all" | "no_rules" => {
            if tokens.len() > 1 {
                return Err(syntax(line, format!("'{}' takes no arguments", keyword)));
            }
            style.base = if keyword == "all" {
                BasePolicy::AllEnabled
            } else {
                BasePolicy::AllDisabled
            };
            Ok(())
        }
        "rule" => parse_rule_line(&tokens[1..], line, style),
        "exclude_rule" => {
            let [Tok::Str(code)] = &tokens[1..] else {
                return Err(syntax(line, "expected exclude_rule '<CODE>'"));
            };
            style.directives.push(Directive::Exclude(code.clone()));
            Ok(())
        }
        other => Err(syntax(line, format!("unknown directive '{}'", other))),
    }
}

fn parse_rule_line(
    rest: &[Tok],
    line: usize,
    style: &mut StyleFile,
) -> Result<(), StyleError> {
    let Some(Tok::Str(code)) = rest.first() else {
        return Err(syntax(line, "expected rule '<CODE>'"));
    };

    let mut i = 1;
    let mut any_option = false;
    while i < rest.len() {
        if rest[i] != Tok::Comma {
            return Err(syntax(line, "expected ',' before option"));
        }
        let (Some(Tok::Sym(option)), Some(Tok::Arrow)) = (rest.get(i + 1), rest.get(i + 2))
        else {
            return Err(syntax(line, "expected ':option => value'"));
        };
        let value = match rest.get(i + 3) {
            Some(Tok::Int(n)) => OptionValue::Int(*n),
            Some(Tok::Str(s)) => OptionValue::Str(s.clone()),
            Some(Tok::Word(w)) | Some(Tok::Sym(w)) => match w.as_str() {
                "true" => OptionValue::Bool(true),
                "false" => OptionValue::Bool(false),
                other => OptionValue::Str(other.to_string()),
            },
            _ => return Err(syntax(line, "expected an option value")),
        };
        style.directives.push(Directive::SetStyle {
            code: code.clone(),
            option: option.clone(),
            value,
        });
        any_option = true;
        i += 4;
    }

    if !any_option {
        style.directives.push(Directive::Enable(code.clone()));
    }
    Ok(())
}
