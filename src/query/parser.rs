// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Classic query syntax.
//!
//! Supports what the answer pipeline produces and a little more:
//!
//! ```text
//! title:(sky blue) OR text:(sky blue)     field groups
//! water AND ice, water OR ice             explicit conjunctions
//! NOT steam, !steam, -steam, +water       modifiers
//! ```
//!
//! Clauses without an explicit conjunction get the default operator. Mixing
//! explicit and default operators follows the classic parser's clause rules:
//! `AND` upgrades the previous clause to MUST, `OR` under a default of AND
//! downgrades it to SHOULD, and a prohibited clause is never changed.
//!
//! Every bare term runs through the [`Analyzer`]. A word that analyzes to
//! nothing (a stop word) is dropped; one that splits into several tokens
//! becomes a nested group combined with the default operator.

use crate::analysis::Analyzer;
use crate::error::{Error, Result};
use crate::types::{Field, Operator};

/// How a clause participates in its boolean group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Must,
    Should,
    MustNot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub occur: Occur,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// One analyzed token in one field.
    Term { field: Field, term: String },
    /// A group of clauses. Empty groups match nothing.
    Boolean(Vec<Clause>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Field(String),
    Term(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conjunction {
    None,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    None,
    Required,
    Prohibited,
}

/// Parser configuration: the analyzer for bare terms, the field used when a
/// term has no `field:` prefix, and the default boolean operator.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser {
    analyzer: Analyzer,
    default_field: Field,
    operator: Operator,
}

impl QueryParser {
    pub fn new(analyzer: Analyzer, default_field: Field, operator: Operator) -> Self {
        Self {
            analyzer,
            default_field,
            operator,
        }
    }

    pub fn parse(&self, text: &str) -> Result<Query> {
        let tokens = lex(text)?;
        let mut state = ParseState {
            parser: self,
            source: text,
            tokens,
            pos: 0,
        };
        let clauses = state.parse_clauses(self.default_field)?;
        if let Some(token) = state.peek() {
            return Err(Error::parse(text, format!("unexpected {:?}", token)));
        }
        Ok(Query::Boolean(clauses))
    }
}

struct ParseState<'p> {
    parser: &'p QueryParser,
    source: &'p str,
    tokens: Vec<Token>,
    pos: usize,
}

impl ParseState<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::parse(self.source, reason)
    }

    /// `Modifier? Clause ( Conjunction? Modifier? Clause )*` up to `)` or end.
    fn parse_clauses(&mut self, field: Field) -> Result<Vec<Clause>> {
        let mut clauses: Vec<Clause> = Vec::new();
        let mut first = true;

        loop {
            let conj = match self.peek() {
                Some(Token::And) => Conjunction::And,
                Some(Token::Or) => Conjunction::Or,
                _ => Conjunction::None,
            };
            if conj != Conjunction::None {
                if first {
                    return Err(self.error("query cannot start with AND/OR"));
                }
                self.next();
            }

            match self.peek() {
                None | Some(Token::RParen) => {
                    if conj != Conjunction::None {
                        return Err(self.error("AND/OR has no right-hand operand"));
                    }
                    if first {
                        return Err(self.error("empty query"));
                    }
                    break;
                }
                _ => {}
            }

            let modifier = match self.peek() {
                Some(Token::Plus) => Modifier::Required,
                Some(Token::Minus) | Some(Token::Not) => Modifier::Prohibited,
                _ => Modifier::None,
            };
            if modifier != Modifier::None {
                self.next();
            }

            let query = self.parse_clause(field)?;
            self.add_clause(&mut clauses, conj, modifier, query)?;
            first = false;
        }

        Ok(clauses)
    }

    fn parse_clause(&mut self, field: Field) -> Result<Option<Query>> {
        match self.next() {
            Some(Token::Field(name)) => {
                let field = Field::from_name(&name)
                    .ok_or_else(|| self.error(format!("unknown field '{}'", name)))?;
                match self.next() {
                    Some(Token::LParen) => self.parse_group(field),
                    Some(Token::Term(word)) => Ok(self.term_query(field, &word)),
                    _ => Err(self.error(format!("field '{}' has no value", name))),
                }
            }
            Some(Token::LParen) => self.parse_group(field),
            Some(Token::Term(word)) => Ok(self.term_query(field, &word)),
            Some(token) => Err(self.error(format!("unexpected {:?}", token))),
            None => Err(self.error("modifier has no operand")),
        }
    }

    fn parse_group(&mut self, field: Field) -> Result<Option<Query>> {
        let clauses = self.parse_clauses(field)?;
        match self.next() {
            Some(Token::RParen) => {}
            _ => return Err(self.error("missing ')'")),
        }
        Ok((!clauses.is_empty()).then_some(Query::Boolean(clauses)))
    }

    fn term_query(&self, field: Field, word: &str) -> Option<Query> {
        let mut tokens = self.parser.analyzer.analyze(word);
        match tokens.len() {
            0 => None,
            1 => tokens.pop().map(|term| Query::Term { field, term }),
            _ => {
                let occur = match self.parser.operator {
                    Operator::And => Occur::Must,
                    Operator::Or => Occur::Should,
                };
                let clauses = tokens
                    .into_iter()
                    .map(|term| Clause {
                        occur,
                        query: Query::Term { field, term },
                    })
                    .collect();
                Some(Query::Boolean(clauses))
            }
        }
    }

    fn add_clause(
        &self,
        clauses: &mut Vec<Clause>,
        conj: Conjunction,
        modifier: Modifier,
        query: Option<Query>,
    ) -> Result<()> {
        let default_and = self.parser.operator == Operator::And;

        if let Some(prev) = clauses.last_mut() {
            if prev.occur != Occur::MustNot {
                if conj == Conjunction::And {
                    prev.occur = Occur::Must;
                } else if default_and && conj == Conjunction::Or {
                    prev.occur = Occur::Should;
                }
            }
        }

        // A dropped operand still counts for the conjunction it followed.
        let Some(query) = query else {
            return Ok(());
        };

        let prohibited = modifier == Modifier::Prohibited;
        let required = if default_and {
            !prohibited && conj != Conjunction::Or
        } else {
            modifier == Modifier::Required || (conj == Conjunction::And && !prohibited)
        };

        let occur = match (required, prohibited) {
            (true, false) => Occur::Must,
            (false, false) => Occur::Should,
            (false, true) => Occur::MustNot,
            (true, true) => {
                return Err(self.error("clause cannot be both required and prohibited"))
            }
        };
        clauses.push(Clause { occur, query });
        Ok(())
    }
}

fn lex(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        match c {
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            ':' => return Err(Error::parse(text, "':' without a field name")),
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | ':') {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                if chars.peek() == Some(&':') {
                    chars.next();
                    tokens.push(Token::Field(word));
                    continue;
                }
                tokens.push(match word.as_str() {
                    "AND" | "&&" => Token::And,
                    "OR" | "||" => Token::Or,
                    "NOT" => Token::Not,
                    _ => Token::Term(word),
                });
            }
        }
    }

    Ok(tokens)
}
