//! Query parser for converting query strings into [`Query`] trees.
//!
//! Supported syntax:
//! - Words separated by whitespace: `heavy item`
//! - Explicit operators between words: `heavy AND item`, `map OR clothes`
//!
//! Each word is analyzed with the index analyzer, so query words are
//! normalized exactly like indexed text. Adjacent words without an operator
//! are joined by the default operator: OR (match any word) unless the parser
//! is configured with `all_required`, in which case AND. AND binds tighter
//! than OR. Operators must be upper case; lower-case `and`/`or` are ordinary
//! words.
//!
//! Words that analyze to nothing (stop words, punctuation) are dropped. A
//! word that analyzes to several terms (`e-mail`) joins them with the
//! default operator.
//!
//! Keyword (untokenized) fields are matched exactly: the words between two
//! operators, joined by single spaces, form one term that is not analyzed.
//! `Map out OR Clothes` on such a field looks for the values `Map out` and
//! `Clothes`.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//!
//! use kopis::analysis::analyzer::standard::StandardAnalyzer;
//! use kopis::lexical::query::parser::QueryParser;
//!
//! let fields: BTreeSet<String> = ["keyword".to_string()].into();
//! let parser = QueryParser::new(Arc::new(StandardAnalyzer::new().unwrap()), fields);
//!
//! let query = parser.parse("Map out AND Heavy", "keyword").unwrap();
//! assert_eq!(query.to_string(), "(keyword:map OR (keyword:out AND keyword:heavy))");
//! ```

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::error::{KopisError, Result};
use crate::lexical::query::Query;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

#[derive(Debug, PartialEq, Eq)]
enum QueryToken<'a> {
    Word(Cow<'a, str>),
    Op(Operator),
}

fn lex(query_str: &str) -> Vec<QueryToken<'_>> {
    query_str
        .split_whitespace()
        .map(|word| match word {
            "AND" => QueryToken::Op(Operator::And),
            "OR" => QueryToken::Op(Operator::Or),
            _ => QueryToken::Word(Cow::Borrowed(word)),
        })
        .collect()
}

/// Merge runs of adjacent words into one space-separated word.
fn join_words(tokens: Vec<QueryToken<'_>>) -> Vec<QueryToken<'_>> {
    let mut joined: Vec<QueryToken<'_>> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let QueryToken::Word(word) = &token {
            if let Some(QueryToken::Word(prev)) = joined.last_mut() {
                let prev = prev.to_mut();
                prev.push(' ');
                prev.push_str(word);
                continue;
            }
        }
        joined.push(token);
    }
    joined
}

/// Parses query strings against a default field.
#[derive(Clone)]
pub struct QueryParser {
    analyzer: Arc<dyn Analyzer>,
    indexed_fields: BTreeSet<String>,
    keyword_fields: BTreeSet<String>,
    all_required: bool,
}

impl QueryParser {
    /// Create a parser that accepts the given indexed fields as default
    /// field, with OR as default operator.
    pub fn new(analyzer: Arc<dyn Analyzer>, indexed_fields: BTreeSet<String>) -> Self {
        QueryParser {
            analyzer,
            indexed_fields,
            keyword_fields: BTreeSet::new(),
            all_required: false,
        }
    }

    /// Fields that are indexed untokenized and matched exactly.
    pub fn with_keyword_fields(mut self, keyword_fields: BTreeSet<String>) -> Self {
        self.keyword_fields = keyword_fields;
        self
    }

    /// Use AND instead of OR as default operator.
    pub fn with_all_required(mut self, all_required: bool) -> Self {
        self.all_required = all_required;
        self
    }

    /// Whether AND is the default operator.
    pub fn all_required(&self) -> bool {
        self.all_required
    }

    /// Parse a query string into a [`Query`] on `default_field`.
    ///
    /// Fails with `EmptyQuery` on blank input, and with `InvalidArgument`
    /// when `default_field` is not an indexed field or an operator lacks an
    /// operand.
    pub fn parse(&self, query_str: &str, default_field: &str) -> Result<Query> {
        let tokens = lex(query_str);
        if tokens.is_empty() {
            return Err(KopisError::EmptyQuery);
        }
        let exact = self.keyword_fields.contains(default_field);
        if !exact && !self.indexed_fields.contains(default_field) {
            return Err(KopisError::invalid_argument(format!(
                "field '{default_field}' is not an indexed field"
            )));
        }
        validate(&tokens, query_str)?;
        let tokens = if exact { join_words(tokens) } else { tokens };

        // Each group is a conjunction; groups are joined by OR.
        let mut groups: Vec<Vec<Query>> = vec![Vec::new()];
        let mut connector = None;

        for token in tokens {
            match token {
                QueryToken::Op(op) => connector = Some(op),
                QueryToken::Word(word) => {
                    let op = connector.take().unwrap_or(self.default_operator());
                    if op == Operator::Or {
                        groups.push(Vec::new());
                    }
                    if let Some(clause) = self.word_query(&word, default_field, exact)? {
                        if let Some(group) = groups.last_mut() {
                            group.push(clause);
                        }
                    }
                }
            }
        }

        let mut disjuncts: Vec<Query> = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|mut group| {
                if group.len() == 1 {
                    group.remove(0)
                } else {
                    Query::and(group)
                }
            })
            .collect();

        Ok(match disjuncts.len() {
            0 => Query::match_none(),
            1 => disjuncts.remove(0),
            _ => Query::or(disjuncts),
        })
    }

    fn default_operator(&self) -> Operator {
        if self.all_required {
            Operator::And
        } else {
            Operator::Or
        }
    }

    fn word_query(&self, word: &str, field: &str, exact: bool) -> Result<Option<Query>> {
        if exact {
            return Ok(Some(Query::term(field, word)));
        }

        let mut clauses: Vec<Query> = self
            .analyzer
            .terms(word)?
            .into_iter()
            .map(|term| Query::term(field, term))
            .collect();

        Ok(match clauses.len() {
            0 => None,
            1 => Some(clauses.remove(0)),
            _ => Some(match self.default_operator() {
                Operator::And => Query::and(clauses),
                Operator::Or => Query::or(clauses),
            }),
        })
    }
}

fn validate(tokens: &[QueryToken<'_>], query_str: &str) -> Result<()> {
    let dangling = || {
        KopisError::invalid_argument(format!("operator without operand in query '{query_str}'"))
    };

    if matches!(tokens.first(), Some(QueryToken::Op(_)))
        || matches!(tokens.last(), Some(QueryToken::Op(_)))
    {
        return Err(dangling());
    }
    if tokens
        .windows(2)
        .any(|pair| matches!(pair, [QueryToken::Op(_), QueryToken::Op(_)]))
    {
        return Err(dangling());
    }
    Ok(())
}

impl std::fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParser")
            .field("analyzer", &self.analyzer.name())
            .field("indexed_fields", &self.indexed_fields)
            .field("keyword_fields", &self.keyword_fields)
            .field("all_required", &self.all_required)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::standard::StandardAnalyzer;

    fn parser(all_required: bool) -> QueryParser {
        let analyzer = StandardAnalyzer::with_stop_words(["the", "to"]).unwrap();
        let fields: BTreeSet<String> = ["keyword", "title"].iter().map(|s| s.to_string()).collect();
        let keyword_fields: BTreeSet<String> = ["tag".to_string()].into();
        QueryParser::new(Arc::new(analyzer), fields)
            .with_keyword_fields(keyword_fields)
            .with_all_required(all_required)
    }

    #[test]
    fn test_single_term() {
        let query = parser(false).parse("Heavy", "keyword").unwrap();
        assert_eq!(query, Query::term("keyword", "heavy"));
    }

    #[test]
    fn test_default_or() {
        let query = parser(false).parse("heavy  item", "keyword").unwrap();
        assert_eq!(
            query,
            Query::or(vec![Query::term("keyword", "heavy"), Query::term("keyword", "item")])
        );
    }

    #[test]
    fn test_all_required() {
        let query = parser(true).parse("heavy item", "title").unwrap();
        assert_eq!(
            query,
            Query::and(vec![Query::term("title", "heavy"), Query::term("title", "item")])
        );
    }

    #[test]
    fn test_explicit_operators() {
        let query = parser(false).parse("map AND out OR clothes", "keyword").unwrap();
        assert_eq!(query.to_string(), "((keyword:map AND keyword:out) OR keyword:clothes)");

        let query = parser(true).parse("map OR out clothes", "keyword").unwrap();
        assert_eq!(query.to_string(), "(keyword:map OR (keyword:out AND keyword:clothes))");
    }

    #[test]
    fn test_lowercase_operators_are_words() {
        let query = parser(false).parse("map and out", "keyword").unwrap();
        assert_eq!(query.terms().len(), 3);
    }

    #[test]
    fn test_multi_term_word() {
        let query = parser(false).parse("e-mail", "keyword").unwrap();
        assert_eq!(query.to_string(), "(keyword:e OR keyword:mail)");

        let query = parser(true).parse("e-mail", "keyword").unwrap();
        assert_eq!(query.to_string(), "(keyword:e AND keyword:mail)");
    }

    #[test]
    fn test_stop_words_are_dropped() {
        let query = parser(false).parse("the heavy", "keyword").unwrap();
        assert_eq!(query, Query::term("keyword", "heavy"));

        let query = parser(false).parse("heavy OR the", "keyword").unwrap();
        assert_eq!(query, Query::term("keyword", "heavy"));

        let query = parser(false).parse("the to ,", "keyword").unwrap();
        assert!(query.is_match_none());
    }

    #[test]
    fn test_keyword_field_is_exact() {
        let query = parser(false).parse("Map   out", "tag").unwrap();
        assert_eq!(query, Query::term("tag", "Map out"));

        // Stop words and case are kept, operators still apply.
        let query = parser(true).parse("The Map OR Clothes AND e-mail", "tag").unwrap();
        assert_eq!(
            query,
            Query::or(vec![
                Query::term("tag", "The Map"),
                Query::and(vec![Query::term("tag", "Clothes"), Query::term("tag", "e-mail")]),
            ])
        );

        assert!(matches!(
            parser(false).parse("Map OR", "tag"),
            Err(KopisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_query() {
        assert!(matches!(parser(false).parse("", "keyword"), Err(KopisError::EmptyQuery)));
        assert!(matches!(parser(false).parse(" \t\n", "keyword"), Err(KopisError::EmptyQuery)));
    }

    #[test]
    fn test_unknown_field() {
        let result = parser(false).parse("heavy", "article");
        assert!(matches!(result, Err(KopisError::InvalidArgument(_))));
    }

    #[test]
    fn test_dangling_operators() {
        for query_str in ["AND heavy", "heavy OR", "heavy AND OR item", "OR"] {
            let result = parser(false).parse(query_str, "keyword");
            assert!(
                matches!(result, Err(KopisError::InvalidArgument(_))),
                "expected error for {query_str:?}"
            );
        }
    }
}
