//! Structured queries.
//!
//! A [`Query`] is a tree of term queries combined with AND and OR. Every
//! variant is evaluated by a dedicated function in the
//! [`IndexSearcher`](crate::lexical::search::searcher::IndexSearcher).
//!
//! ```
//! use kopis::lexical::query::{Query, TermQuery};
//!
//! let query = Query::and(vec![
//!     Query::term("keyword", "heavy"),
//!     Query::term("keyword", "item"),
//! ]);
//! assert_eq!(query.to_string(), "(keyword:heavy AND keyword:item)");
//! assert_eq!(query.terms(), vec![&TermQuery::new("keyword", "heavy"), &TermQuery::new("keyword", "item")]);
//! ```

pub mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Match documents whose field contains a term.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermQuery {
    /// The field to search.
    pub field: String,
    /// The analyzed term.
    pub term: String,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        TermQuery {
            field: field.into(),
            term: term.into(),
        }
    }
}

/// Match documents matched by every clause. No clauses match nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndQuery {
    /// The clauses.
    pub clauses: Vec<Query>,
}

/// Match documents matched by at least one clause. No clauses match nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrQuery {
    /// The clauses.
    pub clauses: Vec<Query>,
}

/// A structured query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// A single term.
    Term(TermQuery),
    /// Conjunction.
    And(AndQuery),
    /// Disjunction.
    Or(OrQuery),
}

impl Query {
    /// Create a term query.
    pub fn term<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        Query::Term(TermQuery::new(field, term))
    }

    /// Create a conjunction.
    pub fn and(clauses: Vec<Query>) -> Self {
        Query::And(AndQuery { clauses })
    }

    /// Create a disjunction.
    pub fn or(clauses: Vec<Query>) -> Self {
        Query::Or(OrQuery { clauses })
    }

    /// A query that matches no document.
    pub fn match_none() -> Self {
        Query::or(Vec::new())
    }

    /// Whether this query can never match, regardless of the index.
    pub fn is_match_none(&self) -> bool {
        match self {
            Query::Term(_) => false,
            Query::And(and) => and.clauses.is_empty() || and.clauses.iter().any(Query::is_match_none),
            Query::Or(or) => or.clauses.iter().all(Query::is_match_none),
        }
    }

    /// All term queries in this tree, left to right.
    pub fn terms(&self) -> Vec<&TermQuery> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a TermQuery>) {
        match self {
            Query::Term(term) => terms.push(term),
            Query::And(AndQuery { clauses }) | Query::Or(OrQuery { clauses }) => {
                for clause in clauses {
                    clause.collect_terms(terms);
                }
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (clauses, op) = match self {
            Query::Term(TermQuery { field, term }) => return write!(f, "{field}:{term}"),
            Query::And(and) => (&and.clauses, " AND "),
            Query::Or(or) => (&or.clauses, " OR "),
        };

        if clauses.is_empty() {
            return write!(f, "<none>");
        }

        write!(f, "(")?;
        for (i, clause) in clauses.iter().enumerate() {
            if i > 0 {
                write!(f, "{op}")?;
            }
            write!(f, "{clause}")?;
        }
        write!(f, ")")
    }
}
