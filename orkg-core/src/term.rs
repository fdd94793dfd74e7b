//! RDF terms and statements.
//!
//! Terms are owned, serialisable mirrors of the values produced by the RDF
//! parser, free of parser-specific types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value with its optional datatype IRI and language tag.
///
/// Simple literals (`xsd:string`) and language-tagged literals carry no
/// datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form of the literal.
    pub value: String,
    /// Datatype IRI for typed literals other than `xsd:string`.
    pub datatype: Option<String>,
    /// BCP 47 language tag for language-tagged literals.
    pub language: Option<String>,
}

impl Literal {
    /// Construct a simple literal.
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Construct a literal typed with `datatype`.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Construct a language-tagged literal.
    pub fn language_tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

/// A node in an RDF statement.
///
/// # Examples
/// ```
/// use orkg_core::Term;
///
/// let resource = Term::iri("http://orkg.org/orkg/resource/R1");
/// let label = Term::simple_literal("Knowledge graphs");
/// assert!(resource.is_identifier());
/// assert!(label.is_literal());
/// assert_eq!(resource.to_string(), "http://orkg.org/orkg/resource/R1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// An absolute IRI.
    Iri(String),
    /// A blank node, identified by its label without the `_:` prefix.
    BlankNode(String),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Construct an IRI term.
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    /// Construct a blank node term.
    pub fn blank_node(id: impl Into<String>) -> Self {
        Self::BlankNode(id.into())
    }

    /// Construct a simple literal term.
    pub fn simple_literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal::simple(value))
    }

    /// Report whether the term is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Report whether the term identifies a node (IRI or blank node).
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        !self.is_literal()
    }
}

/// Plain-text rendering used by the edge export: IRIs without angle
/// brackets, blank nodes by bare label and literals by lexical form.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(value) | Self::BlankNode(value) => f.write_str(value),
            Self::Literal(literal) => f.write_str(&literal.value),
        }
    }
}

/// A subject-predicate-object triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// IRI or blank node the statement is about.
    pub subject: Term,
    /// Property IRI.
    pub predicate: Term,
    /// Value of the property; any term.
    pub object: Term,
}

impl Statement {
    /// Construct a statement from its three components.
    pub const fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Report whether the object identifies a node, making the statement an
    /// edge rather than a literal attribute.
    #[must_use]
    pub const fn is_edge(&self) -> bool {
        self.object.is_identifier()
    }
}
