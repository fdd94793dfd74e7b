//! Bridges between `oxrdf` values and the owned graph model.

use std::io::{Read, Write};

use orkg_core::{Graph, Literal, Statement, Term};
use oxrdf::vocab::xsd;
use oxrdf::{BlankNode, NamedNode, Subject, Triple};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser, RdfSerializer};

use super::GraphError;

/// Namespace prefixes bound in the Turtle export.
pub const ORKG_PREFIXES: [(&str, &str); 4] = [
    ("orkgc", "http://orkg.org/orkg/class/"),
    ("orkgp", "http://orkg.org/orkg/predicate/"),
    ("orkgr", "http://orkg.org/orkg/resource/"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
];

/// Parse N-Triples from `reader` into a [`Graph`].
///
/// Parsing is strict: the first syntax error aborts with
/// [`GraphError::Parse`]. Repeated statements are collapsed.
///
/// # Examples
/// ```
/// use orkg_data::graph::parse_ntriples;
///
/// let text = "<http://example.org/s> <http://example.org/p> \"o\" .\n";
/// let graph = parse_ntriples(text.as_bytes())?;
/// assert_eq!(graph.len(), 1);
/// # Ok::<(), orkg_data::graph::GraphError>(())
/// ```
pub fn parse_ntriples<R: Read>(reader: R) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    for quad in RdfParser::from_format(RdfFormat::NTriples).for_reader(reader) {
        let quad = quad.map_err(|source| match source {
            RdfParseError::Io(source) => GraphError::ReadInput { source },
            RdfParseError::Syntax(source) => GraphError::Parse { source },
        })?;
        graph.insert(Statement::new(
            subject_term(quad.subject),
            Term::Iri(quad.predicate.into_string()),
            object_term(quad.object),
        ));
    }
    Ok(graph)
}

/// Serialise `graph` as Turtle with the [`ORKG_PREFIXES`] bound.
pub fn write_turtle<W: Write>(graph: &Graph, writer: W) -> Result<W, GraphError> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
    for (name, iri) in ORKG_PREFIXES {
        serializer = serializer
            .with_prefix(name, iri)
            .map_err(|source| GraphError::Prefix {
                prefix: name,
                source,
            })?;
    }
    let mut sink = serializer.for_writer(writer);
    for statement in graph {
        let triple = to_triple(statement)?;
        sink.serialize_triple(&triple)
            .map_err(|source| GraphError::WriteTurtle { source })?;
    }
    sink.finish()
        .map_err(|source| GraphError::WriteTurtle { source })
}

fn subject_term(subject: Subject) -> Term {
    match subject {
        Subject::NamedNode(node) => Term::Iri(node.into_string()),
        Subject::BlankNode(node) => Term::BlankNode(node.into_string()),
    }
}

fn object_term(object: oxrdf::Term) -> Term {
    match object {
        oxrdf::Term::NamedNode(node) => Term::Iri(node.into_string()),
        oxrdf::Term::BlankNode(node) => Term::BlankNode(node.into_string()),
        oxrdf::Term::Literal(literal) => {
            let value = literal.value().to_owned();
            let literal = if let Some(language) = literal.language() {
                Literal::language_tagged(value, language)
            } else if literal.datatype() == xsd::STRING {
                Literal::simple(value)
            } else {
                Literal::typed(value, literal.datatype().as_str())
            };
            Term::Literal(literal)
        }
    }
}

fn to_triple(statement: &Statement) -> Result<Triple, GraphError> {
    let subject: Subject = match &statement.subject {
        Term::Iri(iri) => NamedNode::new_unchecked(iri.as_str()).into(),
        Term::BlankNode(id) => BlankNode::new_unchecked(id.as_str()).into(),
        Term::Literal(_) => return Err(invalid(statement, "subject is a literal")),
    };
    let Term::Iri(predicate) = &statement.predicate else {
        return Err(invalid(statement, "predicate is not an IRI"));
    };
    let object: oxrdf::Term = match &statement.object {
        Term::Iri(iri) => NamedNode::new_unchecked(iri.as_str()).into(),
        Term::BlankNode(id) => BlankNode::new_unchecked(id.as_str()).into(),
        Term::Literal(literal) => to_literal(literal).into(),
    };
    Ok(Triple::new(
        subject,
        NamedNode::new_unchecked(predicate.as_str()),
        object,
    ))
}

fn to_literal(literal: &Literal) -> oxrdf::Literal {
    match (&literal.language, &literal.datatype) {
        (Some(language), _) => oxrdf::Literal::new_language_tagged_literal_unchecked(
            literal.value.as_str(),
            language.as_str(),
        ),
        (None, Some(datatype)) => oxrdf::Literal::new_typed_literal(
            literal.value.as_str(),
            NamedNode::new_unchecked(datatype.as_str()),
        ),
        (None, None) => oxrdf::Literal::new_simple_literal(literal.value.as_str()),
    }
}

fn invalid(statement: &Statement, reason: &'static str) -> GraphError {
    GraphError::InvalidStatement {
        subject: statement.subject.to_string(),
        reason,
    }
}
