//! Boolean tree compiler
//!
//! Folds an ordered clause list into a single query node. The fold is pure:
//! it allocates new nodes, never touches the clause list, and compiling the
//! same list twice yields identical DSL.

use crate::query::ast::QueryNode;
use crate::query::clause::{Clause, ClauseKind};
use crate::query::nodes::{BoolQuery, ExistsQuery, PhraseQuery, RangeQuery, TermQuery};
use crate::query::types::Connector;
use tracing::debug;

/// Compiles clause lists into query nodes
pub struct QueryCompiler;

impl QueryCompiler {
    /// Compile a clause list
    ///
    /// Returns `None` for an empty list, meaning the request should carry no
    /// query section at all (match everything).
    ///
    /// - A single clause whose connector is not `must_not` compiles to its
    ///   bare leaf.
    /// - `where(a).or_where(b)` (exactly two clauses, `must` then `should`)
    ///   is read as "a OR b": the first clause joins the `should` bucket.
    /// - Everything else becomes a bool query, each bucket keeping the
    ///   relative order of its clauses.
    pub fn compile(clauses: &[Clause]) -> Option<Box<dyn QueryNode>> {
        let mut leaves: Vec<(Connector, Box<dyn QueryNode>)> = clauses
            .iter()
            .filter_map(|clause| Self::compile_clause(clause).map(|node| (clause.connector, node)))
            .collect();

        if leaves.is_empty() {
            return None;
        }

        if leaves.len() == 1 && leaves[0].0 != Connector::MustNot {
            let (_, node) = leaves.remove(0);
            debug!(query_type = node.query_type(), "compiled single leaf");
            return Some(node);
        }

        // Only the two-clause chain is rewritten; longer mixed chains keep
        // their connectors as written.
        if leaves.len() == 2 && leaves[0].0 == Connector::Must && leaves[1].0 == Connector::Should {
            leaves[0].0 = Connector::Should;
        }

        let mut query = BoolQuery::new();
        for (connector, node) in leaves {
            query.push(connector, node);
        }

        debug!(
            must = query.must.len(),
            should = query.should.len(),
            must_not = query.must_not.len(),
            "compiled bool query"
        );
        Some(Box::new(query))
    }

    /// Resolve one clause into its leaf, or its compiled sub-group
    ///
    /// Only a nested clause with no children yields `None`.
    fn compile_clause(clause: &Clause) -> Option<Box<dyn QueryNode>> {
        let node: Box<dyn QueryNode> = match &clause.kind {
            ClauseKind::Term { field, value } => {
                Box::new(TermQuery::new(field.as_str(), value.clone()))
            }
            ClauseKind::Range { field, bounds } => {
                Box::new(RangeQuery::new(field.as_str()).with_bounds(bounds.clone()))
            }
            ClauseKind::MatchPhrase { field, value } => {
                Box::new(PhraseQuery::new(field.as_str(), value.clone()))
            }
            ClauseKind::Exists { field } => Box::new(ExistsQuery::new(field.as_str())),
            ClauseKind::Raw(query) => query.clone_box(),
            ClauseKind::Nested(children) => return Self::compile(children),
        };
        Some(node)
    }
}
