//! Pull doc comments out of a syntax tree, one record per block.
//!
//! Blocks attached to a node come first, in pre-order; blocks with no code
//! after them follow, by position. A block reachable both ways is read
//! once.

use crate::infer::finders::find_target;
use crate::model::{Comment, Context};
use crate::parser;
use crate::syntax::raw::DocBlock;
use crate::syntax::{AstRef, MethodKind, NodeId, NodeKind, SyntaxTree};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Tags that belong on a constructor comment; anything else there is
/// probably meant for the class.
const CONSTRUCTOR_TAGS: [&str; 4] = ["param", "arg", "argument", "hideconstructor"];

/// Every doc comment of one source unit. `unit` orders records across
/// units.
pub fn extract(tree: &Arc<SyntaxTree>, unit: usize) -> Vec<Comment> {
    let mut seen = HashSet::new();
    let mut records: Vec<(Option<NodeId>, Comment)> = Vec::new();

    for node in tree.preorder() {
        for &index in &tree.node(node).leading {
            let block = &tree.doc_blocks[index];
            if !block.is_doc_comment() || !seen.insert(block.key()) {
                continue;
            }
            let mut comment = read(tree, block, unit);
            if let Some(loc) = tree.node(node).loc {
                comment.context.loc = loc;
            }
            comment.context.ast = Some(AstRef {
                tree: Arc::clone(tree),
                node,
            });
            records.push((Some(node), comment));
        }
    }

    let mut detached: Vec<&DocBlock> = tree.detached.iter().map(|&i| &tree.doc_blocks[i]).collect();
    detached.sort_by_key(|block| block.key());
    for block in detached {
        if !block.is_doc_comment() || !seen.insert(block.key()) {
            continue;
        }
        records.push((None, read(tree, block, unit)));
    }

    let records = fold_constructors(tree, records);
    records
        .into_iter()
        .filter(|comment| comment.lends.is_none())
        .collect()
}

fn read(tree: &SyntaxTree, block: &DocBlock, unit: usize) -> Comment {
    let mut comment = parser::normalize(&block.tags, &block.description, block.loc);
    comment.context = Context {
        file: tree.file.clone(),
        loc: block.loc,
        sort_key: (unit, block.loc.start.line, block.loc.start.column),
        ast: None,
    };
    comment
}

/// Move comments written on a class constructor into the class's own
/// record as `constructor_comment`.
fn fold_constructors(tree: &SyntaxTree, records: Vec<(Option<NodeId>, Comment)>) -> Vec<Comment> {
    let mut by_target: HashMap<NodeId, usize> = HashMap::new();
    let mut out: Vec<Comment> = Vec::with_capacity(records.len());

    for (node, comment) in records {
        let Some(node) = node else {
            out.push(comment);
            continue;
        };
        if let Some(class) = constructor_of(tree, node) {
            if comment.tags.iter().any(|t| !CONSTRUCTOR_TAGS.contains(&t.title.as_str())) {
                debug!(
                    file = %tree.file,
                    line = comment.loc.start.line,
                    "constructor documented separately from its class"
                );
            }
            if let Some(&owner) = by_target.get(&class) {
                out[owner].constructor_comment = Some(Box::new(comment));
                continue;
            }
            if comment.hideconstructor {
                continue;
            }
        }
        let target = find_target(tree, node).unwrap_or(node);
        by_target.insert(target, out.len());
        out.push(comment);
    }
    out
}

/// The class whose constructor `node` is.
fn constructor_of(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    if !matches!(
        tree.kind(node),
        NodeKind::ClassMethod {
            kind: MethodKind::Constructor,
            ..
        }
    ) {
        return None;
    }
    let class = tree.parent(tree.parent(node)?)?;
    matches!(tree.kind(class), NodeKind::Class { .. }).then_some(class)
}
