//! Traversal root selection
//!
//! An OPML export does not say whether it holds the whole mind map or a single
//! branch. The only signal is whether the document title equals the label of
//! the first top-level outline node:
//!
//! | specific path | title == root label | root         | seeded prefix   |
//! |---------------|---------------------|--------------|-----------------|
//! | empty         | yes                 | outline root | none            |
//! | empty         | no                  | body         | none            |
//! | non-empty     | no                  | body         | none            |
//! | non-empty     | yes                 | outline root | specific path   |
//!
//! When the body is chosen its label is set to the document title so it forms
//! the top of every deck path.

use crate::outline::{OutlineDocument, OutlineNode, StructureError};

/// Which node the traversal starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootChoice {
    /// Start at the first top-level outline, nesting under `prefix` when set
    OutlineRoot { prefix: Option<String> },
    /// Start at the document body, labelled with the document title
    Body,
}

/// The traversal root together with the deck-path prefix to seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSelection {
    pub root: OutlineNode,
    pub prefix: Option<String>,
}

/// Decide the traversal root from the title, the outline root's label, and
/// the user's sub-path (empty means not specified).
pub fn choose_root(title: &str, outline_root_label: &str, specific_path: &str) -> RootChoice {
    let partial_export = title == outline_root_label;

    match (specific_path.is_empty(), partial_export) {
        (true, true) => RootChoice::OutlineRoot { prefix: None },
        (false, true) => RootChoice::OutlineRoot {
            prefix: Some(specific_path.to_string()),
        },
        (_, false) => RootChoice::Body,
    }
}

/// Select the traversal root of a parsed document.
///
/// Consumes the document, since the chosen subtree is all the classifier
/// needs. Fails when the body or its first outline node is missing.
pub fn select_root(
    document: OutlineDocument,
    specific_path: &str,
) -> Result<RootSelection, StructureError> {
    let OutlineDocument { title, body } = document;
    let mut body = body.ok_or(StructureError::MissingNode("body"))?;
    let outline_root_label = body
        .children
        .first()
        .map(|node| node.label.clone())
        .ok_or(StructureError::MissingNode("outline"))?;

    log::debug!("Document title {title:?}, outline root {outline_root_label:?}");

    match choose_root(&title, &outline_root_label, specific_path) {
        RootChoice::OutlineRoot { prefix } => {
            let root = body.children.swap_remove(0);
            Ok(RootSelection { root, prefix })
        }
        RootChoice::Body => {
            if !specific_path.is_empty() {
                log::info!(
                    "Export holds the whole document; ignoring specific path {specific_path:?}"
                );
            }
            body.label = title;
            Ok(RootSelection { root: body, prefix: None })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(title: &str, top_labels: &[&str]) -> OutlineDocument {
        let children = top_labels
            .iter()
            .map(|label| OutlineNode::new(*label).with_children(vec![OutlineNode::new("leaf")]))
            .collect();
        OutlineDocument {
            title: title.to_string(),
            body: Some(OutlineNode::default().with_children(children)),
        }
    }

    // ============================================================================
    // choose_root tests
    // ============================================================================

    #[test]
    fn test_choose_root_no_path_partial_export() {
        assert_eq!(
            choose_root("Root", "Root", ""),
            RootChoice::OutlineRoot { prefix: None }
        );
    }

    #[test]
    fn test_choose_root_no_path_full_export() {
        assert_eq!(choose_root("Doc", "Root", ""), RootChoice::Body);
    }

    #[test]
    fn test_choose_root_path_with_full_export_ignores_path() {
        assert_eq!(choose_root("Doc", "Root", "MyPath"), RootChoice::Body);
    }

    #[test]
    fn test_choose_root_path_with_partial_export_seeds_prefix() {
        assert_eq!(
            choose_root("Root", "Root", "MyPath"),
            RootChoice::OutlineRoot {
                prefix: Some("MyPath".to_string())
            }
        );
    }

    // ============================================================================
    // select_root tests
    // ============================================================================

    #[test]
    fn test_select_root_partial_export_uses_outline_root() {
        let selection = select_root(document("Root", &["Root"]), "").unwrap();
        assert_eq!(selection.root.label, "Root");
        assert_eq!(selection.prefix, None);
    }

    #[test]
    fn test_select_root_full_export_labels_body_with_title() {
        let selection = select_root(document("My Map", &["A", "B"]), "").unwrap();
        assert_eq!(selection.root.label, "My Map");
        assert_eq!(selection.root.children.len(), 2);
        assert_eq!(selection.prefix, None);
    }

    #[test]
    fn test_select_root_specific_path_seeds_deck_list() {
        let selection = select_root(document("Root", &["Root"]), "MyPath").unwrap();
        assert_eq!(selection.root.label, "Root");
        assert_eq!(selection.prefix.as_deref(), Some("MyPath"));
    }

    #[test]
    fn test_select_root_specific_path_on_full_export() {
        let selection = select_root(document("My Map", &["A"]), "MyPath").unwrap();
        assert_eq!(selection.root.label, "My Map");
        assert_eq!(selection.prefix, None);
    }

    #[test]
    fn test_select_root_missing_body() {
        let doc = OutlineDocument {
            title: "T".to_string(),
            body: None,
        };
        assert_eq!(select_root(doc, ""), Err(StructureError::MissingNode("body")));
    }

    #[test]
    fn test_select_root_missing_outline() {
        let doc = OutlineDocument {
            title: "T".to_string(),
            body: Some(OutlineNode::default()),
        };
        assert_eq!(
            select_root(doc, ""),
            Err(StructureError::MissingNode("outline"))
        );
    }
}
