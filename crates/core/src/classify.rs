//! Tree classification
//!
//! Walks the outline tree once, breadth-first, and sorts every node into one
//! of three roles:
//!
//! - **Deck**: a node with children. Its path joins its parent's path and its
//!   own label with `::`.
//! - **Merged question-card**: a non-root node with children *and* images. It
//!   becomes the question side of a card whose answer is its first child. It
//!   records no deck path.
//! - **Leaf answer-card**: a childless node whose parent has neither an
//!   annotation nor images. Its label is the question and its annotation the
//!   answer.
//!
//! Both output lists are in level order, the order nodes leave the queue.

use std::collections::HashSet;

use serde::Serialize;

use crate::media::resolve_media_references;
use crate::outline::OutlineNode;
use crate::root::RootSelection;
use crate::text::join_text;

/// Separator between the segments of a deck path
pub const DECK_SEPARATOR: &str = "::";

/// A flashcard bound to a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub deck_path: String,
    pub front_text: String,
    pub back_text: String,
    pub front_images: Vec<String>,
    pub back_images: Vec<String>,
}

/// Deck paths in first-visit order, and the cards bound to them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecksAndCards {
    pub decks: Vec<String>,
    pub cards: Vec<Card>,
}

/// Insertion-ordered, duplicate-free list of deck paths
#[derive(Debug, Default)]
struct DeckList {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl DeckList {
    fn record(&mut self, path: &str) {
        if self.seen.insert(path.to_string()) {
            self.paths.push(path.to_string());
        }
    }
}

/// A node waiting in, or already taken from, the breadth-first queue
#[derive(Debug)]
struct TraversalEntry<'a> {
    node: &'a OutlineNode,
    /// Index of the parent entry in the arena
    parent: Option<usize>,
    /// Set once, when the node is classified as a deck
    deck_path: Option<String>,
}

/// Deck path recorded for the entry at `index`.
///
/// A parent that never became a deck contributes an empty path.
fn parent_path(entries: &[TraversalEntry<'_>], index: usize) -> String {
    entries[index].deck_path.clone().unwrap_or_default()
}

/// Classify the tree under `root`.
///
/// `prefix`, when present, is recorded as the first deck and the root's deck
/// path nests under it. Image payloads are resolved against `base_url`.
pub fn classify(root: &OutlineNode, prefix: Option<&str>, base_url: &str) -> DecksAndCards {
    let mut decks = DeckList::default();
    let mut cards = Vec::new();

    if let Some(prefix) = prefix {
        decks.record(prefix);
    }

    // The arena doubles as the queue: entries are appended in level order and
    // `cursor` points at the next one to dequeue.
    let mut entries = vec![TraversalEntry {
        node: root,
        parent: None,
        deck_path: None,
    }];
    let mut cursor = 0;

    while cursor < entries.len() {
        let current = cursor;
        cursor += 1;

        let node = entries[current].node;
        let parent = entries[current].parent;

        if !node.is_leaf() {
            match parent {
                None => {
                    let path = match prefix {
                        Some(prefix) => format!("{prefix}{DECK_SEPARATOR}{}", node.label),
                        None => node.label.clone(),
                    };
                    decks.record(&path);
                    entries[current].deck_path = Some(path);
                }
                Some(parent) if node.has_images() => {
                    let answer = &node.children[0];
                    cards.push(Card {
                        deck_path: parent_path(&entries, parent),
                        front_text: join_text(&node.label, &node.annotation),
                        back_text: join_text(&answer.label, &answer.annotation),
                        front_images: resolve_media_references(&node.image_payload, base_url),
                        back_images: resolve_media_references(&answer.image_payload, base_url),
                    });
                }
                Some(parent) => {
                    let path = format!(
                        "{}{DECK_SEPARATOR}{}",
                        parent_path(&entries, parent),
                        node.label
                    );
                    decks.record(&path);
                    entries[current].deck_path = Some(path);
                }
            }

            entries.extend(node.children.iter().map(|child| TraversalEntry {
                node: child,
                parent: Some(current),
                deck_path: None,
            }));
            continue;
        }

        let Some(parent) = parent else {
            log::warn!("Outline root {:?} has no children; nothing to import", node.label);
            continue;
        };

        // The parent already produced a merged card with this node as its answer.
        let parent_node = entries[parent].node;
        if parent_node.has_annotation() || parent_node.has_images() {
            continue;
        }

        cards.push(Card {
            deck_path: parent_path(&entries, parent),
            front_text: node.label.clone(),
            back_text: node.annotation.clone(),
            front_images: Vec::new(),
            back_images: resolve_media_references(&node.image_payload, base_url),
        });
    }

    DecksAndCards {
        decks: decks.paths,
        cards,
    }
}

/// Classify the subtree picked by [`crate::root::select_root`]
pub fn classify_selection(selection: &RootSelection, base_url: &str) -> DecksAndCards {
    classify(&selection.root, selection.prefix.as_deref(), base_url)
}
