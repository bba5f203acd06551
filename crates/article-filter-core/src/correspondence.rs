//! Keyed correspondence between list snapshots and the animated update.
//!
//! Items are matched across an update by their stable key (the element
//! `id` on the page). Matched items persist and only slide to their new
//! position; unmatched old items exit; unmatched new items enter in a
//! cascade, each one `stagger_ms` after the previous entering item.

use std::collections::HashMap;

use tracing::trace;

/// Layout box of an item relative to its list container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// One child of the list container at snapshot time.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSnapshot<E> {
    /// Stable identifier; `None` when the item carries none.
    pub key: Option<String>,
    pub element: E,
    pub bounds: Bounds,
}

/// A new item and the delay before its enter transition starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Entering<E> {
    pub element: E,
    /// Position in the new list.
    pub index: usize,
    pub delay_ms: u32,
}

/// A persisting item whose position changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Moved<E> {
    pub key: String,
    pub element: E,
    /// Old position minus new position.
    pub dx: f64,
    pub dy: f64,
}

/// Transitions to play for one update.
#[derive(Clone, Debug, PartialEq)]
pub struct Correspondence<E> {
    pub exits: Vec<ItemSnapshot<E>>,
    pub enters: Vec<Entering<E>>,
    pub moves: Vec<Moved<E>>,
    /// Keys present on both sides, moved or not.
    pub persisted: Vec<String>,
}

/// Match `before` against `after`.
///
/// Only the first occurrence of a duplicated key takes part in matching;
/// later duplicates and unkeyed items always enter or exit.
pub fn correspond<E: Clone>(
    before: &[ItemSnapshot<E>],
    after: &[ItemSnapshot<E>],
    stagger_ms: u32,
) -> Correspondence<E> {
    let before_by_key = first_by_key(before);
    let after_by_key = first_by_key(after);

    let exits = before
        .iter()
        .enumerate()
        .filter(|(index, item)| !is_matched(item, *index, &before_by_key, &after_by_key))
        .map(|(_, item)| item.clone())
        .collect();

    let mut enters = Vec::new();
    let mut moves = Vec::new();
    let mut persisted = Vec::new();

    for (index, item) in after.iter().enumerate() {
        if !is_matched(item, index, &after_by_key, &before_by_key) {
            // Counted among entering items only, so appended pages start at 0.
            let delay_ms = u32::try_from(enters.len())
                .unwrap_or(u32::MAX)
                .saturating_mul(stagger_ms);
            enters.push(Entering {
                element: item.element.clone(),
                index,
                delay_ms,
            });
            continue;
        }

        // Matched, so the key exists on both sides.
        let Some(key) = item.key.as_deref() else {
            continue;
        };
        let Some(&old_index) = before_by_key.get(key) else {
            continue;
        };
        let old = &before[old_index].bounds;
        let dx = old.left - item.bounds.left;
        let dy = old.top - item.bounds.top;
        if dx != 0.0 || dy != 0.0 {
            moves.push(Moved {
                key: key.to_string(),
                element: item.element.clone(),
                dx,
                dy,
            });
        }
        persisted.push(key.to_string());
    }

    Correspondence {
        exits,
        enters,
        moves,
        persisted,
    }
}

fn first_by_key<E>(items: &[ItemSnapshot<E>]) -> HashMap<&str, usize> {
    let mut seen = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        if let Some(key) = item.key.as_deref() {
            seen.entry(key).or_insert(index);
        }
    }
    seen
}

/// `item` at `index` is the canonical holder of its key on its own side and
/// the key exists on the other side.
fn is_matched<E>(
    item: &ItemSnapshot<E>,
    index: usize,
    own: &HashMap<&str, usize>,
    other: &HashMap<&str, usize>,
) -> bool {
    match item.key.as_deref() {
        Some(key) => own.get(key) == Some(&index) && other.contains_key(key),
        None => false,
    }
}

// ============================================================================
// Rendering seams
// ============================================================================

/// The list container being updated.
pub trait ListSurface {
    type Element: Clone;

    /// Current children in document order.
    fn snapshot(&self) -> Vec<ItemSnapshot<Self::Element>>;

    /// Replace all children with `html`.
    fn replace(&self, html: &str);

    /// Add `html` after the existing children.
    fn append(&self, html: &str);
}

/// Plays the visual part of a keyed update.
pub trait Transitioner {
    type Element;

    /// Fade and slide a new item in after `delay_ms`.
    fn enter(&self, element: &Self::Element, delay_ms: u32);

    /// Fade and slide a removed item out from where it was, then drop it.
    fn exit(&self, item: &ItemSnapshot<Self::Element>);

    /// Slide a persisting item from its old offset to its new position.
    fn reposition(&self, element: &Self::Element, dx: f64, dy: f64);
}

/// Counts of transitions started by [`render_animated`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationReport {
    pub entered: usize,
    pub exited: usize,
    pub moved: usize,
    pub persisted: usize,
}

/// Swap the list markup and animate the difference.
pub fn render_animated<S, T>(
    surface: &S,
    transitioner: &T,
    html: &str,
    append: bool,
    stagger_ms: u32,
) -> AnimationReport
where
    S: ListSurface,
    T: Transitioner<Element = S::Element>,
{
    let before = surface.snapshot();
    if append {
        surface.append(html);
    } else {
        surface.replace(html);
    }
    let after = surface.snapshot();

    let plan = correspond(&before, &after, stagger_ms);
    for item in &plan.exits {
        transitioner.exit(item);
    }
    for moved in &plan.moves {
        transitioner.reposition(&moved.element, moved.dx, moved.dy);
    }
    for entering in &plan.enters {
        transitioner.enter(&entering.element, entering.delay_ms);
    }

    let report = AnimationReport {
        entered: plan.enters.len(),
        exited: plan.exits.len(),
        moved: plan.moves.len(),
        persisted: plan.persisted.len(),
    };
    trace!(?report, "list transitions started");
    report
}
