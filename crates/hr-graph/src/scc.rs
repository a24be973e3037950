//! Strongly connected components and one-way segment classification.
//!
//! Used to find traffic circulation groups: two vertices share a component
//! iff each can be driven to from the other.  One-way restrictions are
//! applied first with [`prune_one_way`].

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use hr_core::VertexId;

use crate::graph::Graph;

// ── Components ────────────────────────────────────────────────────────────────

/// Partition of a graph's vertices into strongly connected components.
///
/// Components are numbered `0..count()` in order of first discovery: the
/// component holding the smallest vertex id is 0, the one holding the
/// smallest id not yet numbered is 1, and so on.  The numbering depends
/// only on the partition, so it is reproducible for a given graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    component_of: FxHashMap<VertexId, usize>,
    groups:       Vec<Vec<VertexId>>,
}

impl Components {
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    pub fn component_of(&self, vertex: VertexId) -> Option<usize> {
        self.component_of.get(&vertex).copied()
    }

    pub fn same_component(&self, a: VertexId, b: VertexId) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Members of each component, ascending by id within a group.
    pub fn groups(&self) -> &[Vec<VertexId>] {
        &self.groups
    }
}

/// Tarjan's algorithm, iterative so deep chains cannot overflow the stack.
///
/// Only traversable edges count as connections.
pub fn strongly_connected_components<V, E>(graph: &Graph<V, E>) -> Components {
    let mut index_of: FxHashMap<VertexId, usize> = FxHashMap::default();
    let mut lowlink: FxHashMap<VertexId, usize> = FxHashMap::default();
    let mut on_stack: FxHashSet<VertexId> = FxHashSet::default();
    let mut stack: Vec<VertexId> = Vec::new();
    let mut next_index = 0usize;

    let mut out = Components::default();

    for root in graph.vertex_ids() {
        if index_of.contains_key(&root) {
            continue;
        }

        // (vertex, position in its adjacency list)
        let mut call: Vec<(VertexId, usize)> = vec![(root, 0)];
        index_of.insert(root, next_index);
        lowlink.insert(root, next_index);
        next_index += 1;
        stack.push(root);
        on_stack.insert(root);

        while let Some(frame) = call.last_mut() {
            let v = frame.0;
            let edges = graph.out_edges(v);

            if frame.1 < edges.len() {
                let edge = &edges[frame.1];
                frame.1 += 1;
                if !edge.is_traversable() {
                    continue;
                }
                let w = edge.end;
                match index_of.get(&w).copied() {
                    None => {
                        index_of.insert(w, next_index);
                        lowlink.insert(w, next_index);
                        next_index += 1;
                        stack.push(w);
                        on_stack.insert(w);
                        call.push((w, 0));
                    }
                    Some(w_index) if on_stack.contains(&w) => {
                        let low = lowlink.entry(v).or_insert(w_index);
                        *low = (*low).min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All successors done: propagate the low-link and maybe emit.
            call.pop();
            let v_low = lowlink[&v];
            if let Some(&(parent, _)) = call.last() {
                let low = lowlink.entry(parent).or_insert(v_low);
                *low = (*low).min(v_low);
            }

            if v_low == index_of[&v] {
                let number = out.groups.len();
                let mut group = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack.remove(&w);
                    out.component_of.insert(w, number);
                    group.push(w);
                    if w == v {
                        break;
                    }
                }
                group.sort_unstable();
                out.groups.push(group);
            }
        }
    }

    let out = renumber_by_discovery(graph, out);
    debug!(
        "{} strongly connected components over {} vertices",
        out.count(),
        graph.vertex_count(),
    );
    out
}

/// Relabel components in ascending order of their smallest vertex id.
fn renumber_by_discovery<V, E>(graph: &Graph<V, E>, raw: Components) -> Components {
    let mut remap: FxHashMap<usize, usize> = FxHashMap::default();
    for id in graph.vertex_ids() {
        if let Some(old) = raw.component_of(id) {
            let next = remap.len();
            remap.entry(old).or_insert(next);
        }
    }

    let mut groups = vec![Vec::new(); raw.groups.len()];
    for (old, group) in raw.groups.into_iter().enumerate() {
        if let Some(&new) = remap.get(&old) {
            groups[new] = group;
        }
    }
    let component_of = raw
        .component_of
        .into_iter()
        .filter_map(|(v, old)| remap.get(&old).map(|&new| (v, new)))
        .collect();
    Components { component_of, groups }
}

// ── One-way pruning ───────────────────────────────────────────────────────────

/// Copy of `graph` with travel restricted to the given directions.
///
/// Each `(from, to)` pair declares the segment between the two vertices
/// one-way in that direction; the `to → from` edge is dropped.  Pairs with
/// no matching edge are ignored.
pub fn prune_one_way<V: Clone, E: Clone>(
    graph: &Graph<V, E>,
    one_way: impl IntoIterator<Item = (VertexId, VertexId)>,
) -> Graph<V, E> {
    let mut pruned = graph.copy();
    for (from, to) in one_way {
        pruned.remove_edge(to, from);
    }
    pruned
}

/// Components of `graph` after applying the one-way restrictions.
pub fn circulation_groups<V: Clone, E: Clone>(
    graph: &Graph<V, E>,
    one_way: impl IntoIterator<Item = (VertexId, VertexId)>,
) -> Components {
    strongly_connected_components(&prune_one_way(graph, one_way))
}

// ── Segment classification ────────────────────────────────────────────────────

/// How a road segment between two vertices can be driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentClass {
    /// Traversable edges exist in both directions.
    Bidirectional,
    /// One direction only, but both ends circulate within one component.
    OneWayLoop,
    /// One direction only and there is no way back.
    OneWayDeadEnd,
}

/// An undirected vertex pair with `a < b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub a:     VertexId,
    pub b:     VertexId,
    pub class: SegmentClass,
}

/// Classify every vertex pair joined by at least one traversable edge,
/// sorted by `(a, b)`.  Self-loops are ignored.
pub fn classify_segments<V, E>(graph: &Graph<V, E>, components: &Components) -> Vec<Segment> {
    let mut seen = FxHashSet::default();
    let mut segments = Vec::new();

    for edge in graph.edges().filter(|e| e.is_traversable()) {
        if edge.start == edge.end {
            continue;
        }
        let (a, b) = if edge.start < edge.end {
            (edge.start, edge.end)
        } else {
            (edge.end, edge.start)
        };
        if !seen.insert((a, b)) {
            continue;
        }
        let both = graph.reverse_edge(edge).is_some_and(|r| r.is_traversable());
        let class = if both {
            SegmentClass::Bidirectional
        } else if components.same_component(a, b) {
            SegmentClass::OneWayLoop
        } else {
            SegmentClass::OneWayDeadEnd
        };
        segments.push(Segment { a, b, class });
    }

    segments.sort_unstable_by_key(|s| (s.a, s.b));
    segments
}
