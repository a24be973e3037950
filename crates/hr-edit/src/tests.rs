//! Unit tests for hr-edit.

#[cfg(test)]
mod helpers {
    use hr_core::{LatLng, VertexId};
    use hr_graph::Graph;

    pub type TestGraph = Graph<(), ()>;

    /// Route `log` output through the test harness; safe to call repeatedly.
    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// ~111 m between consecutive points along the equator.
    pub fn east(i: usize) -> LatLng {
        LatLng::new(0.0, i as f64 * 0.001)
    }

    pub fn road(g: &mut TestGraph, a: VertexId, b: VertexId) {
        let d = g.position(a).unwrap().distance_m(g.position(b).unwrap());
        g.add_edge(a, b, d, ()).unwrap();
        g.add_edge(b, a, d, ()).unwrap();
    }
}

// ── SnapSettings ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod settings {
    use crate::{EditError, SnapSettings};

    #[test]
    fn default_tolerance_is_about_24_m() {
        let s = SnapSettings::default();
        assert_eq!(s.zoom_level, 16.0);
        assert_eq!(s.snap_distance_px, 10.0);
        assert!((s.tolerance_m() - 23.887).abs() < 1e-2, "{}", s.tolerance_m());
    }

    #[test]
    fn tolerance_halves_per_zoom_level() {
        let near = SnapSettings::new(17.0, 10.0).tolerance_m();
        let far = SnapSettings::new(16.0, 10.0).tolerance_m();
        assert!((far / near - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_values() {
        for s in [
            SnapSettings::new(f64::NAN, 10.0),
            SnapSettings::new(-1.0, 10.0),
            SnapSettings::new(16.0, -3.0),
            SnapSettings::new(16.0, f64::INFINITY),
        ] {
            assert!(matches!(s.validate(), Err(EditError::InvalidSettings(_))), "{s:?}");
        }
        assert!(SnapSettings::new(0.0, 0.0).validate().is_ok());
    }
}

// ── SnapIndex ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use hr_core::LatLng;

    use super::helpers::*;
    use crate::SnapIndex;

    #[test]
    fn empty_index_snaps_nothing() {
        let index = SnapIndex::new(&TestGraph::new(), 50.0);
        assert!(index.is_empty());
        assert_eq!(index.snap(LatLng::new(0.0, 0.0)), None);
    }

    #[test]
    fn snaps_within_tolerance_only() {
        let mut g = TestGraph::new();
        let a = g.add_vertex(east(0), ());
        let index = SnapIndex::new(&g, 20.0);
        // ~11 m away.
        assert_eq!(index.snap(LatLng::new(0.0001, 0.0)), Some(a));
        // ~33 m away.
        assert_eq!(index.snap(LatLng::new(0.0003, 0.0)), None);
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut g = TestGraph::new();
        let _far = g.add_vertex(LatLng::new(0.0, 0.00015), ());
        let near = g.add_vertex(LatLng::new(0.0, -0.00005), ());
        let index = SnapIndex::new(&g, 30.0);
        assert_eq!(index.snap(LatLng::new(0.0, 0.0)), Some(near));
    }

    #[test]
    fn equidistant_tie_goes_to_smaller_id() {
        let mut g = TestGraph::new();
        let first = g.add_vertex(LatLng::new(0.0, 0.0001), ());
        let _second = g.add_vertex(LatLng::new(0.0, -0.0001), ());
        let index = SnapIndex::new(&g, 30.0);
        assert_eq!(index.snap(LatLng::new(0.0, 0.0)), Some(first));
    }

    #[test]
    fn longitude_window_widens_at_high_latitude() {
        let mut g = TestGraph::new();
        // ~20 m east of the query point at 70°N.
        let v = g.add_vertex(LatLng::new(70.0, 0.000526), ());
        let index = SnapIndex::new(&g, 24.0);
        assert_eq!(index.snap(LatLng::new(70.0, 0.0)), Some(v));
    }

    #[test]
    fn inserted_vertices_become_snappable() {
        let mut index = SnapIndex::new(&TestGraph::new(), 20.0);
        let id = hr_core::VertexId(42);
        index.insert(id, east(3));
        assert_eq!(index.len(), 1);
        assert_eq!(index.snap(east(3)), Some(id));
    }
}

// ── insert_path / remove_path ─────────────────────────────────────────────────

#[cfg(test)]
mod insert_remove {
    use hr_core::{CoreError, LatLng};
    use hr_graph::Graph;

    use super::helpers::*;
    use crate::{EditError, SnapSettings, insert_path, remove_path};

    #[test]
    fn fresh_path_creates_vertices_and_two_way_edges() {
        let g = TestGraph::new();
        let pts = [east(0), east(1), east(2)];
        let edit = insert_path(&g, &pts, &SnapSettings::default()).unwrap();

        assert_eq!(edit.path.len(), 3);
        assert_eq!(edit.graph.vertex_count(), 3);
        assert_eq!(edit.graph.edge_count(), 4);
        let (a, b) = (edit.path[0], edit.path[1]);
        let fwd = edit.graph.edge(a, b).unwrap();
        let back = edit.graph.edge(b, a).unwrap();
        assert!((fwd.distance - east(0).distance_m(east(1))).abs() < 1e-9);
        assert_eq!(fwd.distance, back.distance);
        assert_ne!(fwd.id, back.id);
        // Copy-on-write.
        assert!(g.is_empty());
    }

    #[test]
    fn points_near_existing_vertex_reuse_it() {
        let mut g = TestGraph::new();
        let a = g.add_vertex(east(0), ());
        let pts = [LatLng::new(0.00005, 0.0), east(1)];
        let edit = insert_path(&g, &pts, &SnapSettings::default()).unwrap();
        assert_eq!(edit.path[0], a);
        assert_eq!(edit.graph.vertex_count(), 2);
    }

    #[test]
    fn later_points_snap_onto_vertices_created_earlier() {
        let pts = [east(0), east(1), LatLng::new(0.00002, 0.0)];
        let edit = insert_path(&TestGraph::new(), &pts, &SnapSettings::default()).unwrap();
        assert_eq!(edit.graph.vertex_count(), 2);
        assert_eq!(edit.path.first(), edit.path.last());
    }

    #[test]
    fn repeated_points_make_no_self_loop() {
        let pts = [east(0), east(0), LatLng::new(0.0, 0.00001), east(1)];
        let edit = insert_path(&TestGraph::new(), &pts, &SnapSettings::default()).unwrap();
        assert_eq!(edit.path.len(), 2);
        assert!(edit.graph.edges().all(|e| e.start != e.end));
        assert_eq!(edit.graph.edge_count(), 2);
    }

    #[test]
    fn existing_edge_keeps_id_and_payload() {
        let mut g: Graph<(), u32> = Graph::new();
        let a = g.add_vertex(east(0), ());
        let b = g.add_vertex(east(1), ());
        let id = g.add_edge(a, b, 999.0, 7).unwrap();

        let edit = insert_path(&g, &[east(0), east(1)], &SnapSettings::default()).unwrap();
        let fwd = edit.graph.edge(a, b).unwrap();
        assert_eq!(fwd.id, id);
        assert_eq!(fwd.data, 7);
        assert!((fwd.distance - east(0).distance_m(east(1))).abs() < 1e-9);
        assert_eq!(edit.graph.edge(b, a).unwrap().data, 0);
        assert_eq!(g.edge(a, b).unwrap().distance, 999.0);
    }

    #[test]
    fn single_point_adds_one_vertex_and_no_edges() {
        let edit = insert_path(&TestGraph::new(), &[east(5)], &SnapSettings::default()).unwrap();
        assert_eq!(edit.graph.vertex_count(), 1);
        assert_eq!(edit.graph.edge_count(), 0);
    }

    #[test]
    fn rejects_non_finite_points_and_bad_settings() {
        let g = TestGraph::new();
        let err = insert_path(&g, &[east(0), LatLng::new(f64::NAN, 0.0)], &SnapSettings::default());
        assert!(matches!(err, Err(EditError::Core(CoreError::NonFiniteCoordinate { .. }))));
        let err = insert_path(&g, &[east(0)], &SnapSettings::new(16.0, f64::NAN));
        assert!(matches!(err, Err(EditError::InvalidSettings(_))));
    }

    #[test]
    fn remove_path_undoes_an_isolated_insert() {
        let edit =
            insert_path(&TestGraph::new(), &[east(0), east(1), east(2)], &SnapSettings::default())
                .unwrap();
        let g = remove_path(&edit.graph, &edit.path);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        // Input untouched.
        assert_eq!(edit.graph.vertex_count(), 3);
    }

    #[test]
    fn remove_path_keeps_vertices_still_in_use() {
        let mut g = TestGraph::new();
        let a = g.add_vertex(east(0), ());
        let b = g.add_vertex(east(1), ());
        let c = g.add_vertex(east(2), ());
        let spur = g.add_vertex(LatLng::new(0.001, 0.001), ());
        road(&mut g, a, b);
        road(&mut g, b, c);
        road(&mut g, b, spur);

        let out = remove_path(&g, &[a, b, c]);
        assert!(!out.contains_vertex(a));
        assert!(!out.contains_vertex(c));
        assert!(out.contains_vertex(b));
        assert!(out.contains_vertex(spur));
        assert_eq!(out.edge_count(), 2);
    }

    #[test]
    fn remove_path_skips_missing_hops() {
        super::helpers::init_logging();
        let mut g = TestGraph::new();
        let a = g.add_vertex(east(0), ());
        let b = g.add_vertex(east(1), ());
        let c = g.add_vertex(east(2), ());
        road(&mut g, a, b);
        let out = remove_path(&g, &[b, c]);
        // b→c never existed; c was already orphaned and is pruned.
        assert_eq!(out.edge_count(), 2);
        assert!(!out.contains_vertex(c));
    }
}

// ── diff_path ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod diff {
    use std::collections::BTreeSet;

    use hr_core::{EdgeId, LatLng};

    use super::helpers::*;
    use crate::{SnapSettings, diff_path};

    /// a - b - c along the equator, plus b - spur when `with_spur`.
    fn corridor(with_spur: bool) -> TestGraph {
        let mut g = TestGraph::new();
        let a = g.add_vertex(east(0), ());
        let b = g.add_vertex(east(1), ());
        let c = g.add_vertex(east(2), ());
        road(&mut g, a, b);
        road(&mut g, b, c);
        if with_spur {
            let spur = g.add_vertex(LatLng::new(0.001, 0.001), ());
            road(&mut g, b, spur);
        }
        g
    }

    #[test]
    fn unchanged_path_has_empty_diff() {
        let g = corridor(false);
        let pts = [east(0), east(1), east(2)];
        let diff = diff_path(&g, &pts, &pts, &SnapSettings::default()).unwrap();
        assert!(diff.is_empty(), "{diff:?}");
    }

    #[test]
    fn extension_adds_placeholder_vertex_and_edges() {
        let g = corridor(false);
        let old = [east(0), east(1), east(2)];
        let new = [east(0), east(1), east(2), east(3)];
        let diff = diff_path(&g, &new, &old, &SnapSettings::default()).unwrap();

        assert_eq!(diff.added_vertices.len(), 1);
        let v = &diff.added_vertices[0];
        assert!(v.id.is_placeholder());
        assert_eq!(v.pos, east(3));
        assert_eq!(diff.added_edges.len(), 2);
        assert!(diff.added_edges.iter().all(|e| e.id.is_placeholder()));
        assert!(diff.added_edges.iter().all(|e| e.start == v.id || e.end == v.id));
        assert!(diff.removed_vertices.is_empty());
        assert!(diff.removed_edges.is_empty());
        // Nothing leaked into the input.
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn shortcut_removes_bypassed_vertex_and_its_edges() {
        let g = corridor(false);
        let (a, b, c) = {
            let ids: Vec<_> = g.vertex_ids().collect();
            (ids[0], ids[1], ids[2])
        };
        let old = [east(0), east(1), east(2)];
        let new = [east(0), east(2)];
        let diff = diff_path(&g, &new, &old, &SnapSettings::default()).unwrap();

        assert!(diff.added_vertices.is_empty());
        assert_eq!(diff.removed_vertices, vec![b]);
        let expected: BTreeSet<EdgeId> = [(a, b), (b, a), (b, c), (c, b)]
            .into_iter()
            .map(|(s, e)| g.edge(s, e).unwrap().id)
            .collect();
        let removed: BTreeSet<EdgeId> = diff.removed_edges.iter().copied().collect();
        assert_eq!(removed, expected);
        assert_eq!(diff.added_edges.len(), 2);
        assert!(diff.added_edges.iter().all(|e| e.id.is_placeholder()));
        let ends: BTreeSet<_> = diff.added_edges.iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(ends, [(a, c), (c, a)].into_iter().collect());
    }

    #[test]
    fn bypassed_vertex_with_other_roads_is_kept() {
        let g = corridor(true);
        let old = [east(0), east(1), east(2)];
        let new = [east(0), east(2)];
        let diff = diff_path(&g, &new, &old, &SnapSettings::default()).unwrap();
        assert!(diff.removed_vertices.is_empty());
        assert_eq!(diff.removed_edges.len(), 4);
    }

    #[test]
    fn joining_existing_vertex_reports_it_added() {
        let g = corridor(true);
        let spur_pos = LatLng::new(0.001, 0.001);
        let spur = g.vertex_ids().last().unwrap();
        let old = [east(0), east(1)];
        let new = [east(0), east(1), spur_pos];
        let diff = diff_path(&g, &new, &old, &SnapSettings::default()).unwrap();

        assert_eq!(diff.added_vertices.len(), 1);
        assert_eq!(diff.added_vertices[0].id, spur);
        // b - spur already exists in both directions.
        let existing: BTreeSet<EdgeId> = diff.added_edges.iter().map(|e| e.id).collect();
        assert_eq!(existing.len(), 2);
        assert!(existing.iter().all(|id| !id.is_placeholder()));
    }

    #[test]
    fn old_points_matching_nothing_are_ignored() {
        super::helpers::init_logging();
        let g = corridor(false);
        let old = [east(0), east(1), east(50)];
        let new = [east(0), east(1)];
        let diff = diff_path(&g, &new, &old, &SnapSettings::default()).unwrap();
        assert!(diff.is_empty(), "{diff:?}");
    }
}
