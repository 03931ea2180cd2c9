//! Unit tests for fr-query.

use fr_core::{FacilitySet, GeoPoint};

use crate::FacilityRouter;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A:(0,0)  B:(0,1)  C:(1,0).  |AB| = |AC| = 111.19 km, |BC| = 157.25 km.
fn triangle() -> FacilitySet {
    FacilitySet::from_records([
        ("A", GeoPoint::new(0.0, 0.0)),
        ("B", GeoPoint::new(0.0, 1.0)),
        ("C", GeoPoint::new(1.0, 0.0)),
    ])
    .unwrap()
}

fn router() -> FacilityRouter {
    FacilityRouter::new(triangle()).unwrap()
}

/// Just off A, 1.57 km away.
const NEAR_A: GeoPoint = GeoPoint { lat: 0.01, lon: 0.01 };

// ── Named-facility requests ───────────────────────────────────────────────────

#[cfg(test)]
mod named {
    use super::*;

    #[test]
    fn distances_from_start() {
        let d = router().distances_from("A").unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d["A"], 0.0);
        assert_eq!(d["B"], 111.19);
        assert_eq!(d["C"], 111.19);
    }

    #[test]
    fn distances_from_unknown_is_not_found() {
        let err = router().distances_from("Nowhere").unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn route_between_direct_edge() {
        let r = router().route_between("B", "C").unwrap();
        assert_eq!(r.path, ["B", "C"]);
        assert_eq!(r.polyline, vec![[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(r.total_km, 157.25);
    }

    #[test]
    fn route_to_self_is_single_stop() {
        let r = router().route_between("A", "A").unwrap();
        assert_eq!(r.path, ["A"]);
        assert_eq!(r.polyline, vec![[0.0, 0.0]]);
        assert_eq!(r.total_km, 0.0);
    }

    #[test]
    fn route_between_unknown_end() {
        let err = router().route_between("A", "Z").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn query_node_name_is_not_a_facility() {
        let r = router();
        assert!(r.route_between("A", &r.config().graph.query_node).unwrap_err().is_not_found());
    }

    #[test]
    fn snapshot_lists_every_facility() {
        let snap = router().graph_snapshot();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap["A"]["B"], 111.19);
        assert_eq!(snap["B"]["C"], 157.25);
        assert!(!snap["C"].contains_key("C"));
    }
}

// ── Query-point requests ──────────────────────────────────────────────────────

#[cfg(test)]
mod point {
    use fr_core::{round_to, RouterConfig};

    use super::*;
    use crate::RouterBuilder;

    #[test]
    fn nearest_with_route() {
        let n = router().nearest_to(NEAR_A).unwrap();
        assert_eq!(n.facility, "A");
        assert_eq!(n.path, ["A"]);
        assert_eq!(n.polyline, vec![[0.01, 0.01], [0.0, 0.0]]);
        assert_eq!(n.total_km, 1.57);
    }

    #[test]
    fn nearest_tie_goes_to_smallest_name() {
        let set = FacilitySet::from_records([
            ("Zed", GeoPoint::new(0.0, 1.0)),
            ("Alpha", GeoPoint::new(0.0, -1.0)),
        ])
        .unwrap();
        let r = FacilityRouter::new(set).unwrap();
        let n = r.nearest_to(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(n.facility, "Alpha");
    }

    #[test]
    fn nearest_on_empty_set_is_not_found() {
        let r = FacilityRouter::new(FacilitySet::new()).unwrap();
        let err = r.nearest_to(NEAR_A).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn coords_missing_component_is_bad_request() {
        let r = router();
        assert!(r.nearest_to_coords(None, Some(0.0)).unwrap_err().is_bad_request());
        assert!(r.nearest_to_coords(Some(0.0), None).unwrap_err().is_bad_request());
        assert!(r.nearest_to_coords(None, None).unwrap_err().is_bad_request());
    }

    #[test]
    fn coords_present_matches_point() {
        let r = router();
        let a = r.nearest_to_coords(Some(0.01), Some(0.01)).unwrap();
        let b = r.nearest_to(NEAR_A).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_point_rejected() {
        let r = router();
        assert!(r.nearest_to(GeoPoint::new(91.0, 0.0)).unwrap_err().is_bad_request());
        assert!(r.nearest_to(GeoPoint::new(0.0, f64::NAN)).unwrap_err().is_bad_request());
        assert!(r.route_from_point(GeoPoint::new(0.0, 181.0), "A").unwrap_err().is_bad_request());
    }

    #[test]
    fn validation_can_be_disabled() {
        let config = RouterConfig { validate_coordinates: false, ..RouterConfig::default() };
        let r = RouterBuilder::new(triangle()).config(config).build().unwrap();
        assert!(r.nearest_to(GeoPoint::new(91.0, 0.0)).is_ok());

        let nan = r.nearest_to_coords(Some(f64::NAN), Some(0.0)).unwrap_err();
        assert!(nan.is_bad_request());
        assert!(!nan.is_not_found());
        let inf = r.route_from_point(GeoPoint::new(0.0, f64::INFINITY), "A").unwrap_err();
        assert!(inf.is_bad_request());
    }

    #[test]
    fn route_from_point_to_chosen_target() {
        let r = router();
        let p = r.route_from_point(NEAR_A, "B").unwrap();
        let direct = round_to(NEAR_A.distance_km(GeoPoint::new(0.0, 1.0)), 2);
        assert_eq!(p.facility, "B");
        assert_eq!(p.path, ["B"]);
        assert_eq!(p.polyline, vec![[0.01, 0.01], [0.0, 1.0]]);
        assert_eq!(p.total_km, direct);
    }

    #[test]
    fn route_from_point_unknown_target() {
        let r = router();
        assert!(r.route_from_point(NEAR_A, "Z").unwrap_err().is_not_found());
        let reserved = r.config().graph.query_node.clone();
        assert!(r.route_from_point(NEAR_A, &reserved).unwrap_err().is_not_found());
    }

    #[test]
    fn reserved_facility_name_fails_build() {
        let set = FacilitySet::from_records([
            ("A", GeoPoint::new(0.0, 0.0)),
            ("__query__", GeoPoint::new(1.0, 1.0)),
        ])
        .unwrap();
        assert!(FacilityRouter::new(set).is_err());
    }

    #[test]
    fn base_graph_untouched_by_queries() {
        let r = router();
        let before = r.graph_snapshot();
        r.nearest_to(NEAR_A).unwrap();
        r.route_from_point(NEAR_A, "C").unwrap();
        assert_eq!(r.graph().node_count(), 3);
        assert_eq!(r.graph().edge_count(), 6);
        assert_eq!(r.graph_snapshot(), before);
    }
}

// ── Engine pluggability ───────────────────────────────────────────────────────

#[cfg(test)]
mod finder {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fr_core::NodeId;
    use fr_graph::{Dijkstra, DistanceTable, GraphResult, PathFinder, Route, WeightedGraph};

    use super::*;
    use crate::RouterBuilder;

    /// Delegates to `Dijkstra`, counting calls.
    #[derive(Default)]
    struct Counting {
        routes:    AtomicUsize,
        distances: AtomicUsize,
    }

    impl PathFinder for Counting {
        fn route(&self, graph: &WeightedGraph, from: NodeId, to: NodeId) -> GraphResult<Route> {
            self.routes.fetch_add(1, Ordering::Relaxed);
            Dijkstra.route(graph, from, to)
        }

        fn distances(&self, graph: &WeightedGraph, from: NodeId) -> GraphResult<DistanceTable> {
            self.distances.fetch_add(1, Ordering::Relaxed);
            Dijkstra.distances(graph, from)
        }
    }

    #[test]
    fn custom_finder_is_used() {
        let r = RouterBuilder::new(triangle()).finder(Counting::default()).build().unwrap();
        r.route_between("A", "B").unwrap();
        r.nearest_to(NEAR_A).unwrap();
        r.distances_from("C").unwrap();
        assert_eq!(r.finder().routes.load(Ordering::Relaxed), 2);
        assert_eq!(r.finder().distances.load(Ordering::Relaxed), 1);
    }
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod concurrency {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn router_is_send_sync() {
        assert_send_sync::<FacilityRouter>();
    }

    #[test]
    fn concurrent_queries_are_isolated() {
        let r = router();
        let points = [
            NEAR_A,
            GeoPoint::new(0.02, 0.95),
            GeoPoint::new(0.97, 0.03),
            GeoPoint::new(0.5, 0.5),
        ];
        let expected: Vec<_> = points.iter().map(|&p| r.nearest_to(p).unwrap()).collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let r = &r;
                    let p = points[i % points.len()];
                    s.spawn(move || (i, r.nearest_to(p).unwrap()))
                })
                .collect();
            for h in handles {
                let (i, got) = h.join().unwrap();
                assert_eq!(got, expected[i % points.len()]);
                assert!(!got.path.iter().any(|f| f == "__query__"));
            }
        });

        assert_eq!(r.graph().node_count(), 3);
    }

    #[test]
    fn nearest_many_keeps_input_order() {
        let r = router();
        let points = [GeoPoint::new(0.97, 0.03), NEAR_A, GeoPoint::new(95.0, 0.0)];
        let results = r.nearest_many(&points);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().facility, "C");
        assert_eq!(results[1].as_ref().unwrap().facility, "A");
        assert!(results[2].as_ref().unwrap_err().is_bad_request());
    }
}

// ── JSON shape ────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod json {
    use serde_json::json;

    use super::*;

    #[test]
    fn nearest_field_names() {
        let n = router().nearest_to(NEAR_A).unwrap();
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(
            v,
            json!({
                "nearest_hospital": "A",
                "route": [[0.01, 0.01], [0.0, 0.0]],
                "path": ["A"],
                "distance": 1.57,
            })
        );
    }

    #[test]
    fn point_route_field_names() {
        let p = router().route_from_point(NEAR_A, "A").unwrap();
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["hospital"], "A");
        assert_eq!(v["path"], json!(["A"]));
        assert!(v.get("route").is_some());
        assert!(v.get("distance").is_some());
    }

    #[test]
    fn route_field_names() {
        let r = router().route_between("A", "C").unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["path"], json!(["A", "C"]));
        assert_eq!(v["distance"], 111.19);
    }
}
