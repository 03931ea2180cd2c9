//! Unit tests for fr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CoreError, FacilityId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(FacilityId::new("St. Mary").unwrap().to_string(), "St. Mary");
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(FacilityId::new(""), Err(CoreError::EmptyIdentifier)));
    }

    #[test]
    fn facility_ids_order_lexicographically() {
        let a = FacilityId::new("Alpha").unwrap();
        let b = FacilityId::new("Beta").unwrap();
        assert!(a < b);
        assert_eq!(a, "Alpha");
    }
}

#[cfg(test)]
mod geo {
    use crate::{distance_km, round_to, CoreError, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(28.6139, 77.2090);
        assert_eq!(p.distance_km(p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let d = distance_km(a, b);
        assert!((d - 111.194_926_6).abs() < 1e-6, "got {d}");
        assert_eq!(round_to(d, 2), 111.19);
    }

    #[test]
    fn symmetric_exactly() {
        let a = GeoPoint::new(28.61, 77.21);
        let b = GeoPoint::new(19.07, 72.87);
        assert_eq!(a.distance_km(b), b.distance_km(a));
    }

    #[test]
    fn out_of_range_passes_through() {
        let a = GeoPoint::new(120.0, 400.0);
        let b = GeoPoint::new(0.0, 0.0);
        assert!(a.distance_km(b).is_finite());
        assert!(!a.is_valid());
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(GeoPoint::new(90.0, -180.0).validate().is_ok());
        assert!(matches!(
            GeoPoint::new(90.5, 0.0).validate(),
            Err(CoreError::InvalidCoordinate { .. })
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn require_finite_ignores_range() {
        assert!(GeoPoint::new(120.0, 400.0).require_finite().is_ok());
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0).require_finite(),
            Err(CoreError::InvalidCoordinate { .. })
        ));
        assert!(GeoPoint::new(0.0, f64::NEG_INFINITY).require_finite().is_err());
    }

    #[test]
    fn from_raw_requires_both_components() {
        assert_eq!(
            GeoPoint::from_raw(Some(1.0), Some(2.0)).unwrap(),
            GeoPoint::new(1.0, 2.0)
        );
        assert!(matches!(
            GeoPoint::from_raw(None, Some(2.0)),
            Err(CoreError::InvalidCoordinate { .. })
        ));
        assert!(GeoPoint::from_raw(Some(1.0), None).is_err());
    }

    #[test]
    fn rounding_half_away_from_zero() {
        assert_eq!(round_to(1.005_000_1, 2), 1.01);
        assert_eq!(round_to(2.344, 2), 2.34);
        assert_eq!(round_to(-2.345_000_1, 2), -2.35);
        assert_eq!(round_to(7.0, 0), 7.0);
        assert!(round_to(f64::INFINITY, 2).is_infinite());
    }
}

#[cfg(test)]
mod facility {
    use crate::{CoreError, FacilityId, FacilitySet, GeoPoint};

    #[test]
    fn from_records_preserves_order_and_lookup() {
        let set = FacilitySet::from_records([
            ("B", GeoPoint::new(0.0, 1.0)),
            ("A", GeoPoint::new(0.0, 0.0)),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        let names: Vec<&str> = set.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(set.position("A"), Some(GeoPoint::new(0.0, 0.0)));
        assert!(set.get("C").is_none());
    }

    #[test]
    fn duplicate_name_rejected() {
        let result = FacilitySet::from_records([
            ("A", GeoPoint::new(0.0, 0.0)),
            ("A", GeoPoint::new(1.0, 1.0)),
        ]);
        match result {
            Err(CoreError::DuplicateIdentifier(id)) => assert_eq!(id, "A"),
            other => panic!("expected DuplicateIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn insert_duplicate_keeps_original() {
        let mut set = FacilitySet::new();
        let a = FacilityId::new("A").unwrap();
        set.insert(a.clone(), GeoPoint::new(0.0, 0.0)).unwrap();
        assert!(set.insert(a, GeoPoint::new(5.0, 5.0)).is_err());
        assert_eq!(set.position("A"), Some(GeoPoint::new(0.0, 0.0)));
        assert_eq!(set.len(), 1);
    }
}

#[cfg(test)]
mod config {
    use crate::{GraphConfig, RouterConfig, DEFAULT_QUERY_NODE};

    #[test]
    fn defaults() {
        let cfg = RouterConfig::default();
        assert_eq!(cfg.graph.weight_decimals, 2);
        assert_eq!(cfg.graph.query_node, DEFAULT_QUERY_NODE);
        assert!(cfg.validate_coordinates);
        assert_eq!(GraphConfig::default(), cfg.graph);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::GeoPoint;

    fn point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(p in point()) {
            prop_assert!(p.distance_km(p).abs() < 1e-9);
        }

        #[test]
        fn distance_is_symmetric(a in point(), b in point()) {
            prop_assert!((a.distance_km(b) - b.distance_km(a)).abs() < 1e-9);
        }

        #[test]
        fn distance_is_bounded_by_half_circumference(a in point(), b in point()) {
            let d = a.distance_km(b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * crate::EARTH_RADIUS_KM + 1e-6);
        }
    }
}
