//! Unit tests for hr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, IdAllocator, VertexId};

    #[test]
    fn ordering() {
        assert!(VertexId(0) < VertexId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn placeholders_are_negative() {
        assert!(VertexId(-1).is_placeholder());
        assert!(!VertexId(0).is_placeholder());
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
        assert_eq!(EdgeId(-2).to_string(), "EdgeId(-2)");
    }

    #[test]
    fn allocator_skips_observed_ids() {
        let mut ids = IdAllocator::new();
        ids.observe(4);
        ids.observe(2);
        assert_eq!(ids.next_raw(), 5);
        assert_eq!(ids.next_raw(), 6);
        // Observing something below the counter changes nothing.
        ids.observe(3);
        assert_eq!(ids.peek(), 7);
    }

    #[test]
    fn allocator_ignores_negative_observations() {
        let mut ids = IdAllocator::new();
        ids.observe(-10);
        assert_eq!(ids.next_raw(), 0);
    }

    #[test]
    fn observing_the_largest_id_never_wraps_negative() {
        let mut ids = IdAllocator::new();
        ids.observe(i64::MAX);
        assert_eq!(ids.peek(), i64::MAX);
        assert_eq!(ids.next_raw(), i64::MAX);
        assert!(ids.peek() >= 0);
        assert_eq!(ids.next_placeholder(), -1);
    }

    #[test]
    fn placeholders_count_down_independently() {
        let mut ids = IdAllocator::starting_at(10);
        assert_eq!(ids.next_placeholder(), -1);
        assert_eq!(ids.next_placeholder(), -2);
        assert_eq!(ids.next_raw(), 10);
    }
}

#[cfg(test)]
mod geo {
    use crate::{
        CoreError, LatLng, meters_per_pixel, meters_to_pixels, pixels_to_meters, polyline_length_m,
    };

    #[test]
    fn checked_rejects_non_finite() {
        let p = LatLng::new(-23.36, 119.73);
        assert_eq!(p.checked().unwrap(), p);
        assert!(matches!(
            LatLng::new(f64::NAN, 0.0).checked(),
            Err(CoreError::NonFiniteCoordinate { .. })
        ));
        assert!(LatLng::new(0.0, f64::INFINITY).checked().is_err());
    }

    #[test]
    fn zero_distance() {
        let p = LatLng::new(-23.36, 119.73);
        assert!(p.distance_m(p) < 1e-9);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = LatLng::new(-23.0, 119.0);
        let b = LatLng::new(-22.0, 119.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LatLng::new(-23.3601, 119.7312);
        let b = LatLng::new(-23.3655, 119.7410);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-9);
    }

    #[test]
    fn cardinal_bearings() {
        let o = LatLng::new(0.0, 0.0);
        assert!((o.bearing_to(LatLng::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((o.bearing_to(LatLng::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((o.bearing_to(LatLng::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_to(LatLng::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn project_then_measure() {
        let o = LatLng::new(-23.36, 119.73);
        let p = o.project(45.0, 1_000.0);
        assert!((o.distance_m(p) - 1_000.0).abs() < 1e-6);
        assert!((o.bearing_to(p) - 45.0).abs() < 1e-6);
    }

    #[test]
    fn project_wraps_longitude() {
        let p = LatLng::new(0.0, 179.999).project(90.0, 1_000.0);
        assert!(p.lng < -179.0, "got {p}");
    }

    #[test]
    fn mercator_scale_halves_per_zoom() {
        let z15 = meters_per_pixel(15.0);
        let z16 = meters_per_pixel(16.0);
        assert!((z15 / z16 - 2.0).abs() < 1e-12);
        assert!((meters_per_pixel(0.0) - 156_543.033_92).abs() < 1e-6);
    }

    #[test]
    fn pixel_meter_conversion_inverts() {
        let m = pixels_to_meters(12.0, 17.0);
        assert!((meters_to_pixels(m, 17.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn polyline_length() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 0.01);
        let c = LatLng::new(0.01, 0.01);
        let total = polyline_length_m(&[a, b, c]);
        assert!((total - (a.distance_m(b) + b.distance_m(c))).abs() < 1e-9);
        assert_eq!(polyline_length_m(&[a]), 0.0);
        assert_eq!(polyline_length_m(&[]), 0.0);
    }
}
