use natal::ephemeris::{
    Body, EphemerisError, EphemerisProvider, FixedEphemeris, GeoLocation, HouseMethod,
    SwissEphemerisAdapter,
};
use natal::{compute_houses, BirthData, ChartAssembler, ChartError, CivilDate, CivilTime, JulianDay};
use std::path::PathBuf;

const J2000_JD: JulianDay = JulianDay(2_451_545.0);

// Without .se1 files in the data directory the C library falls back to its
// built-in analytical ephemeris, good to a few arcseconds.
fn adapter() -> SwissEphemerisAdapter {
    SwissEphemerisAdapter::new(Some(PathBuf::from("/"))).unwrap()
}

#[test]
fn test_placidus_refused_inside_polar_circle() {
    // the polar check runs before the C library is touched
    let adapter = adapter();
    for lat in [70.0, -70.0, 89.9] {
        let err = adapter
            .houses(J2000_JD, GeoLocation::new(lat, 25.0), HouseMethod::Placidus)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::HouseCalculationFailed { .. }));
    }
}

#[test]
fn test_polar_failure_surfaces_through_house_calculator() {
    let adapter = adapter();
    let err = compute_houses(&adapter, J2000_JD, GeoLocation::new(78.2, 15.6))
        .unwrap_err();
    assert!(matches!(
        err,
        ChartError::Ephemeris(EphemerisError::HouseCalculationFailed { .. })
    ));
}

#[test]
fn test_fixed_provider_reports_everything_it_knows() {
    let provider = FixedEphemeris::new().with_longitude(Body::Mars, 123.0);
    let mars = provider.position(JulianDay(0.0), Body::Mars).unwrap();
    assert_eq!(mars.lon, 123.0);
    assert_eq!(
        provider.position(JulianDay(0.0), Body::Venus).unwrap_err(),
        EphemerisError::UnknownBody { body: Body::Venus }
    );
    assert!(provider
        .houses(JulianDay(0.0), GeoLocation::new(0.0, 0.0), HouseMethod::Placidus)
        .is_err());
}

#[test]
fn test_swiss_chart_j2000() {
    let assembler = ChartAssembler::new(adapter());
    let birth = BirthData {
        name: "J2000".to_string(),
        date: CivilDate::new(1, 1, 2000),
        time: CivilTime::new(12, 0),
        utc_offset: "Z".parse().unwrap(),
        location: GeoLocation::new(51.48, 0.0),
        place: Some("Greenwich".to_string()),
    };

    let chart = assembler.assemble(&birth).unwrap();

    // Sun near 280.37° (10° Capricorn) at J2000
    let sun = chart.placement(Body::Sun).unwrap();
    assert!((sun.longitude - 280.37).abs() < 0.05, "sun {}", sun.longitude);
    for placement in chart.placements() {
        assert!((0.0..360.0).contains(&placement.longitude));
        assert!((1..=12).contains(&placement.house));
    }
}

#[test]
fn test_swiss_positions_are_finite_longitudes() {
    let adapter = adapter();
    for body in Body::ALL {
        let position = adapter.position(J2000_JD, body).unwrap();
        assert!(position.lon.is_finite(), "{body}");
        assert!((0.0..360.0).contains(&position.lon), "{body} at {}", position.lon);
        assert!(position.distance > 0.0, "{body}");
    }
}

#[test]
fn test_swiss_greenwich_houses() {
    let adapter = adapter();
    let houses = compute_houses(&adapter, J2000_JD, GeoLocation::new(51.48, 0.0)).unwrap();

    assert_eq!(houses.method, HouseMethod::Placidus);
    for cusp in houses.cusps {
        assert!((0.0..360.0).contains(&cusp), "cusp {cusp}");
    }
    // Placidus cusp 1 is the ascendant, cusp 10 the midheaven
    assert!((houses.cusps[0] - houses.ascendant).abs() < 1e-9);
    assert!((houses.cusps[9] - houses.midheaven).abs() < 1e-9);

    // Every longitude lands in exactly one house
    for step in 0..720 {
        let lon = step as f64 * 0.5;
        assert!(natal::house_of(lon, &houses.cusps).is_some(), "lon {lon}");
    }
}

#[test]
fn test_swiss_adapter_uses_configured_path() {
    let dir = std::env::temp_dir();
    let adapter = SwissEphemerisAdapter::new(Some(dir.clone())).unwrap();
    assert_eq!(adapter.ephemeris_path(), dir.as_path());

    let sun = adapter.position(J2000_JD, Body::Sun).unwrap();
    assert!((sun.lon - 280.37).abs() < 0.05, "sun {}", sun.lon);
}

#[test]
fn test_swiss_concurrent_queries_agree() {
    let adapter = adapter();
    let expected = adapter.position(J2000_JD, Body::Moon).unwrap();
    let location = GeoLocation::new(51.48, 0.0);
    let expected_houses = adapter.houses(J2000_JD, location, HouseMethod::Placidus).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    let moon = adapter.position(J2000_JD, Body::Moon).unwrap();
                    assert_eq!(moon, expected);
                    let houses = adapter.houses(J2000_JD, location, HouseMethod::Placidus).unwrap();
                    assert_eq!(houses, expected_houses);
                }
            });
        }
    });
}
