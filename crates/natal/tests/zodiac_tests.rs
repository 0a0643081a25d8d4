use natal::zodiac::{annotate, house_of, sign_of, ZodiacSign};
use natal::ChartError;

const EVEN_CUSPS: [f64; 12] = [
    0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0,
];

// Unequal cusps with house 9 wrapping through 0°
const PLACIDUS_LIKE: [f64; 12] = [
    105.3, 128.9, 155.0, 188.4, 224.1, 257.6, 285.3, 308.9, 335.0, 8.4, 44.1, 77.6,
];

fn count_houses(longitude: f64, cusps: &[f64; 12]) -> usize {
    (0..12)
        .filter(|&i| {
            let start = cusps[i];
            let end = cusps[(i + 1) % 12];
            if start < end {
                start <= longitude && longitude < end
            } else {
                longitude >= start || longitude < end
            }
        })
        .count()
}

#[test]
fn test_sign_of_basic() {
    assert_eq!(sign_of(0.0), 0);
    assert_eq!(sign_of(29.999), 0);
    assert_eq!(sign_of(30.0), 1);
    assert_eq!(sign_of(359.9), 11);
    assert_eq!(ZodiacSign::from_longitude(135.0), ZodiacSign::Leo);
}

#[test]
fn test_sign_of_is_periodic() {
    let mut lon = 0.0;
    while lon < 360.0 {
        for k in -3..=3 {
            assert_eq!(sign_of(lon), sign_of(lon + 360.0 * k as f64), "lon {} k {}", lon, k);
        }
        lon += 7.25;
    }
}

#[test]
fn test_even_cusps_house_two() {
    assert_eq!(house_of(45.0, &EVEN_CUSPS), Some(2));
    assert_eq!(house_of(30.0, &EVEN_CUSPS), Some(2));
    assert_eq!(house_of(0.0, &EVEN_CUSPS), Some(1));
}

#[test]
fn test_wrapping_twelfth_house() {
    // house 12 runs from 330 to 0
    assert_eq!(house_of(350.0, &EVEN_CUSPS), Some(12));
    assert_eq!(house_of(330.0, &EVEN_CUSPS), Some(12));
}

#[test]
fn test_wrap_in_the_middle_of_the_wheel() {
    assert_eq!(house_of(350.0, &PLACIDUS_LIKE), Some(9));
    assert_eq!(house_of(2.0, &PLACIDUS_LIKE), Some(9));
    assert_eq!(house_of(8.4, &PLACIDUS_LIKE), Some(10));
    assert_eq!(house_of(100.0, &PLACIDUS_LIKE), Some(12));
    assert_eq!(house_of(105.3, &PLACIDUS_LIKE), Some(1));
}

#[test]
fn test_every_longitude_has_exactly_one_house() {
    for cusps in [&EVEN_CUSPS, &PLACIDUS_LIKE] {
        let mut lon = 0.0;
        while lon < 360.0 {
            assert_eq!(count_houses(lon, cusps), 1, "lon {}", lon);
            let house = house_of(lon, cusps).unwrap();
            assert!((1..=12).contains(&house));
            lon += 0.25;
        }
    }
}

#[test]
fn test_annotate_combines_sign_and_house() {
    let placement = annotate(200.0, &EVEN_CUSPS).unwrap();
    assert_eq!(placement.sign, ZodiacSign::Libra);
    assert_eq!(placement.house, 7);
    assert!((placement.degree_in_sign - 20.0).abs() < 1e-12);
}

#[test]
fn test_malformed_cusps_are_an_error() {
    let cusps = [f64::NAN; 12];
    assert_eq!(house_of(10.0, &cusps), None);
    let err = annotate(10.0, &cusps).unwrap_err();
    assert!(matches!(err, ChartError::MalformedCusps { longitude, .. } if longitude == 10.0));
}
