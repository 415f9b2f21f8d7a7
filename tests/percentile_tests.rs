use devscore::scorer::percentile::{Knot, PercentileTable};
use rstest::rstest;

#[test]
fn test_every_knot_reproduced_exactly() {
    let table = PercentileTable::standard();
    for knot in table.knots() {
        assert_eq!(
            table.percentile_of(knot.z),
            knot.percentile,
            "knot z = {}",
            knot.z
        );
    }
}

#[rstest]
#[case(0.0, 50.0)]
#[case(1.28, 90.0)]
#[case(1.96, 97.5)]
#[case(3.0, 99.87)]
#[case(3.5, 99.98)]
#[case(-3.5, 0.02)]
#[case(-1.64, 5.0)]
fn test_reference_points(#[case] z: f64, #[case] expected: f64) {
    assert_eq!(PercentileTable::standard().percentile_of(z), expected);
}

#[test]
fn test_strictly_monotone_sweep() {
    let table = PercentileTable::standard();
    let mut prev = table.percentile_raw(-5.0);
    let mut z = -5.0;
    while z < 5.0 {
        z += 0.001;
        let p = table.percentile_raw(z);
        assert!(p > prev - 1e-12, "dropped at z = {}: {} < {}", z, p, prev);
        prev = p;
    }
}

#[test]
fn test_rounded_output_bounds() {
    let table = PercentileTable::standard();
    for i in -200..=200 {
        let p = table.percentile_of(i as f64 * 0.05);
        assert!((0.01..=99.99).contains(&p), "{}", p);
    }
}

#[test]
fn test_custom_table_injection() {
    let table = PercentileTable::from_knots(vec![
        Knot { z: -1.0, percentile: 10.0 },
        Knot { z: 0.0, percentile: 50.0 },
        Knot { z: 1.0, percentile: 90.0 },
    ])
    .unwrap();

    assert_eq!(table.percentile_of(0.0), 50.0);
    assert_eq!(table.percentile_of(0.5), 70.0);
    assert_eq!(table.percentile_of(1.0), 90.0);
    // above the last knot the table keeps climbing slowly
    assert!(table.percentile_raw(2.0) > 90.0);
}

#[test]
fn test_duplicate_z_rejected() {
    let res = PercentileTable::from_knots(vec![
        Knot { z: 0.0, percentile: 40.0 },
        Knot { z: 0.0, percentile: 60.0 },
    ]);
    assert!(res.is_err());
}
