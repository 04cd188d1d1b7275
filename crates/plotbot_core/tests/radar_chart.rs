use plotbot_core::{Chart, ChartEdit, ChartError, ChartShape, Coordinate, Creator};

fn radar_chart() -> Chart {
    Chart::new(
        ChartShape::Radar {
            axes: vec![
                "strength".to_string(),
                "dexterity".to_string(),
                "charisma".to_string(),
            ],
        },
        Creator {
            username: "maker".to_string(),
            user_id: 5,
        },
    )
}

#[test]
fn radial_plot_and_lookup_roundtrip() {
    let mut chart = radar_chart();

    chart
        .plot_point("bob", Coordinate::Radial(vec![3.0, 7.0, 10.0]))
        .unwrap();

    assert_eq!(
        *chart.lookup("bob").unwrap(),
        Coordinate::Radial(vec![3.0, 7.0, 10.0])
    );
}

#[test]
fn value_count_must_match_axes() {
    let mut chart = radar_chart();

    let err = chart
        .plot_point("bob", Coordinate::Radial(vec![3.0, 7.0]))
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::AxisCountMismatch {
            expected: 3,
            actual: 2,
        }
    );
}

#[test]
fn values_outside_the_fixed_range_are_rejected() {
    let mut chart = radar_chart();

    let err = chart
        .plot_point("bob", Coordinate::Radial(vec![3.0, 11.0, 2.0]))
        .unwrap_err();
    assert!(err.to_string().contains("[0, 10]"));

    let err = chart
        .plot_point("bob", Coordinate::Radial(vec![-0.5, 1.0, 2.0]))
        .unwrap_err();
    assert!(matches!(err, ChartError::OutOfBounds(_)));
}

#[test]
fn radar_chart_rejects_planar_coordinates() {
    let mut chart = radar_chart();

    let err = chart
        .plot_point("bob", Coordinate::planar(1.0, 1.0))
        .unwrap_err();
    assert_eq!(err, ChartError::CoordinateKind { expected: "radial" });
}

#[test]
fn radial_fold_is_elementwise() {
    let mut chart = radar_chart();
    chart
        .plot_point("bob", Coordinate::Radial(vec![2.0, 4.0, 6.0]))
        .unwrap();
    chart.grant_consent(10, "bob");
    chart
        .contribute(11, "bob", Coordinate::Radial(vec![4.0, 8.0, 0.0]))
        .unwrap();

    let effective = chart.effective_points();
    assert_eq!(
        effective[0].coordinate,
        Coordinate::Radial(vec![3.0, 6.0, 3.0])
    );
}

#[test]
fn radial_fold_without_base_averages_contributions() {
    let mut chart = radar_chart();
    chart.grant_consent(10, "ghost");
    chart
        .contribute(11, "ghost", Coordinate::Radial(vec![2.0, 2.0, 2.0]))
        .unwrap();
    chart
        .contribute(12, "ghost", Coordinate::Radial(vec![4.0, 6.0, 8.0]))
        .unwrap();

    let effective = chart.effective_points();
    assert_eq!(effective.len(), 1);
    assert_eq!(
        effective[0].coordinate,
        Coordinate::Radial(vec![3.0, 4.0, 5.0])
    );
}

#[test]
fn axis_captions_can_only_be_replaced_same_length() {
    let mut chart = radar_chart();

    let err = chart
        .apply_edit(&ChartEdit {
            axes: Some(vec!["one".to_string(), "two".to_string()]),
            ..ChartEdit::default()
        })
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::AxisCountMismatch {
            expected: 3,
            actual: 2,
        }
    );

    chart
        .apply_edit(&ChartEdit {
            axes: Some(vec![
                "str".to_string(),
                "dex".to_string(),
                "cha".to_string(),
            ]),
            ..ChartEdit::default()
        })
        .unwrap();
    assert_eq!(
        chart.shape().radar_axes().unwrap(),
        ["str", "dex", "cha"]
    );
}
