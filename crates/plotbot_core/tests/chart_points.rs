use plotbot_core::{
    AxisBounds, Chart, ChartError, ChartShape, Coordinate, Creator, PlanarPoint,
};

fn creator() -> Creator {
    Creator {
        username: "maker".to_string(),
        user_id: 42,
    }
}

fn axis_chart() -> Chart {
    Chart::new(
        ChartShape::Axis {
            x_left: Some("left".to_string()),
            x_right: Some("right".to_string()),
            y_bottom: Some("down".to_string()),
            y_top: Some("up".to_string()),
            bounds: AxisBounds::closed(-10.0, 10.0, -10.0, 10.0),
        },
        creator(),
    )
}

#[test]
fn plot_and_lookup_roundtrip() {
    let mut chart = axis_chart();

    chart.plot_point("A", Coordinate::planar(5.0, 5.0)).unwrap();

    let stored = chart.lookup("A").unwrap();
    assert_eq!(*stored, Coordinate::planar(5.0, 5.0));
    assert_eq!(chart.point_count(), 1);
}

#[test]
fn out_of_bounds_point_is_rejected_with_bounds_in_message() {
    let mut chart = axis_chart();

    let err = chart
        .plot_point("B", Coordinate::planar(11.0, 0.0))
        .unwrap_err();

    assert!(matches!(err, ChartError::OutOfBounds(_)));
    assert!(err.to_string().contains("[-10, 10]"));
    assert_eq!(chart.point_count(), 0);
}

#[test]
fn error_margins_must_stay_in_bounds() {
    let mut chart = axis_chart();

    let err = chart
        .plot_point(
            "C",
            Coordinate::Planar(PlanarPoint::with_error(9.0, 0.0, 2.0, 0.0)),
        )
        .unwrap_err();
    assert!(matches!(err, ChartError::OutOfBounds(_)));

    chart
        .plot_point(
            "C",
            Coordinate::Planar(PlanarPoint::with_error(7.0, 0.0, 2.0, 0.0)),
        )
        .unwrap();
}

#[test]
fn replot_same_label_overwrites_in_place() {
    let mut chart = axis_chart();

    chart.plot_point("first", Coordinate::planar(1.0, 1.0)).unwrap();
    chart.plot_point("second", Coordinate::planar(2.0, 2.0)).unwrap();
    chart.plot_point("first", Coordinate::planar(-3.0, 4.0)).unwrap();

    assert_eq!(chart.point_count(), 2);
    assert_eq!(*chart.lookup("first").unwrap(), Coordinate::planar(-3.0, 4.0));

    let order: Vec<String> = chart.points().into_iter().map(|p| p.label).collect();
    assert_eq!(order, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn remove_unplotted_label_fails() {
    let mut chart = axis_chart();

    let err = chart.remove_point("ghost").unwrap_err();
    assert_eq!(err, ChartError::UnknownLabel("ghost".to_string()));
}

#[test]
fn remove_then_lookup_fails() {
    let mut chart = axis_chart();
    chart.plot_point("A", Coordinate::planar(0.0, 0.0)).unwrap();

    chart.remove_point("A").unwrap();

    assert!(chart.is_empty());
    assert!(matches!(chart.lookup("A"), Err(ChartError::UnknownLabel(_))));
}

#[test]
fn open_bounds_accept_anything_on_that_side() {
    let mut chart = Chart::new(
        ChartShape::Axis {
            x_left: None,
            x_right: None,
            y_bottom: None,
            y_top: None,
            bounds: AxisBounds {
                max_y: Some(5.0),
                ..AxisBounds::default()
            },
        },
        creator(),
    );

    chart
        .plot_point("far", Coordinate::planar(1e6, -1e6))
        .unwrap();
    let err = chart
        .plot_point("high", Coordinate::planar(0.0, 5.5))
        .unwrap_err();
    assert!(err.to_string().contains("[_, 5]"));
}

#[test]
fn boxed_chart_uses_the_fixed_square() {
    let mut chart = Chart::new(
        ChartShape::Boxed {
            horizontal: ["h1".to_string(), "h2".to_string(), "h3".to_string()],
            vertical: ["v1".to_string(), "v2".to_string(), "v3".to_string()],
        },
        creator(),
    );

    chart.plot_point("in", Coordinate::planar(-10.0, 10.0)).unwrap();
    let err = chart
        .plot_point("out", Coordinate::planar(0.0, 10.5))
        .unwrap_err();
    assert!(err.to_string().contains("[-10, 10]"));
}

#[test]
fn planar_chart_rejects_radial_values() {
    let mut chart = axis_chart();

    let err = chart
        .plot_point("vec", Coordinate::Radial(vec![1.0, 2.0]))
        .unwrap_err();
    assert_eq!(err, ChartError::CoordinateKind { expected: "planar" });
}

#[test]
fn creator_and_timestamps_are_editable() {
    let mut chart = axis_chart();
    assert_eq!(chart.creator().username, "maker");
    assert_eq!(chart.last_modified(), None);

    chart.set_creator(Creator {
        username: "new_owner".to_string(),
        user_id: 7,
    });
    chart.set_last_modified(1_700_000_000_000);

    assert_eq!(chart.creator().user_id, 7);
    assert_eq!(chart.last_modified(), Some(1_700_000_000_000));
}
