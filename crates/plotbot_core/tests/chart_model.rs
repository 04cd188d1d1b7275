use plotbot_core::{AxisBounds, Chart, ChartShape, Coordinate, Creator, PlanarPoint};
use uuid::Uuid;

fn creator() -> Creator {
    Creator {
        username: "maker".to_string(),
        user_id: 42,
    }
}

#[test]
fn with_id_keeps_the_provided_identity() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let chart = Chart::with_id(
        id,
        ChartShape::Radar {
            axes: vec!["a".to_string()],
        },
        creator(),
    );

    assert_eq!(chart.id(), id);
    assert_eq!(chart.title(), None);
    assert!(!chart.custom_points());
    assert!(chart.is_empty());
}

#[test]
fn new_charts_get_distinct_ids() {
    let shape = ChartShape::Triangle {
        x_left: None,
        x_right: None,
        y_top: None,
    };
    let first = Chart::new(shape.clone(), creator());
    let second = Chart::new(shape, creator());
    assert_ne!(first.id(), second.id());
}

#[test]
fn chart_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut chart = Chart::with_id(
        id,
        ChartShape::Axis {
            x_left: Some("left".to_string()),
            x_right: None,
            y_bottom: None,
            y_top: None,
            bounds: AxisBounds::closed(-10.0, 10.0, -10.0, 10.0),
        },
        creator(),
    );
    chart.set_title(Some("wire check".to_string()));
    chart
        .plot_point(
            "bob",
            Coordinate::Planar(PlanarPoint::with_error(1.0, 2.0, 0.5, 0.0)),
        )
        .unwrap();
    chart.set_last_modified(1_700_000_000_000);

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "wire check");
    assert_eq!(json["shape"]["shape"], "axis");
    assert_eq!(json["shape"]["x_left"], "left");
    assert_eq!(json["shape"]["bounds"]["min_x"], -10.0);
    assert_eq!(json["created_by"]["username"], "maker");
    assert_eq!(json["created_by"]["user_id"], 42);
    assert_eq!(json["last_modified"], 1_700_000_000_000_i64);
    assert_eq!(json["points"]["bob"]["planar"]["x"], 1.0);
    assert_eq!(json["points"]["bob"]["planar"]["err_x"], 0.5);

    let decoded: Chart = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, chart);
}

#[test]
fn radial_coordinates_serialize_as_plain_vectors() {
    let mut chart = Chart::new(
        ChartShape::Radar {
            axes: vec!["a".to_string(), "b".to_string()],
        },
        creator(),
    );
    chart
        .plot_point("bob", Coordinate::Radial(vec![1.0, 9.0]))
        .unwrap();

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["shape"]["shape"], "radar");
    assert_eq!(json["points"]["bob"]["radial"][1], 9.0);
}

#[test]
fn ledger_state_survives_a_roundtrip() {
    let mut chart = Chart::new(
        ChartShape::Boxed {
            horizontal: ["a".to_string(), "b".to_string(), "c".to_string()],
            vertical: ["d".to_string(), "e".to_string(), "f".to_string()],
        },
        creator(),
    );
    chart.grant_consent(7, "bob");
    chart.contribute(8, "bob", Coordinate::planar(2.0, 2.0)).unwrap();

    let json = serde_json::to_value(&chart).unwrap();
    let decoded: Chart = serde_json::from_value(json).unwrap();

    assert_eq!(decoded, chart);
    assert_eq!(decoded.consented_labels(), vec!["bob"]);
    assert_eq!(decoded.effective_points(), chart.effective_points());
}
