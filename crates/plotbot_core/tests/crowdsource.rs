use plotbot_core::{
    AxisBounds, Chart, ChartError, ChartShape, ConsentChange, Coordinate, Creator,
};

fn chart() -> Chart {
    Chart::new(
        ChartShape::Axis {
            x_left: None,
            x_right: None,
            y_bottom: None,
            y_top: None,
            bounds: AxisBounds::closed(-10.0, 10.0, -10.0, 10.0),
        },
        Creator {
            username: "maker".to_string(),
            user_id: 99,
        },
    )
}

const ALICE: i64 = 1;
const CAROL: i64 = 3;

#[test]
fn consent_toggles_between_grant_and_revoke() {
    let mut chart = chart();

    assert_eq!(chart.grant_consent(ALICE, "bob"), ConsentChange::Granted);
    assert_eq!(chart.consented_labels(), vec!["bob"]);

    assert_eq!(chart.grant_consent(ALICE, "bob"), ConsentChange::Revoked);
    assert!(chart.consented_labels().is_empty());
}

#[test]
fn revoking_unknown_consent_fails() {
    let mut chart = chart();

    let err = chart.revoke_consent(ALICE, "bob").unwrap_err();
    assert_eq!(
        err,
        ChartError::ConsentNotGranted {
            user_id: ALICE,
            label: "bob".to_string(),
        }
    );
}

#[test]
fn contribution_without_consent_fails_even_when_coordinate_is_valid() {
    let mut chart = chart();

    let err = chart
        .contribute(CAROL, "bob", Coordinate::planar(3.0, 4.0))
        .unwrap_err();
    assert_eq!(err, ChartError::ConsentMissing("bob".to_string()));
    assert!(chart.contributions("bob").is_err());
}

#[test]
fn contribution_out_of_bounds_fails_despite_consent() {
    let mut chart = chart();
    chart.grant_consent(ALICE, "bob");

    let err = chart
        .contribute(CAROL, "bob", Coordinate::planar(11.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, ChartError::OutOfBounds(_)));
}

#[test]
fn fold_averages_base_point_with_contributions() {
    let mut chart = chart();
    chart.plot_point("bob", Coordinate::planar(1.0, 1.0)).unwrap();
    chart.grant_consent(ALICE, "bob");
    chart
        .contribute(ALICE, "bob", Coordinate::planar(3.0, 4.0))
        .unwrap();

    let effective = chart.effective_points();
    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].coordinate, Coordinate::planar(2.0, 2.5));

    // Folding is derived; the stored point is untouched.
    assert_eq!(*chart.lookup("bob").unwrap(), Coordinate::planar(1.0, 1.0));
}

#[test]
fn fold_without_contributions_equals_raw_points() {
    let mut chart = chart();
    chart.plot_point("a", Coordinate::planar(1.0, 2.0)).unwrap();
    chart.plot_point("b", Coordinate::planar(-3.0, 5.0)).unwrap();

    assert_eq!(chart.effective_points(), chart.points());
}

#[test]
fn fold_synthesizes_zero_error_point_without_base() {
    let mut chart = chart();
    chart.grant_consent(ALICE, "ghost");
    chart
        .contribute(ALICE, "ghost", Coordinate::planar(2.0, 6.0))
        .unwrap();
    chart
        .contribute(CAROL, "ghost", Coordinate::planar(4.0, 2.0))
        .unwrap();

    let effective = chart.effective_points();
    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].label, "ghost");
    assert_eq!(effective[0].coordinate, Coordinate::planar(3.0, 4.0));
}

#[test]
fn repeated_contribution_overwrites_not_accumulates() {
    let mut chart = chart();
    chart.plot_point("bob", Coordinate::planar(0.0, 0.0)).unwrap();
    chart.grant_consent(ALICE, "bob");

    chart
        .contribute(ALICE, "bob", Coordinate::planar(8.0, 8.0))
        .unwrap();
    chart
        .contribute(ALICE, "bob", Coordinate::planar(4.0, 4.0))
        .unwrap();

    let effective = chart.effective_points();
    assert_eq!(effective[0].coordinate, Coordinate::planar(2.0, 2.0));
}

#[test]
fn removing_a_point_purges_its_contributions() {
    let mut chart = chart();
    chart.plot_point("bob", Coordinate::planar(1.0, 1.0)).unwrap();
    chart.grant_consent(ALICE, "bob");
    chart
        .contribute(ALICE, "bob", Coordinate::planar(3.0, 3.0))
        .unwrap();

    chart.remove_point("bob").unwrap();

    assert!(matches!(
        chart.contributions("bob"),
        Err(ChartError::NoContributions(_))
    ));
    // Consent survives point removal.
    assert_eq!(chart.consented_labels(), vec!["bob"]);
}

#[test]
fn removing_contributions_validates_label_and_contributor() {
    let mut chart = chart();
    chart.grant_consent(ALICE, "bob");

    let err = chart.remove_contribution(ALICE, "bob").unwrap_err();
    assert_eq!(err, ChartError::NoContributions("bob".to_string()));

    chart
        .contribute(ALICE, "bob", Coordinate::planar(1.0, 1.0))
        .unwrap();
    let err = chart.remove_contribution(CAROL, "bob").unwrap_err();
    assert_eq!(
        err,
        ChartError::ContributionMissing {
            user_id: CAROL,
            label: "bob".to_string(),
        }
    );

    chart.remove_contribution(ALICE, "bob").unwrap();
}

#[test]
fn contributions_view_lists_each_contributor() {
    let mut chart = chart();
    chart.grant_consent(ALICE, "bob");
    chart
        .contribute(ALICE, "bob", Coordinate::planar(1.0, 1.0))
        .unwrap();
    chart
        .contribute(CAROL, "bob", Coordinate::planar(2.0, 2.0))
        .unwrap();

    let table = chart.contributions("bob").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[&ALICE], Coordinate::planar(1.0, 1.0));
    assert_eq!(table[&CAROL], Coordinate::planar(2.0, 2.0));
}

#[test]
fn fold_matches_contribution_keys_without_spaces() {
    let mut chart = chart();
    chart
        .plot_point("John Smith", Coordinate::planar(0.0, 0.0))
        .unwrap();
    chart.grant_consent(ALICE, "JohnSmith");
    chart
        .contribute(ALICE, "JohnSmith", Coordinate::planar(4.0, 4.0))
        .unwrap();

    let effective = chart.effective_points();
    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].label, "John Smith");
    assert_eq!(effective[0].coordinate, Coordinate::planar(2.0, 2.0));
}
