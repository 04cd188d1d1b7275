//! Crowdsource consent and contribution ledger.
//!
//! # Responsibility
//! - Track which labels have consented to being crowdsource-plotted.
//! - Record per-contributor coordinates and fold them into effective
//!   points for rendering.
//!
//! # Invariants
//! - Consent entries are unique per `(user, label)` pair and keep grant
//!   order.
//! - `fold` never mutates stored points or ledger state.

use crate::model::point::{normalize_label, Coordinate, PlanarPoint, Point};
use crate::model::UserId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of a consent toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChange {
    Granted,
    Revoked,
}

/// Per-chart consent set and contribution table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrowdsourceLedger {
    consent: Vec<(UserId, String)>,
    contributions: IndexMap<String, IndexMap<UserId, Coordinate>>,
}

impl CrowdsourceLedger {
    /// Whether anyone has recorded consent for `label`.
    pub fn has_consent_for(&self, label: &str) -> bool {
        self.consent.iter().any(|(_, consented)| consented == label)
    }

    /// Whether the exact `(user, label)` consent pair is recorded.
    pub fn consent_recorded(&self, user_id: UserId, label: &str) -> bool {
        self.consent
            .iter()
            .any(|(id, consented)| *id == user_id && consented == label)
    }

    /// Toggles consent: an existing exact pair is revoked, otherwise the
    /// pair is appended.
    pub fn toggle_consent(&mut self, user_id: UserId, label: impl Into<String>) -> ConsentChange {
        let label = label.into();
        if self.consent_recorded(user_id, &label) {
            self.consent
                .retain(|(id, consented)| !(*id == user_id && *consented == label));
            ConsentChange::Revoked
        } else {
            self.consent.push((user_id, label));
            ConsentChange::Granted
        }
    }

    /// Removes the exact consent pair; `false` when it was never recorded.
    pub fn revoke_consent(&mut self, user_id: UserId, label: &str) -> bool {
        let before = self.consent.len();
        self.consent
            .retain(|(id, consented)| !(*id == user_id && consented == label));
        self.consent.len() != before
    }

    /// Labels with recorded consent, in grant order.
    pub fn consented_labels(&self) -> Vec<&str> {
        self.consent
            .iter()
            .map(|(_, label)| label.as_str())
            .collect()
    }

    /// Stores or overwrites one contributor's coordinate for `label`.
    ///
    /// Consent and bounds checks are the chart's responsibility; the
    /// ledger only records.
    pub fn record_contribution(
        &mut self,
        contributor: UserId,
        label: impl Into<String>,
        coordinate: Coordinate,
    ) {
        self.contributions
            .entry(label.into())
            .or_default()
            .insert(contributor, coordinate);
    }

    /// Contributor table for `label`, if anyone has contributed.
    pub fn contribution_table(&self, label: &str) -> Option<&IndexMap<UserId, Coordinate>> {
        self.contributions.get(label)
    }

    /// Deletes one contributor's entry for `label`, if present.
    pub fn delete_contribution(&mut self, contributor: UserId, label: &str) {
        if let Some(table) = self.contributions.get_mut(label) {
            table.shift_remove(&contributor);
        }
    }

    /// Drops every contribution recorded for a removed point.
    ///
    /// Contribution keys may carry the space-stripped form of the point's
    /// label, so both spellings are purged.
    pub fn purge_contributions(&mut self, point_label: &str) {
        let normalized = normalize_label(point_label);
        self.contributions
            .shift_remove_entry(point_label);
        if normalized != point_label {
            self.contributions.shift_remove_entry(normalized.as_str());
        }
    }

    /// Folds contributions into the base point list.
    ///
    /// Base points keep their position, label and error margins; labels
    /// with contributions but no base point are appended as synthesized
    /// zero-error points. With no contributions the result is value-equal
    /// to the base list.
    pub fn fold(&self, base: &IndexMap<String, Coordinate>) -> Vec<Point> {
        let mut effective: Vec<Point> = base
            .iter()
            .map(|(label, coordinate)| Point {
                label: label.clone(),
                coordinate: coordinate.clone(),
            })
            .collect();

        for (label, table) in &self.contributions {
            if table.is_empty() {
                continue;
            }

            let base_slot = effective
                .iter()
                .position(|point| normalize_label(&point.label) == *label);

            match base_slot {
                Some(slot) => {
                    if let Some(folded) =
                        fold_coordinates(Some(&effective[slot].coordinate), table)
                    {
                        effective[slot].coordinate = folded;
                    }
                }
                None => {
                    if let Some(folded) = fold_coordinates(None, table) {
                        effective.push(Point {
                            label: label.clone(),
                            coordinate: folded,
                        });
                    }
                }
            }
        }

        effective
    }
}

/// Averages a base coordinate (when present) with every contribution of a
/// matching kind. Planar folds preserve the base error margins; radial
/// folds are element-wise means.
fn fold_coordinates(
    base: Option<&Coordinate>,
    contributed: &IndexMap<UserId, Coordinate>,
) -> Option<Coordinate> {
    let template = base.or_else(|| contributed.values().next())?;

    match template {
        Coordinate::Planar(_) => {
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            let mut count = 0.0;
            let mut margins = (0.0, 0.0);

            if let Some(Coordinate::Planar(point)) = base {
                sum_x += point.x;
                sum_y += point.y;
                count += 1.0;
                margins = (point.err_x, point.err_y);
            }
            for coordinate in contributed.values() {
                if let Coordinate::Planar(point) = coordinate {
                    sum_x += point.x;
                    sum_y += point.y;
                    count += 1.0;
                }
            }

            (count > 0.0).then(|| {
                Coordinate::Planar(PlanarPoint::with_error(
                    sum_x / count,
                    sum_y / count,
                    margins.0,
                    margins.1,
                ))
            })
        }
        Coordinate::Radial(template_values) => {
            let arity = template_values.len();
            let mut sums = vec![0.0; arity];
            let mut count = 0.0;

            if let Some(Coordinate::Radial(values)) = base {
                for (sum, value) in sums.iter_mut().zip(values) {
                    *sum += value;
                }
                count += 1.0;
            }
            for coordinate in contributed.values() {
                if let Coordinate::Radial(values) = coordinate {
                    if values.len() == arity {
                        for (sum, value) in sums.iter_mut().zip(values) {
                            *sum += value;
                        }
                        count += 1.0;
                    }
                }
            }

            (count > 0.0)
                .then(|| Coordinate::Radial(sums.into_iter().map(|sum| sum / count).collect()))
        }
    }
}
