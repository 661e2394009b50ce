use super::config::SelectionThresholds;
use crate::core::io::table::SelectionRow;
use crate::core::models::model::Model;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// A selected model together with the positions it covers that no earlier selection did.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'m> {
    pub model: &'m Model,
    pub positions: BTreeSet<isize>,
}

impl Selection<'_> {
    pub fn to_row(&self) -> SelectionRow {
        SelectionRow::new(self.model, &self.positions)
    }
}

/// Greedily picks a non-redundant set of models covering as much of a target as possible.
///
/// Models are filtered by [`SelectionThresholds`], ranked by QMEAN6 Z-score with models of the
/// target sequence itself ahead of all homology models, and then accepted one by one as long
/// as they add at least one position not already covered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSelector {
    thresholds: SelectionThresholds,
}

impl ModelSelector {
    pub fn new(thresholds: SelectionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SelectionThresholds {
        &self.thresholds
    }

    /// A model passes only when it strictly exceeds every threshold.
    pub fn passes(&self, model: &Model) -> bool {
        model.coverage > self.thresholds.min_coverage
            && model.seq_id > self.thresholds.min_seq_id
            && model.qmean6_z > self.thresholds.min_qmean_z
    }

    /// Filters and orders the candidates: direct models first, then homology models, each
    /// group by descending QMEAN6 Z-score. Equal scores keep their input order.
    pub fn rank<'m>(&self, models: &'m [Model]) -> Vec<&'m Model> {
        let mut ranked: Vec<&Model> = models.iter().filter(|m| self.passes(m)).collect();
        ranked.sort_by(|a, b| {
            b.qmean6_z
                .partial_cmp(&a.qmean6_z)
                .unwrap_or(Ordering::Equal)
        });

        let (mut direct, homology): (Vec<&Model>, Vec<&Model>) =
            ranked.into_iter().partition(|m| m.is_direct());
        direct.extend(homology);
        direct
    }

    pub fn select<'m>(&self, models: &'m [Model]) -> Vec<Selection<'m>> {
        let ranked = self.rank(models);
        debug!(
            "{} of {} candidate models pass the quality thresholds",
            ranked.len(),
            models.len()
        );

        let mut covered: BTreeSet<isize> = BTreeSet::new();
        let mut selections = Vec::new();
        for model in ranked {
            let new_positions: BTreeSet<isize> = model
                .covered_positions()
                .difference(&covered)
                .copied()
                .collect();

            if new_positions.is_empty() {
                trace!("Model {} adds no new positions, skipping", model.number);
                continue;
            }

            covered.extend(new_positions.iter().copied());
            selections.push(Selection {
                model,
                positions: new_positions,
            });
        }
        selections
    }
}
