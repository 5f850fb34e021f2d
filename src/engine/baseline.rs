//! Pure-type baselines and the cup-vs-baseline comparison.

use serde::Serialize;

use crate::engine::calculator::{Form, FormTable, RoleAssignment};
use crate::matrix::lookup::{normalize_key, Lookup, TypeName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseTypeSum {
    pub type_name: String,
    pub sum: i32,
}

/// One baseline per defender type, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BaseTypeSums {
    entries: Vec<BaseTypeSum>,
}

impl BaseTypeSums {
    pub fn entries(&self) -> &[BaseTypeSum] {
        &self.entries
    }

    /// Baseline for a type name (case-insensitive). Unknown types read as 0.
    /// With duplicate names the last column wins, matching the lookup.
    pub fn sum_for(&self, type_name: &str) -> i32 {
        let key = normalize_key(type_name);
        self.entries
            .iter()
            .rev()
            .find(|entry| normalize_key(&entry.type_name) == key)
            .map(|entry| entry.sum)
            .unwrap_or(0)
    }
}

/// Flat sum of every attacker's weight against each pure type.
/// No immune override applies here.
pub fn base_type_sums(lookup: &Lookup, types: &[TypeName]) -> BaseTypeSums {
    let entries = types
        .iter()
        .map(|defender| BaseTypeSum {
            type_name: defender.display.clone(),
            sum: types
                .iter()
                .map(|attacker| lookup.symbol(&attacker.key, &defender.key).base_weight())
                .sum(),
        })
        .collect();
    BaseTypeSums { entries }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CupSummary {
    pub form: Form,
    pub type_name: String,
    pub cup_sum: i32,
    pub base_sum: i32,
    /// Negative means the combined form resists better than the pure type.
    pub delta: i32,
}

pub fn summarize(
    forms: &[FormTable],
    roles: &RoleAssignment,
    baselines: &BaseTypeSums,
) -> Vec<CupSummary> {
    forms
        .iter()
        .map(|table| {
            let type_name = roles.primary(table.form).to_string();
            let cup_sum: i32 = table.rows.iter().map(|row| row.total).sum();
            let base_sum = baselines.sum_for(&type_name);
            CupSummary {
                form: table.form,
                type_name,
                cup_sum,
                base_sum,
                delta: cup_sum - base_sum,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculator::compute_chart;
    use crate::matrix::lookup::MatrixSnapshot;

    #[test]
    fn baseline_has_no_immune_override() {
        let snapshot = MatrixSnapshot::from_text(
            "Attacker,Fire,Ice,Wind\nFire,X,W,R\nIce,R,W,N\nWind,R,R,x",
        )
        .expect("snapshot");
        let sums = snapshot.baselines();
        assert_eq!(sums.sum_for("Fire"), -100 - 50 - 50);
        assert_eq!(sums.sum_for("Ice"), 50 + 50 - 50);
        assert_eq!(sums.sum_for("WIND"), -50 + 0 - 100);
        assert_eq!(sums.sum_for("Thunder"), 0);
        let order: Vec<&str> = sums.entries().iter().map(|e| e.type_name.as_str()).collect();
        assert_eq!(order, vec!["Fire", "Ice", "Wind"]);
    }

    #[test]
    fn summary_delta_is_cup_minus_base() {
        let snapshot =
            MatrixSnapshot::from_text("Attacker,Fire,Ice\nFire,N,W\nIce,R,N").expect("snapshot");
        let roles = RoleAssignment::new("Fire", "Fire", "Ice");
        let chart = compute_chart(&snapshot, &roles, "Goddess").expect("chart");

        let meso = chart.summary(Form::Meso).expect("meso");
        assert_eq!(meso.type_name, "Fire");
        assert_eq!(meso.cup_sum, 25 + -75);
        assert_eq!(meso.base_sum, -50);
        assert_eq!(meso.delta, 0);

        let omega = chart.summary(Form::Omega).expect("omega");
        assert_eq!(omega.type_name, "Ice");
        // Fire attacker: W N N = 50; Ice attacker: N R R = -50.
        assert_eq!(omega.cup_sum, 0);
        assert_eq!(omega.base_sum, 50);
        assert_eq!(omega.delta, -50);
    }
}
