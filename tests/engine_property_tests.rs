//! Property tests for scoring, snapping and baselines.

use amo::engine::{
    reaction_for, score_total, snap, Form, Reaction, RoleAssignment, Symbol, REACTION_SCALE,
};
use amo::matrix::MatrixSnapshot;
use proptest::prelude::*;

fn symbol() -> impl Strategy<Value = Symbol> {
    prop::sample::select(Symbol::ALL.to_vec())
}

fn letter() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["W", "R", "N", "X", "w", "x", "", "?"])
}

/// Random square matrix over `n` types named T0..Tn.
fn matrix_text() -> impl Strategy<Value = (usize, String)> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(letter(), n * n).prop_map(move |cells| {
            let names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
            let mut text = format!("Attacker,{}", names.join(","));
            for (i, name) in names.iter().enumerate() {
                text.push('\n');
                text.push_str(name);
                for cell in &cells[i * n..(i + 1) * n] {
                    text.push(',');
                    text.push_str(cell);
                }
            }
            (n, text)
        })
    })
}

proptest! {
    #[test]
    fn prop_score_is_unit_and_secondary_x_matches_r(s in symbol()) {
        prop_assert!((-1..=1).contains(&s.score()));
        prop_assert_eq!(Symbol::Exception.as_secondary().score(), Symbol::Resist.score());
    }

    #[test]
    fn prop_active_exception_is_always_immune(a in symbol(), o in symbol()) {
        prop_assert_eq!(score_total(Symbol::Exception, a.as_secondary(), o.as_secondary()), -100);
    }

    #[test]
    fn prop_totals_are_multiples_of_25_in_range(m in symbol(), a in symbol(), o in symbol()) {
        let total = score_total(m, a.as_secondary(), o.as_secondary());
        prop_assert!((-100..=100).contains(&total));
        prop_assert_eq!(total % 25, 0);
        let (value, _) = snap(total);
        prop_assert_eq!(value, total, "achievable totals are already canonical");
    }

    #[test]
    fn prop_snap_picks_nearest_then_lower(total in -150i32..=150) {
        let (value, reaction) = snap(total);
        let distance = (total - value).abs();
        for (candidate, _) in REACTION_SCALE {
            let d = (total - candidate).abs();
            prop_assert!(d >= distance);
            if d == distance {
                prop_assert!(candidate >= value);
            }
        }
        prop_assert_eq!(reaction_for(total), reaction);
    }

    #[test]
    fn prop_baseline_bounded_by_type_count((n, text) in matrix_text()) {
        let snapshot = MatrixSnapshot::from_text(&text).expect("snapshot");
        let n = n as i32;
        for entry in snapshot.baselines().entries() {
            prop_assert!(entry.sum >= -100 * n && entry.sum <= 50 * n);
        }
    }

    #[test]
    fn prop_one_row_per_type_per_form((n, text) in matrix_text(), picks in prop::array::uniform3(0usize..8)) {
        let snapshot = MatrixSnapshot::from_text(&text).expect("snapshot");
        let names = snapshot.type_names();
        let [m, a, o] = picks.map(|i| names[i % n].to_string());
        let chart = amo::engine::compute_chart(&snapshot, &RoleAssignment::new(m, a, o), "P")
            .expect("chart");
        for form in Form::ALL {
            let rows = chart.form(form);
            prop_assert_eq!(rows.len(), n);
            for row in rows {
                prop_assert_eq!(row.reaction, reaction_for(row.total));
                if row.active == Symbol::Exception {
                    prop_assert_eq!(row.reaction, Reaction::Immune);
                }
                prop_assert!(row.secondary1 != Symbol::Exception);
                prop_assert!(row.secondary2 != Symbol::Exception);
            }
        }
    }
}
