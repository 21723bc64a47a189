//! # Tabular rendering
//!
//! Terminal tables for the species database and for the per-species diagnostics of a
//! sublimation estimate, built with [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/)
//! using the `UTF8_FULL` preset and dynamic column widths.
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
    sublimation::{SublimationResult, Verdict},
    volatiles::SpeciesTable,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn opt_sci(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.3e}")).unwrap_or_else(|| "—".to_string())
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Render the species table (thermal parameters and vapor-pressure law of every entry).
pub fn render_species_table(table: &SpeciesTable) -> String {
    species_table(table).to_string()
}

/// Render the per-species verdicts of an estimate.
pub fn render_verdicts(result: &SublimationResult) -> String {
    verdict_table(result).to_string()
}

fn species_table(table: &SpeciesTable) -> Table {
    let mut out = new_table();
    out.set_header(vec![
        Cell::new("#"),
        Cell::new("Species"),
        Cell::new("H"),
        Cell::new("μ [g/mol]"),
        Cell::new("P0 [Pa]"),
        Cell::new("P_ref [Pa]"),
        Cell::new("β [K]"),
        Cell::new("T_ref [K]"),
        Cell::new("Comment"),
    ]);

    for (i, sp) in table.iter().enumerate() {
        let law = &sp.vapor_pressure;
        out.add_row(Row::from(vec![
            right(i.to_string()),
            Cell::new(&sp.name),
            right(opt_sci(sp.enthalpy)),
            right(sp.molar_mass.map(|m| format!("{m:.1}")).unwrap_or_else(|| "—".into())),
            right(opt_sci(sp.reference_pressure)),
            right(format!("{:.3e}", law.p_ref)),
            right(format!("{:.1}", law.beta)),
            right(format!("{:.1}", law.t_ref)),
            Cell::new(&sp.comment),
        ]));
    }

    out
}

fn verdict_table(result: &SublimationResult) -> Table {
    let mut out = new_table();
    out.set_header(vec![
        Cell::new("Species"),
        Cell::new("T_sub [K]"),
        Cell::new("T_total [K]"),
        Cell::new("P_vap [Pa]"),
        Cell::new("Verdict"),
    ]);

    for sv in &result.species {
        let (pressure, label) = match sv.verdict {
            Verdict::BelowThreshold => (None, "below threshold"),
            Verdict::SuppressedByAtmosphere { vapor_pressure_pa } => {
                (Some(vapor_pressure_pa), "suppressed by atmosphere")
            }
            Verdict::Sublimating { vapor_pressure_pa } => (vapor_pressure_pa, "sublimating"),
        };
        out.add_row(Row::from(vec![
            Cell::new(&sv.name),
            right(format!("{:.2}", sv.threshold_temperature_k)),
            right(format!("{:.2}", result.total_temperature_k)),
            right(opt_sci(pressure)),
            Cell::new(label),
        ]));
    }

    out
}

#[cfg(test)]
mod display_test {
    use super::*;
    use crate::{
        distance::Distance,
        sublimation::{SublimationEstimator, SublimationInput},
    };

    #[test]
    fn test_species_table_lists_every_entry() {
        let table = SpeciesTable::builtin();
        let text = species_table(&table).set_width(400).to_string();
        for sp in table.iter() {
            assert!(text.contains(&sp.name), "missing {}", sp.name);
        }
        assert!(text.contains("T_ref [K]"));
    }

    #[test]
    fn test_verdicts_table() {
        let input = SublimationInput::new(1.0, Distance::earth_radii(1.0), Some(200.0)).unwrap();
        let result = SublimationEstimator::default().estimate(&input).unwrap();
        let text = verdict_table(&result).set_width(200).to_string();
        assert!(text.contains("sublimating"));
        assert!(text.contains("suppressed by atmosphere"));
        assert!(text.contains("200.00"));
        assert!(text.contains("below threshold"));
    }
}
