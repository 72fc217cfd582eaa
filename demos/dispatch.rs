//! Example: economic dispatch for a three-unit fleet.
//!
//! Run with:
//! `cargo run --example dispatch`

use dispatch_dp::dispatch::{DispatchTables, Fleet, UnitCostTable};

fn main() {
    // Rows are a, b, c, pu, pl with cost = a·x² + b·x + c ($/h).
    let rows = [
        [0.0070, 7.0, 240.0, 90.0, 20.0],
        [0.0095, 10.0, 200.0, 70.0, 15.0],
        [0.0090, 8.5, 220.0, 60.0, 10.0],
    ];
    let fleet = Fleet::from_rows(&rows).expect("valid unit data");
    println!(
        "{} units, p_min = {} MW, p_max = {} MW",
        fleet.len(),
        fleet.p_min(),
        fleet.p_max()
    );

    let tables = DispatchTables::solve(&fleet);
    let boundless = UnitCostTable::build_boundless(&fleet);

    let step = ((fleet.p_max() - fleet.p_min()) / 4).max(1);
    for demand in (fleet.p_min()..=fleet.p_max()).step_by(step) {
        match tables.dispatch(demand).expect("demand within capacity") {
            Some(d) => {
                println!("demand {:4} MW  cost {:10.2}  outputs {:?}", demand, d.cost, d.allocation);
                for (unit, curve) in boundless.rows().enumerate() {
                    println!("    unit {} alone (no limits): {:10.2}", unit + 1, curve[demand]);
                }
            }
            None => println!("demand {demand:4} MW  unreachable"),
        }
    }
}
