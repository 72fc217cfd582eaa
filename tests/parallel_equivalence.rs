#![cfg(feature = "parallel")]

use dispatch_dp::{
    builder::LayerEngineBuilder,
    dispatch::{DispatchProblem, DispatchTables, Fleet, Unit},
};
use proptest::prelude::*;

fn fleet_strategy() -> impl Strategy<Value = Fleet> {
    proptest::collection::vec((0u32..50, 0u32..40, 0u32..60, 0u32..15, 0u32..25), 1..7).prop_map(
        |rows| {
            let units = rows
                .into_iter()
                .map(|(a, b, c, pl, span)| {
                    Unit::new(a as f64 / 100.0, b as f64 / 10.0, c as f64, pl, pl + span).unwrap()
                })
                .collect();
            Fleet::new(units).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn chunking_does_not_change_tables(fleet in fleet_strategy(), chunk in 1usize..17) {
        let default = DispatchTables::solve(&fleet);
        let engine = LayerEngineBuilder::new(DispatchProblem::new(&fleet))
            .with_min_chunk(chunk)
            .build();
        prop_assert_eq!(engine.min_chunk(), chunk);
        let chunked = DispatchTables::solve_with(&engine);
        prop_assert_eq!(default, chunked);
    }
}

#[test]
fn single_cell_chunks_match_whole_row_chunks() {
    let fleet = Fleet::new(vec![
        Unit::new(0.008, 7.0, 200.0, 10, 85).unwrap(),
        Unit::new(0.009, 6.3, 180.0, 10, 80).unwrap(),
        Unit::new(0.007, 6.8, 140.0, 10, 70).unwrap(),
    ])
    .unwrap();
    let width = fleet.p_max() + 1;
    let fine = LayerEngineBuilder::new(DispatchProblem::new(&fleet))
        .with_min_chunk(1)
        .build();
    let coarse = LayerEngineBuilder::new(DispatchProblem::new(&fleet))
        .with_min_chunk(width)
        .build();
    assert_eq!(coarse.min_chunk(), width);
    assert_eq!(
        DispatchTables::solve_with(&fine),
        DispatchTables::solve_with(&coarse)
    );
}
