//! Micro-benchmarks for technique searches and the exact-cover engine.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench techniques
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sudoq_core::{Pos, Puzzle};
use sudoq_solver::{
    Dlx, Solver,
    technique::{HiddenSingle, NakedPair, Technique, XWing},
    testing::parse_puzzle,
};

const EASY: &str = "530 070 000
                    600 195 000
                    098 000 060
                    800 060 003
                    400 803 001
                    700 020 006
                    060 000 280
                    000 419 005
                    000 080 079";

fn keep_only(solver: &mut Solver, pos: Pos, keep: &[u8]) {
    for value in 1..=9 {
        if !keep.contains(&value) {
            solver.remove_cell_candidate(pos, value).unwrap();
        }
    }
}

fn hidden_single_solver() -> Solver {
    let mut solver = Solver::new(Puzzle::new()).unwrap();
    for col in 1..9 {
        solver.remove_cell_candidate(Pos::new(0, col), 2).unwrap();
    }
    solver
}

fn naked_pair_solver() -> Solver {
    let mut solver = Solver::new(Puzzle::new()).unwrap();
    keep_only(&mut solver, Pos::new(0, 0), &[1, 2]);
    keep_only(&mut solver, Pos::new(0, 3), &[1, 2]);
    solver
}

fn x_wing_solver() -> Solver {
    let mut solver = Solver::new(Puzzle::new()).unwrap();
    for row in [1, 4] {
        for col in 0..9 {
            if col != 2 && col != 6 {
                solver.remove_cell_candidate(Pos::new(row, col), 5).unwrap();
            }
        }
    }
    solver
}

fn bench_technique_find(c: &mut Criterion) {
    let cases: [(&str, fn() -> Solver, &dyn Technique); 4] = [
        ("hidden_single", hidden_single_solver, &HiddenSingle),
        ("naked_pair", naked_pair_solver, &NakedPair),
        ("x_wing", x_wing_solver, &XWing),
        ("empty", || Solver::new(Puzzle::new()).unwrap(), &NakedPair),
    ];

    for (param, make_solver, technique) in cases {
        let solver = make_solver();
        c.bench_with_input(
            BenchmarkId::new("technique_find", param),
            &solver,
            |b, solver| {
                b.iter(|| hint::black_box(technique.find(hint::black_box(solver))));
            },
        );
    }
}

fn bench_logical_solve(c: &mut Criterion) {
    c.bench_function("logical_solve_easy", |b| {
        b.iter_batched_ref(
            || Solver::new(parse_puzzle(EASY)).unwrap(),
            |solver| {
                solver.solve().unwrap();
                hint::black_box(solver.puzzle().is_solved())
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_dlx(c: &mut Criterion) {
    c.bench_function("dlx_build_easy", |b| {
        b.iter_batched_ref(
            || parse_puzzle(EASY),
            |puzzle| {
                let dlx = Dlx::new(puzzle);
                hint::black_box(dlx.matrix_info().rows)
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("dlx_solve_easy", |b| {
        b.iter_batched_ref(
            || parse_puzzle(EASY),
            |puzzle| {
                let solved = Dlx::new(puzzle).solve().unwrap();
                hint::black_box(solved)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_technique_find, bench_logical_solve, bench_dlx);
criterion_main!(benches);
