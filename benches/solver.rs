use newtox::bench::{Benchmark, BenchmarkReport};
use newtox::coord::Viewport;
use newtox::grid::ComplexGrid;
use newtox::solver::{IterationState, NewtonSolver, Solver};
use newtox::threads::make_solver;

const SIZE: usize = 1000;
const REPEATS: usize = 5;

fn b_solver(threads: usize, iterations: usize) -> Benchmark {
    let grid = ComplexGrid::initialize(SIZE, SIZE, &Viewport::default()).expect("valid grid");
    let initial = IterationState::from(&grid);
    let solver: Box<dyn Solver<IterationState>> =
        make_solver(NewtonSolver::new(1e6, iterations), threads);
    let f = move || {
        solver.solve(&initial);
    };
    Benchmark::iter(
        &format!("newton-t{}-i{}-{}", threads, iterations, SIZE),
        REPEATS,
        f,
    )
}

fn main() -> std::io::Result<()> {
    BenchmarkReport::with_benches(&[
        b_solver(0, 3),
        b_solver(0, 100),
        b_solver(2, 100),
        b_solver(4, 100),
        b_solver(8, 100),
    ])
    .report("solver")
}
