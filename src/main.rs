use std::time::Instant;

use log::info;

use tsp_grid_core::{logging, utils, Point, Result, Solver, SolverInput, SolverOptions};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = SolverInput::from_options(&options)?;

    info!("input: {input}");
    info!("options: {options}");

    let start = Point::new(options.start_x, options.start_y);
    let mut solver = Solver::from_rows(input.rows(), options.resolution, start, options.greedy)?;
    info!("solver: {solver}");

    let route = solver.result()?;
    tsp_grid_core::write_tour(&options.output, route)?;

    info!(
        "output: n={} time={:.2}s",
        route.len(),
        now.elapsed().as_secs_f32()
    );
    utils::tour_distance(route);

    Ok(())
}
