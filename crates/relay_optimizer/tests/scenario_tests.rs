mod setup;

use relay_optimizer::solver::{
    construction::construct_solution::construct_solution,
    recreate::recreate_params::RecreateParams,
    solver::Solver,
    solver_params::SolverParams,
};
use std::sync::Arc;

#[test]
fn test_construction_gets_stuck_with_one_job_unassigned() {
    let problem = Arc::new(setup::create_two_vehicles_problem());
    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();

    let solution = construct_solution(&problem, &thread_pool);

    assert_eq!(solution.unassigned_jobs().len(), 1);
    let unassigned = solution.sorted_unassigned_jobs()[0];
    assert_eq!(problem.job(unassigned).external_id(), "2");
    setup::assert_solution_invariants(&solution);
}

#[test]
fn test_two_vehicles_three_jobs_reaches_optimum() {
    let problem = setup::create_two_vehicles_problem();
    let params = SolverParams {
        recreate: RecreateParams {
            noise_probability: 0.5,
            noise_level: 0.1,
        },
        ..SolverParams::default()
    };
    let solver = Solver::new(problem, params).unwrap();

    let outcome = solver.solve().unwrap();
    let summary = outcome.best.summary();

    assert!(summary.unassigned_jobs.is_empty());
    assert!((summary.cost - 69055.547).abs() < 1e-6, "{}", summary.cost);
    assert_eq!(summary.routes.len(), 2);

    let route_jobs: Vec<(&str, Vec<&str>)> = summary
        .routes
        .iter()
        .map(|route| {
            (
                route.vehicle_id.as_str(),
                route.stops.iter().map(|stop| stop.job_id.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        route_jobs,
        vec![("vehicle-01", vec!["2"]), ("vehicle-02", vec!["3", "4"])]
    );

    setup::assert_solution_invariants(&outcome.best.solution);
}
