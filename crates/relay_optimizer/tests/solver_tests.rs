mod setup;

use std::sync::{
    Arc, Mutex, OnceLock,
    atomic::{AtomicUsize, Ordering},
};

use jiff::SignedDuration;
use relay_optimizer::{
    acceptor::solution_acceptor::SolverAcceptorStrategy,
    problem::{
        capacity::Capacity,
        job::JobBuilder,
        location::Location,
        time_window::TimeWindow,
        travel_cost_matrix::TravelMatrices,
        vehicle::VehicleBuilder,
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::{
        ruin::ruin_strategy::RuinStrategy,
        score::Score,
        solver::Solver,
        solver_params::{SolverParams, Threads},
        termination::Termination,
    },
};

fn create_single_job_problem(time_window: Option<TimeWindow>) -> VehicleRoutingProblem {
    let locations = vec![
        Location::from_cartesian("depot", 0.0, 0.0),
        Location::from_cartesian("customer", 3.0, 4.0),
    ];

    let mut job = JobBuilder::default();
    job.set_location_id(1).set_size(Capacity::from_vec(vec![1.0]));
    if let Some(time_window) = time_window {
        job.set_time_window(time_window);
    }

    let mut vehicle = VehicleBuilder::default();
    vehicle
        .set_start_location_id(0)
        .set_capacity(Capacity::from_vec(vec![1.0]));

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_travel_matrices(TravelMatrices::from_euclidean(&locations, 1.0))
        .set_locations(locations)
        .add_job(job.build())
        .add_vehicle(vehicle.build());

    builder.build().unwrap()
}

#[test]
fn test_optimal_construction_runs_exactly_100_iterations() {
    let solver = Solver::new(create_single_job_problem(None), SolverParams::default()).unwrap();

    let outcome = solver.solve().unwrap();

    assert_eq!(outcome.iterations, 100);
    assert_eq!(outcome.iterations_without_improvement, 100);
    assert_eq!(outcome.best.score, Score::new(0, 5.0));
}

#[test]
fn test_unreachable_jobs_yield_zero_routes() {
    // 5 units away, the window closes after 2 seconds
    let time_window = TimeWindow::from_seconds(0, 2).unwrap();
    let solver = Solver::new(
        create_single_job_problem(Some(time_window)),
        SolverParams::default(),
    )
    .unwrap();

    let outcome = solver.solve().unwrap();

    assert_eq!(outcome.best.solution.non_empty_routes_count(), 0);
    assert_eq!(outcome.best.score, Score::new(1, 0.0));
    assert_eq!(outcome.iterations, 100);
    assert_eq!(outcome.best.summary().unassigned_jobs, vec!["job-1".to_owned()]);
}

#[test]
fn test_same_seed_same_solution() {
    let params = SolverParams {
        terminations: vec![Termination::Iterations(150)],
        search_threads: Threads::Multi(2),
        insertion_threads: Threads::Multi(2),
        seed: 17,
        ..SolverParams::default()
    };

    let first = Solver::new(setup::create_grid_problem(4, 5, 4), params.clone())
        .unwrap()
        .solve()
        .unwrap();
    let second = Solver::new(setup::create_grid_problem(4, 5, 4), params)
        .unwrap()
        .solve()
        .unwrap();

    assert!(first.best.solution.is_identical(&second.best.solution));
    assert_eq!(first.best.score, second.best.score);
}

#[test]
fn test_best_solutions_are_monotonic() {
    let params = SolverParams {
        terminations: vec![Termination::Iterations(300)],
        search_threads: Threads::Multi(2),
        ..SolverParams::default()
    };
    let mut solver = Solver::new(setup::create_grid_problem(4, 5, 4), params).unwrap();

    let scores = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&scores);
    solver.on_best_solution(move |solution| {
        recorded.lock().unwrap().push(solution.score);
    });

    let outcome = solver.solve().unwrap();
    let scores = scores.lock().unwrap();

    assert!(!scores.is_empty());
    assert!(scores.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(scores.last(), Some(&outcome.best.score));
}

#[test]
fn test_best_solution_callback_reads_current_best() {
    let params = SolverParams {
        terminations: vec![Termination::Iterations(150)],
        search_threads: Threads::Multi(6),
        ..SolverParams::default()
    };
    let mut solver = Solver::new(setup::create_grid_problem(5, 6, 4), params).unwrap();

    let solver_cell: Arc<OnceLock<Arc<Solver>>> = Arc::new(OnceLock::new());
    let reads = Arc::new(AtomicUsize::new(0));
    {
        let solver_cell = Arc::clone(&solver_cell);
        let reads = Arc::clone(&reads);
        solver.on_best_solution(move |solution| {
            std::thread::sleep(std::time::Duration::from_millis(2));
            if let Some(solver) = solver_cell.get() {
                let best = solver.current_best_solution().unwrap();
                assert_eq!(best.score, solution.score);
                reads.fetch_add(1, Ordering::Relaxed);
            }
        });
    }

    let solver = Arc::new(solver);
    assert!(solver_cell.set(Arc::clone(&solver)).is_ok());

    let outcome = solver.solve().unwrap();

    assert!(reads.load(Ordering::Relaxed) > 0);
    assert_eq!(
        solver.current_best_solution().unwrap().score,
        outcome.best.score
    );
    setup::assert_solution_invariants(&outcome.best.solution);
}

#[test]
fn test_accepted_solutions_hold_route_invariants() {
    let params = SolverParams {
        terminations: vec![Termination::Iterations(200)],
        solver_acceptor: SolverAcceptorStrategy::SimulatedAnnealing {
            initial_temperature: 5.0,
            cooling_rate: 0.98,
        },
        restart_from_best_iterations: Some(25),
        ..SolverParams::default()
    };
    let mut solver = Solver::new(setup::create_grid_problem(4, 5, 3), params).unwrap();
    solver.on_best_solution(|solution| {
        setup::assert_solution_invariants(&solution.solution);
    });

    let outcome = solver.solve().unwrap();

    setup::assert_solution_invariants(&outcome.best.solution);
}

#[test]
fn test_stop_before_termination() {
    let params = SolverParams {
        terminations: vec![Termination::Duration(SignedDuration::from_mins(10))],
        ..SolverParams::default()
    };
    let solver = Arc::new(Solver::new(setup::create_grid_problem(4, 5, 4), params).unwrap());

    let handle = {
        let solver = Arc::clone(&solver);
        std::thread::spawn(move || solver.solve())
    };

    std::thread::sleep(std::time::Duration::from_millis(200));
    solver.stop();

    let outcome = handle.join().unwrap().unwrap();
    assert!(outcome.duration < SignedDuration::from_mins(10));
    setup::assert_solution_invariants(&outcome.best.solution);
}

#[test]
fn test_params_from_json() {
    let params: SolverParams = serde_json::from_str(
        r#"{
            "terminations": [{ "Iterations": 50 }, { "Duration": "PT5S" }],
            "solver_acceptor": {
                "SimulatedAnnealing": { "initial_temperature": 100.0, "cooling_rate": 0.95 }
            },
            "ruin": { "ruin_strategies": [["Random", 2], ["Radial", 1]], "ruin_maximum_ratio": 0.3 },
            "search_threads": { "Multi": 2 },
            "seed": 7
        }"#,
    )
    .unwrap();

    assert_eq!(
        params.terminations,
        vec![
            Termination::Iterations(50),
            Termination::Duration(SignedDuration::from_secs(5))
        ]
    );
    assert_eq!(
        params.solver_acceptor,
        SolverAcceptorStrategy::SimulatedAnnealing {
            initial_temperature: 100.0,
            cooling_rate: 0.95
        }
    );
    assert_eq!(
        params.ruin.ruin_strategies,
        vec![(RuinStrategy::Random, 2), (RuinStrategy::Radial, 1)]
    );
    assert_eq!(params.ruin.ruin_maximum_ratio, 0.3);
    assert_eq!(params.ruin.ruin_minimum_ratio, 0.1);
    assert_eq!(params.search_threads, Threads::Multi(2));
    assert_eq!(params.insertion_threads, Threads::Single);
    assert_eq!(params.seed, 7);
    assert_eq!(params.recreate.noise_probability, 0.15);
}
