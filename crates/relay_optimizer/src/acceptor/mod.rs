pub mod accept_solution;
pub mod greedy_solution_acceptor;
pub mod simulated_annealing_acceptor;
pub mod solution_acceptor;
