//! Solves the built-in 17-node instance once and prints the best route and
//! the final pheromone matrix.

use std::process::ExitCode;

use u_aco_cvrp::aco::{AcoConfig, AcoRunner};
use u_aco_cvrp::instances::reference_instance;

fn main() -> ExitCode {
    let result = reference_instance()
        .and_then(|instance| AcoRunner::run(&instance, &AcoConfig::default()));
    match result {
        Ok(result) => {
            println!("{}", result.report());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
