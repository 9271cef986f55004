use clap::Parser;
use sqm_processor::SqmError;
use sqm_processor::cli::{Args, run};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(run(args)) {
        Ok(0) => process::exit(0),
        Ok(_failures) => {
            // Failures have already been reported per series
            process::exit(1);
        }
        Err(error) => {
            match error.downcast_ref::<SqmError>() {
                Some(sqm_error) => eprintln!("Error [{}]: {:#}", sqm_error.kind(), error),
                None => eprintln!("Error: {:#}", error),
            }
            process::exit(1);
        }
    }
}
