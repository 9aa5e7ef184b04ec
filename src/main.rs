use clap::Parser;
use serde_json::json;
use tracing::error;

use followee::args::Args;
use followee::error::AnalyzeError;
use followee::{pipeline, utils};

fn main() {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if let Err(e) = utils::validate_args(&args) {
        let err = AnalyzeError::Input(e.to_string());
        report_failure(&args, &err);
        std::process::exit(err.exit_code());
    }

    match pipeline::run_analysis(&args) {
        Ok(result) => {
            if args.json {
                println!("{}", json!({"status": "success", "results": result}));
            } else {
                pipeline::print_analysis_results(&result, &args);
            }
        }
        Err(e) => {
            report_failure(&args, &e);
            std::process::exit(e.exit_code());
        }
    }
}

fn report_failure(args: &Args, err: &AnalyzeError) {
    error!(
        action = "fail",
        component = "cli",
        http_status = err.http_status(),
        error = %err,
        "Export analysis failed"
    );

    if args.json {
        println!("{}", json!({"status": "error", "message": err.to_string()}));
    } else {
        eprintln!("Error: {}", err);
    }
}
