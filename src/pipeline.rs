use std::time::Instant;
use tracing::info;

use crate::analysis::{self, AnalysisResult};
use crate::archive;
use crate::args::Args;
use crate::error::AnalyzeError;
use crate::session::{self, Session};
use crate::utils;

/// Runs the full fetch, unpack, analyze pipeline for one session. Local
/// storage is cleaned up on every exit path, including failures.
pub fn run_analysis(args: &Args) -> Result<AnalysisResult, AnalyzeError> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "pipeline",
        username = %args.username,
        "Starting export analysis"
    );

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(session::default_data_dir);
    let session =
        Session::new(&data_dir, &args.url, &args.username).map_err(AnalyzeError::Analysis)?;

    let outcome = run_stages(&session, args.recent);
    archive::cleanup(&session);

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "pipeline",
        success = outcome.is_ok(),
        duration_ms = total_time.as_millis(),
        "Export analysis finished"
    );
    outcome
}

fn run_stages(session: &Session, recent_limit: usize) -> Result<AnalysisResult, AnalyzeError> {
    archive::download_archive(session)?;
    archive::unpack_archive(session)?;
    analysis::analyze_extracted(&session.extraction_path, recent_limit)
        .map_err(AnalyzeError::Analysis)
}

pub fn print_analysis_results(result: &AnalysisResult, args: &Args) {
    let m = &result.metrics;
    let lists = &result.user_lists;

    println!("\n--- Follow Analysis for {} ---", args.username);
    println!("Followers: {}", utils::format_number(m.total_followers as u32));
    println!("Following: {}", utils::format_number(m.total_following as u32));
    println!(
        "Mutual follows: {}",
        utils::format_number(m.mutual_following_count as u32)
    );
    println!(
        "Not following you back: {}",
        utils::format_number(m.not_following_back_count as u32)
    );
    println!(
        "You don't follow back: {}",
        utils::format_number(m.you_not_following_count as u32)
    );
    println!(
        "Recently unfollowed: {}",
        utils::format_number(m.unfollowed_count as u32)
    );
    println!(
        "Blocked profiles: {}",
        utils::format_number(m.blocked_count as u32)
    );
    println!(
        "Story hidden from: {}",
        utils::format_number(m.hide_story_count as u32)
    );
    println!(
        "Accepted requests: {}",
        utils::format_number(m.accepted_requests_count as u32)
    );
    println!(
        "Received requests: {}",
        utils::format_number(m.received_requests_count as u32)
    );
    println!(
        "Pending requests: {}",
        utils::format_number(m.pending_requests_count as u32)
    );
    println!(
        "Restricted profiles: {}",
        utils::format_number(m.restricted_profiles_count as u32)
    );

    if !lists.recent_followers_list.is_empty() {
        println!("\nMost recent followers:");
        for username in &lists.recent_followers_list {
            println!("- {}", display_username(username, args.redact));
        }
    }

    if args.lists {
        print_list("Not following you back", &lists.not_following_back_list, args.redact);
        print_list("Mutual follows", &lists.mutual_following_list, args.redact);
        print_list("You don't follow back", &lists.you_not_following_list, args.redact);
        print_list("Recently unfollowed", &lists.unfollowed_list, args.redact);
        print_list("Blocked profiles", &lists.blocked_list, args.redact);
        print_list("Story hidden from", &lists.hide_story_list, args.redact);
        print_list("Accepted requests", &lists.accepted_requests_list, args.redact);
        print_list("Received requests", &lists.received_requests_list, args.redact);
        print_list("Pending requests", &lists.pending_requests_list, args.redact);
        print_list("Restricted profiles", &lists.restricted_profiles_list, args.redact);
    }
}

fn print_list(label: &str, usernames: &[String], redact: bool) {
    if usernames.is_empty() {
        return;
    }

    println!("\n{} ({}):", label, usernames.len());
    for username in usernames {
        println!("- {}", display_username(username, redact));
    }
}

fn display_username(username: &str, redact: bool) -> String {
    if redact {
        utils::redact_username(username)
    } else {
        username.to_string()
    }
}
