use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;
use url::Url;

pub fn setup_logging(verbose: bool) {
    let default_directive = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let timer = LocalTime::new(format_description!("[hour]:[minute]:[second]"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .init();
}

pub fn format_number(num: u32) -> String {
    num.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn redact_username(username: &str) -> String {
    let chars: Vec<char> = username.chars().collect();
    if chars.len() <= 2 {
        return "*".repeat(chars.len());
    }

    let mut result = String::new();
    result.push(chars[0]);
    result.push_str(&"*".repeat(chars.len() - 2));
    result.push(chars[chars.len() - 1]);
    result
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    match Url::parse(&args.url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => anyhow::bail!(
            "download URL must use an http or https scheme, got '{}'",
            parsed.scheme()
        ),
        Err(e) => anyhow::bail!("invalid download URL: {}", e),
    }

    if args.recent == 0 {
        anyhow::bail!("--recent must be greater than 0");
    }

    Ok(())
}
