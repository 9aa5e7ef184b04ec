use std::fs;
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use zip::ZipArchive;

use crate::error::{FetchError, UnpackError};
use crate::session::Session;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Streams the archive from the session's download URL to its zip path.
/// The body is copied in fixed-size chunks, so memory stays bounded no
/// matter how large the export is.
pub fn download_archive(session: &Session) -> Result<(), FetchError> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "fetch",
        username = %session.username,
        "Downloading export archive"
    );

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let mut response = client.get(&session.download_url).send()?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            status: response.status(),
        });
    }

    let expected = response.content_length();
    let mut file = fs::File::create(&session.zip_path)?;
    let written = io::copy(&mut response, &mut file)?;

    info!(
        action = "complete",
        component = "fetch",
        bytes = written,
        expected = ?expected,
        duration_ms = start_time.elapsed().as_millis(),
        destination = ?session.zip_path,
        "Archive downloaded"
    );
    Ok(())
}

/// Unpacks the downloaded archive into the session's extraction directory.
/// A leftover directory from an earlier run with the same name is removed
/// first, so extraction always starts clean.
pub fn unpack_archive(session: &Session) -> Result<(), UnpackError> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "unpack",
        username = %session.username,
        "Extracting export archive"
    );

    if !session.zip_path.exists() {
        return Err(UnpackError::Missing {
            path: session.zip_path.clone(),
        });
    }

    if session.extraction_path.exists() {
        fs::remove_dir_all(&session.extraction_path)?;
        info!(
            action = "clean",
            component = "unpack",
            path = ?session.extraction_path,
            "Removed previous extraction directory"
        );
    }

    let file = fs::File::open(&session.zip_path)?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(&session.extraction_path)?;

    info!(
        action = "complete",
        component = "unpack",
        entries = archive.len(),
        duration_ms = start_time.elapsed().as_millis(),
        destination = ?session.extraction_path,
        "Archive extracted"
    );
    Ok(())
}

/// Removes the session's archive file and extraction directory. Runs after
/// every pipeline outcome and must never fail itself; removal errors are
/// logged and swallowed, and already-absent paths are fine.
pub fn cleanup(session: &Session) {
    info!(
        action = "start",
        component = "cleanup",
        username = %session.username,
        "Cleaning up session files"
    );

    if session.zip_path.exists() {
        if let Err(e) = fs::remove_file(&session.zip_path) {
            warn!(
                action = "remove",
                component = "cleanup",
                path = ?session.zip_path,
                error = %e,
                "Failed to remove archive file"
            );
        }
    }

    if session.extraction_path.exists() {
        if let Err(e) = fs::remove_dir_all(&session.extraction_path) {
            warn!(
                action = "remove",
                component = "cleanup",
                path = ?session.extraction_path,
                error = %e,
                "Failed to remove extraction directory"
            );
        }
    }
}
