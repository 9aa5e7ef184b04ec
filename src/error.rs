use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("could not write archive to disk: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum UnpackError {
    #[error("archive not found at {path:?}")]
    Missing { path: PathBuf },
    #[error("archive is corrupt or unreadable: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("could not extract archive: {0}")]
    Io(#[from] std::io::Error),
}

/// Session-level failure taxonomy. Per-dataset problems never show up here;
/// they are absorbed during loading and surface only as zero counts.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("invalid input: {0}")]
    Input(String),
    #[error("archive download failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("archive extraction failed: {0}")]
    Unpack(#[from] UnpackError),
    #[error("analysis failed: {0}")]
    Analysis(#[from] anyhow::Error),
}

impl AnalyzeError {
    /// HTTP-equivalent status for an embedding web layer.
    pub fn http_status(&self) -> u16 {
        match self {
            AnalyzeError::Input(_) => 400,
            AnalyzeError::Fetch(_) => 502,
            AnalyzeError::Unpack(_) | AnalyzeError::Analysis(_) => 500,
        }
    }

    /// Process exit code for the CLI boundary: 2 for rejected input, 1 for
    /// pipeline failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzeError::Input(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_client_class() {
        let err = AnalyzeError::Input("bad url".to_string());
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn pipeline_errors_map_to_server_class() {
        let unpack = AnalyzeError::Unpack(UnpackError::Missing {
            path: PathBuf::from("/nope.zip"),
        });
        assert_eq!(unpack.http_status(), 500);
        assert_eq!(unpack.exit_code(), 1);

        let analysis = AnalyzeError::Analysis(anyhow::anyhow!("boom"));
        assert_eq!(analysis.http_status(), 500);
        assert_eq!(analysis.exit_code(), 1);
    }
}
