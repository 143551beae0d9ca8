//! Artifact provisioning: fetch remote files onto local disk, once.
//!
//! Downloads stream into a sibling `.part` file and are renamed into place
//! only after the body (and, when pinned, its SHA-256 digest) checks out, so
//! an interrupted download never leaves a half-written artifact where the
//! loader would pick it up. Hosts that interpose a large-file confirmation
//! page (Google Drive style) are handled by replaying the request with the
//! `confirm` token from the `download_warning` cookie.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, Response, StatusCode, Url};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors raised while provisioning an artifact.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("invalid artifact url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("artifact request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("artifact server answered {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("artifact io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("digest mismatch for {artifact}: expected {expected}, got {actual}")]
    DigestMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
}

/// One remote file to mirror onto local disk.
#[derive(Debug, Clone)]
pub struct ArtifactSpec {
    /// Short name used in logs and errors.
    pub name: String,
    /// Source URL.
    pub url: String,
    /// Final on-disk location.
    pub path: PathBuf,
    /// Expected SHA-256 digest (hex); `None` skips verification.
    pub sha256: Option<String>,
}

impl ArtifactSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            path: path.into(),
            sha256: None,
        }
    }

    /// Pins the expected SHA-256 digest; pass `None` to leave it unchecked.
    pub fn with_digest(mut self, digest: Option<String>) -> Self {
        self.sha256 = digest;
        self
    }
}

/// What [`ensure_artifact`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// File was already on disk; nothing was downloaded.
    Present,
    /// File was downloaded; carries the body size in bytes.
    Downloaded(u64),
}

/// Makes sure `spec.path` holds the artifact, downloading it if absent.
///
/// An existing file short-circuits without touching the network; when a
/// digest is pinned it is re-hashed first, and a mismatch is an error rather
/// than a trigger for a silent re-download. Any fetch failure removes the
/// staged `.part` file before returning.
pub async fn ensure_artifact(client: &Client, spec: &ArtifactSpec) -> Result<Outcome, ProvisionError> {
    if spec.path.exists() {
        verify_existing(spec).await?;
        tracing::info!(
            artifact = %spec.name,
            path = %spec.path.display(),
            "artifact already present, skipping download"
        );
        return Ok(Outcome::Present);
    }

    if let Some(parent) = spec.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let url = Url::parse(&spec.url).map_err(|err| ProvisionError::InvalidUrl {
        url: spec.url.clone(),
        message: err.to_string(),
    })?;
    tracing::info!(artifact = %spec.name, %url, "downloading artifact");

    let staged = spec.path.with_extension("part");
    match download(client, spec, url, &staged).await {
        Ok(bytes) => {
            tokio::fs::rename(&staged, &spec.path).await?;
            tracing::info!(
                artifact = %spec.name,
                bytes,
                path = %spec.path.display(),
                "artifact ready"
            );
            Ok(Outcome::Downloaded(bytes))
        }
        Err(err) => {
            if staged.exists() {
                let _ = tokio::fs::remove_file(&staged).await;
            }
            Err(err)
        }
    }
}

/// Provisions every spec in order, stopping at the first failure.
pub async fn ensure_artifacts(client: &Client, specs: &[ArtifactSpec]) -> Result<(), ProvisionError> {
    for spec in specs {
        ensure_artifact(client, spec).await?;
    }
    Ok(())
}

/// Hex-encoded SHA-256 of `bytes`. Handy for pinning digests in config.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex(Sha256::digest(bytes).as_slice())
}

async fn verify_existing(spec: &ArtifactSpec) -> Result<(), ProvisionError> {
    let Some(expected) = &spec.sha256 else {
        return Ok(());
    };
    let bytes = tokio::fs::read(&spec.path).await?;
    let actual = sha256_hex(&bytes);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(ProvisionError::DigestMismatch {
            artifact: spec.name.clone(),
            expected: expected.clone(),
            actual,
        });
    }
    Ok(())
}

async fn download(
    client: &Client,
    spec: &ArtifactSpec,
    url: Url,
    staged: &Path,
) -> Result<u64, ProvisionError> {
    let response = fetch(client, url).await?;

    let mut hasher = Sha256::new();
    let mut file = tokio::fs::File::create(staged).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.sync_all().await?;

    let actual = hex(hasher.finalize().as_slice());
    if let Some(expected) = &spec.sha256 {
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ProvisionError::DigestMismatch {
                artifact: spec.name.clone(),
                expected: expected.clone(),
                actual,
            });
        }
    }
    tracing::debug!(artifact = %spec.name, sha256 = %actual, "download digest");
    Ok(written)
}

/// Issues the GET, replaying once with a `confirm` token when the host
/// answers with a large-file confirmation cookie instead of the body.
async fn fetch(client: &Client, url: Url) -> Result<Response, ProvisionError> {
    let response = client.get(url.clone()).send().await?;
    if let Some(token) = confirm_token(response.headers()) {
        tracing::debug!(%url, "host asked for large-file confirmation, replaying");
        let confirmed = client.get(with_confirm(&url, &token)).send().await?;
        return check_status(confirmed);
    }
    check_status(response)
}

fn check_status(response: Response) -> Result<Response, ProvisionError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProvisionError::Status {
            status,
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

/// Extracts the value of the first `download_warning*` cookie, if any.
fn confirm_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            name.trim()
                .starts_with("download_warning")
                .then(|| value.to_string())
        })
}

fn with_confirm(url: &Url, token: &str) -> Url {
    let mut confirmed = url.clone();
    confirmed.query_pairs_mut().append_pair("confirm", token);
    confirmed
}

fn hex(digest: &[u8]) -> String {
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
