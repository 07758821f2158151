use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// How many fresh ids to try when a file name is already taken on disk
const MAX_CREATE_ATTEMPTS: u32 = 8;

/// A generated audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    /// Location on local disk
    pub file: PathBuf,
    /// Path the file is served under, e.g. `/static/output_1700000000000000000.mp3`
    pub public_path: String,
}

/// Writes synthesized audio into the static directory.
///
/// File names carry a nanosecond timestamp that is forced to be strictly
/// increasing within the process, and files are opened with `create_new`,
/// so two requests never write to the same file.
#[derive(Debug)]
pub struct AudioStore {
    dir: PathBuf,
    url_prefix: String,
    last_id: AtomicU64,
}

impl AudioStore {
    /// `dir` is served under `url_prefix` (normally `/static`).
    pub fn new(dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            last_id: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Next file id: the current time in nanoseconds, bumped past the last id handed out.
    fn next_id(&self) -> u64 {
        let now = chrono::Utc::now()
            .timestamp_nanos_opt()
            .map(|n| n.max(0) as u64)
            .unwrap_or(0);

        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);

        now.max(previous + 1)
    }

    /// Persist `audio` as a new MP3 file and return where it lives.
    pub async fn save(&self, audio: &[u8]) -> io::Result<StoredAudio> {
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let file_name = format!("output_{}.mp3", self.next_id());
            let file = self.dir.join(&file_name);

            let mut handle = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file)
                .await
            {
                Ok(handle) => handle,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    warn!("Audio file {} already exists, picking another name", file.display());
                    continue;
                }
                Err(e) => return Err(e),
            };

            handle.write_all(audio).await?;
            handle.flush().await?;

            debug!("Wrote {} bytes of audio to {}", audio.len(), file.display());

            return Ok(StoredAudio {
                public_path: format!("{}/{}", self.url_prefix, file_name),
                file,
            });
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "could not find a free audio file name in {} after {} attempts",
                self.dir.display(),
                MAX_CREATE_ATTEMPTS
            ),
        ))
    }
}
