//! File-backed outbox: a mailer that drops messages into a directory as
//! JSON, for local runs and tests where no SMTP relay exists.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Mailer, NotifyError, OutboundEmail};

#[derive(Debug, Clone)]
pub struct FileOutbox {
    dir: PathBuf,
}

impl FileOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, NotifyError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| NotifyError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> Result<PathBuf, NotifyError> {
        let existing = fs::read_dir(&self.dir)
            .map_err(|source| NotifyError::Io {
                path: self.dir.clone(),
                source,
            })?
            .flatten()
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|extension| extension == "json")
            })
            .count();
        Ok(self.dir.join(format!("message-{:04}.json", existing + 1)))
    }
}

impl Mailer for FileOutbox {
    fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        let path = self.next_path()?;
        let json = serde_json::to_string_pretty(email).map_err(|error| {
            NotifyError::Transport(format!("could not serialize message: {error}"))
        })?;
        fs::write(&path, format!("{json}\n")).map_err(|source| NotifyError::Io {
            path,
            source,
        })
    }
}
