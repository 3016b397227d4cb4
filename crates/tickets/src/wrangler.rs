//! The data wrangler: reshapes tickets and binds their comments.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::ticket::{Comment, RawComment, RawTicket, Ticket};

/// Error type for wrangling failures.
#[derive(Debug, thiserror::Error)]
pub enum WrangleError {
    /// The ticket payload file could not be read.
    #[error("Failed to read ticket file {}", path.display())]
    ReadTickets {
        /// The ticket file path.
        path: PathBuf,
        /// The underlying io error.
        source: std::io::Error,
    },

    /// The comments directory could not be scanned.
    #[error("Failed to scan comments directory {}", path.display())]
    ScanComments {
        /// The comments directory path.
        path: PathBuf,
        /// The underlying io error.
        source: std::io::Error,
    },

    /// A comments file was found for a ticket but could not be read or parsed.
    #[error("Failed to bind comments file {}", path.display())]
    BindComments {
        /// The comments file path.
        path: PathBuf,
        /// What went wrong while reading or parsing the file.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The wrangled output could not be written.
    #[error("Failed to write wrangled output to {}", path.display())]
    WriteOutput {
        /// The output path.
        path: PathBuf,
        /// What went wrong while writing.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Reshapes a raw ticket payload and binds per-ticket comment files.
///
/// The wrangler reads the ticket payload (one JSON object per line), reshapes
/// each line into a [`Ticket`], then walks the comments directory and binds
/// each comments file to the ticket whose id its file name starts with.
///
/// # Example
///
/// ```no_run
/// use wrangler_tickets::DataWrangler;
///
/// let mut wrangler = DataWrangler::new("tickets.json", "comments/");
/// wrangler.process()?;
/// println!("{} documents", wrangler.corpus().len());
/// # Ok::<(), wrangler_tickets::WrangleError>(())
/// ```
#[derive(Debug)]
#[must_use]
pub struct DataWrangler {
    ticket_file: PathBuf,
    comments_dir: PathBuf,
    wrangled_tickets: Vec<Ticket>,
}

impl DataWrangler {
    /// Create a new wrangler for a ticket payload file and a comments directory.
    pub fn new(ticket_file: impl Into<PathBuf>, comments_dir: impl Into<PathBuf>) -> Self {
        Self {
            ticket_file: ticket_file.into(),
            comments_dir: comments_dir.into(),
            wrangled_tickets: Vec::new(),
        }
    }

    /// The tickets wrangled so far.
    #[must_use]
    pub fn wrangled_tickets(&self) -> &[Ticket] {
        &self.wrangled_tickets
    }

    /// Reshape the ticket payload file into tickets.
    ///
    /// Each non-empty line of the payload holds one raw ticket as JSON. A
    /// line that fails to parse is logged and skipped rather than aborting
    /// the run. Returns the number of tickets reshaped.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload file cannot be read at all.
    pub fn reshape_tickets(&mut self) -> Result<usize, WrangleError> {
        let contents =
            fs::read_to_string(&self.ticket_file).map_err(|source| WrangleError::ReadTickets {
                path: self.ticket_file.clone(),
                source,
            })?;

        self.wrangled_tickets.clear();
        for (line_number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RawTicket>(line) {
                Ok(raw) => {
                    let ticket = Ticket::from(raw);
                    debug!(id = ticket.id, "Reshaped ticket");
                    self.wrangled_tickets.push(ticket);
                }
                Err(error) => {
                    warn!(line = line_number + 1, %error, "Failed to reshape ticket, skipping");
                }
            }
        }

        info!(
            count = self.wrangled_tickets.len(),
            "Reshaped ticket payload"
        );
        Ok(self.wrangled_tickets.len())
    }

    /// Bind comment files to their tickets.
    ///
    /// A comments file belongs to a ticket when its file stem starts with the
    /// ticket id. Each file holds a JSON array of raw comments. Tickets with
    /// previously bound comments are cleared and re-bound. Returns the number
    /// of comments bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the comments directory cannot be scanned, or if a
    /// matching comments file cannot be read or parsed.
    pub fn bind_comments(&mut self) -> Result<usize, WrangleError> {
        let entries =
            fs::read_dir(&self.comments_dir).map_err(|source| WrangleError::ScanComments {
                path: self.comments_dir.clone(),
                source,
            })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| WrangleError::ScanComments {
                path: self.comments_dir.clone(),
                source,
            })?;
            if entry.path().is_file() {
                files.push(entry.path());
            }
        }

        let mut bound = 0;
        for ticket in &mut self.wrangled_tickets {
            if !ticket.comments.is_empty() {
                warn!(id = ticket.id, "Prebound ticket found, clearing and re-binding");
                ticket.comments.clear();
            }

            let id = ticket.id.to_string();
            for path in files.iter().filter(|path| file_matches_ticket(path.as_path(), &id)) {
                info!(id = ticket.id, file = %path.display(), "Binding comments file");
                let comments = read_comments(path)?;
                let mut remaining = comments.len();
                for comment in comments {
                    debug!(comment = comment.id, remaining, "Bound comment");
                    remaining -= 1;
                    ticket.comments.push(comment);
                    bound += 1;
                }
            }
        }

        info!(bound, "Bound comments to tickets");
        Ok(bound)
    }

    /// Reshape the payload and bind comments in one pass.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails.
    pub fn process(&mut self) -> Result<(), WrangleError> {
        self.reshape_tickets()?;
        self.bind_comments()?;
        info!("Data successfully wrangled");
        Ok(())
    }

    /// The text corpus: one document per bound comment body.
    #[must_use]
    pub fn corpus(&self) -> Vec<String> {
        self.wrangled_tickets
            .iter()
            .flat_map(|ticket| ticket.comments.iter().map(|comment| comment.body.clone()))
            .collect()
    }

    /// Write the wrangled tickets to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be serialized or written.
    pub fn write_output(&self, path: &Path) -> Result<(), WrangleError> {
        let json = serde_json::to_string_pretty(&self.wrangled_tickets).map_err(|source| {
            WrangleError::WriteOutput {
                path: path.to_owned(),
                source: Box::new(source),
            }
        })?;
        fs::write(path, json).map_err(|source| WrangleError::WriteOutput {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }
}

/// Does a comments file name belong to the given ticket id?
///
/// Matches when the file stem is the id itself or the id followed by a
/// non-digit separator, so ticket 12 does not claim `123.json`.
fn file_matches_ticket(path: &Path, id: &str) -> bool {
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return false;
    };
    match stem.strip_prefix(id) {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

fn read_comments(path: &Path) -> Result<Vec<Comment>, WrangleError> {
    let contents = fs::read_to_string(path).map_err(|source| WrangleError::BindComments {
        path: path.to_owned(),
        source: Box::new(source),
    })?;
    let raw: Vec<RawComment> =
        serde_json::from_str(&contents).map_err(|source| WrangleError::BindComments {
            path: path.to_owned(),
            source: Box::new(source),
        })?;
    Ok(raw.into_iter().map(Comment::from).collect())
}
