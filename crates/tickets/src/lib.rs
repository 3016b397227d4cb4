//! Support-ticket reshaping and comment binding.
//!
//! This crate turns a raw ticket payload (one JSON object per line, as
//! exported from the ticketing API) and a directory of per-ticket comment
//! files into wrangled [`Ticket`] values, ready to be flattened into a text
//! corpus for topic modeling.
//!
//! # Example
//!
//! ```no_run
//! use wrangler_tickets::DataWrangler;
//!
//! let mut wrangler = DataWrangler::new("tickets.json", "comments/");
//! wrangler.process()?;
//! let corpus = wrangler.corpus();
//! # Ok::<(), wrangler_tickets::WrangleError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_debug_implementations)]
#![warn(missing_docs)]

mod ticket;
mod wrangler;

pub use ticket::{Comment, Ticket, TicketStatus};
pub use wrangler::{DataWrangler, WrangleError};
