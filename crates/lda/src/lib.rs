//! Latent Dirichlet Allocation over wrangled ticket corpora.
//!
//! This crate turns a plain-text corpus into topics:
//!
//! - [`preprocess`] tokenizes documents and drops stopwords
//! - [`Dictionary`] maps tokens to ids and filters vocabulary extremes
//! - [`LdaModel`] trains a topic model by collapsed Gibbs sampling
//! - [`umass_coherence`] scores topics against the corpus
//! - [`Allocator`] sweeps a range of topic counts and picks the best
//!
//! # Example
//!
//! ```rust
//! use wrangler_lda::{Allocator, TrainingConfig};
//!
//! let documents = vec![
//!     "the printer is jammed again".to_string(),
//!     "cannot connect to the office printer".to_string(),
//!     "password reset link never arrives".to_string(),
//!     "need a password reset for my account".to_string(),
//! ];
//!
//! let config = TrainingConfig {
//!     passes: 2,
//!     iterations: 5,
//!     seed: Some(7),
//!     ..TrainingConfig::default()
//! };
//! let mut allocator = Allocator::new(&documents, 1, 0.9, 1000)?;
//! allocator.sweep(1..=3, &config);
//! assert!(allocator.best_topic_count().is_some());
//! # Ok::<(), wrangler_lda::LdaError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_debug_implementations)]
#![warn(missing_docs)]

mod allocator;
mod coherence;
mod dictionary;
mod model;
mod preprocess;

pub use allocator::{Allocator, SweepPoint};
pub use coherence::umass_coherence;
pub use dictionary::Dictionary;
pub use model::{LdaError, LdaModel, TrainingConfig};
pub use preprocess::{preprocess, tokenize};
