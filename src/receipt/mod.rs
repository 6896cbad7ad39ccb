//! Receipt Module
//!
//! Receipt model, validation, scoring rules, score storage and the service
//! that ties them together.

mod id;
mod models;
mod repository;
mod scoring;
mod service;
mod validation;


pub use id::{generate_id, is_valid_id, IdGenerator};
pub use models::{Item, Receipt, Score};
pub use repository::ScoreRepository;
pub use scoring::{parse_cents, Multipliers, Options, ScoreBreakdown, ScoringEngine, ScoringError};
pub use service::ReceiptService;
pub use validation::{is_clock_time, is_currency, ValidationError};
