//! In-memory repository adapters.
//!
//! Used when the server starts without a database URL and by integration
//! tests. Each store keeps rows in insertion order behind a `std::sync::Mutex`
//! and enforces the same uniqueness rules as the PostgreSQL schema.

use std::sync::{Mutex, MutexGuard};

mod appointments;
mod notifications;
mod user_tokens;
mod users;

pub use appointments::InMemoryAppointmentRepository;
pub use notifications::InMemoryNotificationRepository;
pub use user_tokens::InMemoryUserTokenRepository;
pub use users::InMemoryUserRepository;

const POISONED: &str = "in-memory store lock poisoned";

/// Lock `store`, reporting poisoning through the port's query constructor.
fn lock_store<T, E>(
    store: &Mutex<T>,
    query: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'_, T>, E> {
    store.lock().map_err(|_| query(POISONED))
}
