//! User-facing entry points with deadline and slippage guards.
//!
//! The [`Router`] never holds tokens. It pulls the caller's tokens (or
//! shares) straight into the pair it trades against and routes each hop's
//! output to the next pair. Every operation is all-or-nothing: a failure
//! anywhere undoes the ledger, the touched pairs, pair registrations and
//! emitted events.

mod exchange_router;
mod requests;

pub use exchange_router::Router;
pub use requests::{AddLiquidity, RemoveLiquidity};
