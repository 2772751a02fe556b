//! Consult history storage.
//!
//! Provides [`JsonlConsultHistory`], an append-only JSONL writer that
//! implements the [`ConsultHistory`](consult_application::ConsultHistory) port.

mod jsonl_history;

pub use jsonl_history::JsonlConsultHistory;
