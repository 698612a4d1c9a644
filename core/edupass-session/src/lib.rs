//! License gate and session binding for EduPass.
//!
//! - [`LicenseGate`] runs fetch → validate → (first use) activate → persist
//! - [`SessionBinder`] remembers a granted key in the session and in a
//!   persisted credential, and re-establishes the session on later visits
//!
//! # Passive login
//!
//! A persisted credential is never trusted on its own. On a new session the
//! binder shape-checks it and then re-validates it against a fresh snapshot
//! of the record store; a credential that no longer validates is forgotten.
//! Passive login never activates a key.

mod binder;
mod error;
mod gate;
mod jar;
mod state;

pub use binder::SessionBinder;
pub use error::{AccessError, SessionError, SessionResult};
pub use gate::LicenseGate;
pub use jar::{CredentialJar, MemoryJar, CREDENTIAL_COOKIE, CREDENTIAL_TTL_DAYS};
pub use state::AuthState;
