//! Client-side session guard.
//!
//! Mirrors the server route guard for rendering: a protected view stays in a
//! loading state until one `/auth/verify` call settles, then renders or
//! redirects. The server guard remains the enforcement point.

pub mod session_guard;
pub mod verifier;

pub use session_guard::Access;
pub use session_guard::GuardState;
pub use session_guard::GuardView;
pub use session_guard::MountedGuard;
pub use session_guard::SessionGuard;
pub use verifier::HttpSessionVerifier;
pub use verifier::SessionUser;
pub use verifier::SessionVerifier;
pub use verifier::VerifierError;
