//! Route protection: the static route policy and the per-request guard.

pub mod guard;
pub mod policy;

pub use guard::GuardDecision;
pub use guard::RouteGuard;
pub use policy::ProtectionLevel;
pub use policy::RoutePolicy;
