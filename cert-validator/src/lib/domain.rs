pub mod certificate;
pub mod session;
pub mod user;
