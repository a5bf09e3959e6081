pub mod certificate;
pub mod user;

pub use certificate::InMemoryDocumentStore;
pub use user::InMemoryUserRepository;
