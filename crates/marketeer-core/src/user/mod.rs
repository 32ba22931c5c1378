//! Accounts and auth sessions: repository trait, hashing seam, service.

pub mod hash;
pub mod repository;
pub mod service;

pub use hash::PasswordHasher;
pub use repository::UserRepository;
pub use service::AuthService;
