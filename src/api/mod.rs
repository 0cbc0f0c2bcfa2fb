//! API handlers for the campus library REST endpoints

pub mod books;
pub mod extract;
pub mod guard;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod router;
pub mod students;
pub mod superadmins;

pub use router::router;
