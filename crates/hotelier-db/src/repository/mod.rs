//! SurrealDB repository implementations.

mod hotel;
mod user_directory;

pub use hotel::SurrealHotelRepository;
pub use user_directory::SurrealUserDirectory;
