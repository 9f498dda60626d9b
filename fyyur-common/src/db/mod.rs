//! Entity store: venues, artists and shows on SQLite
//!
//! Every write runs inside one transaction. A failure at any step rolls
//! the whole operation back.

pub mod artists;
pub mod init;
pub mod models;
pub mod shows;
pub mod venues;

pub use artists::*;
pub use init::*;
pub use models::*;
pub use shows::*;
pub use venues::*;
