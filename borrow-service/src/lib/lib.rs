pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::loan;
pub use outbound::clients;
pub use outbound::repositories;
