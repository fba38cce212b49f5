//! Database module - MySQL persistence using SQLx

pub mod connection;
pub mod mysql;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlFavoriteRepository, MySqlInquiryRepository, MySqlNewProjectRepository,
    MySqlPropertyRepository, MySqlTokenRepository, MySqlUserRepository,
    MySqlVerificationRepository,
};
