pub mod user;

pub use user::PostgresUserDirectory;
