pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use errors::TokenConfigError;
pub use errors::TokenError;
pub use service::TokenConfig;
pub use service::TokenService;
pub use service::TokenSubject;
