pub mod app_config;
pub mod token;
pub mod amadeus;

pub use amadeus::{build_http_client, AmadeusClient};
pub use token::{HttpTokenExchange, TokenExchange, TokenGrant, TokenManager};
