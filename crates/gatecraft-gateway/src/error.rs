use gatecraft_routing::RoutingError;
use thiserror::Error;

/// Errors building a [`crate::Gateway`] from a loaded configuration
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Routing(#[from] RoutingError),
}
