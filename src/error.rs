use thiserror::Error;

/// Failure reported by any external collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {code}: {message}")]
    Status { code: String, message: String },

    #[error("no result for {0:?}")]
    NotFound(String),

    #[error("incomplete response")]
    IncompleteResponse,
}

/// Failure that aborts a planning run.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("both a start and an end address are required")]
    EmptyAddress,

    #[error("address not found: {address}")]
    AddressNotFound {
        address: String,
        #[source]
        source: ProviderError,
    },

    #[error("could not obtain any route: all {attempts} directions requests failed")]
    RouteAcquisition { attempts: usize },

    #[error("the directions provider returned no route between the given locations")]
    NoRoutes,
}
