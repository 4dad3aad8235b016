use serde::{Deserialize, Serialize};

/// Claims of the access token issued by the login flow.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
