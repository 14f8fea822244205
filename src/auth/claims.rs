use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserClaims {
    pub id: String, // Opaque owner identifier
    pub exp: i64,   // Expiration timestamp
}
