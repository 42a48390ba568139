pub mod context;
pub mod gate;
pub mod jwt;
pub mod password;

pub use context::{AuthContext, AuthFailure};
pub use gate::{AuthGuard, authorize, require_subject};
pub use jwt::{TokenClaims, TokenCodec, TokenConfig, TokenError};
pub use password::{PasswordError, hash_password, verify_password};
