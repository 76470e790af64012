pub mod claims;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::SessionClaims;
pub use errors::JwtError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;

/// The only algorithm sessions are signed with.
pub const SIGNING_ALGORITHM: jsonwebtoken::Algorithm = jsonwebtoken::Algorithm::HS256;
