mod helpers;
mod jwt;
mod middleware;
mod password;

pub use helpers::{
    SESSION_COOKIE, clear_session_cookie, extract_session_token, session_cookie,
};
pub use jwt::{Claims, DEFAULT_TTL_DAYS, JwtConfig, issue_token, validate_token};
pub use middleware::{AuthError, RequireUser};
pub use password::{hash_password, verify_login, verify_password};
