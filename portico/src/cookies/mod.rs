mod encoding;
mod jar;
mod options;
mod response_cookies;
mod signer;

pub use encoding::{decode_value, encode_value};
pub use jar::{CookieJar, PREFIX, get_cookie, prefixed};
pub use options::{CookieOptions, CookiePolicy, SameSite, serialize_cookie};
pub use response_cookies::ResponseCookies;
pub use signer::CookieSigner;
