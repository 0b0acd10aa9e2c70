pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK";
pub const FOUND: &str = "HTTP/1.1 302 Found";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request";
pub const NOT_FOUND: &str = "HTTP/1.1 404 NOT FOUND";
pub const PAYLOAD_TOO_LARGE: &str = "HTTP/1.1 413 Payload Too Large";
pub const UNPROCESSABLE: &str = "HTTP/1.1 422 Unprocessable Entity";
pub const INTERNAL_ERROR: &str = "HTTP/1.1 500 INTERNAL ERROR";

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

pub const MAX_HEAD_BYTES: usize = 16 * 1024;
pub const MAX_BODY_BYTES: usize = 64 * 1024;
