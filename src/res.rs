use crate::constants::{FLASH_COOKIE, FOUND, SESSION_COOKIE};

/// Category shown next to a one-shot message on the next rendered page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Danger => "danger",
            FlashKind::Warning => "warning",
            FlashKind::Info => "info",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(FlashKind::Success),
            "danger" => Some(FlashKind::Danger),
            "warning" => Some(FlashKind::Warning),
            "info" => Some(FlashKind::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn new(kind: FlashKind, message: &str) -> Self {
        Flash {
            kind,
            message: message.to_string(),
        }
    }

    pub fn to_cookie_value(&self) -> String {
        urlencoding::encode(&format!("{}|{}", self.kind.as_str(), self.message)).into_owned()
    }

    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let decoded = urlencoding::decode(value).ok()?;
        let (kind, message) = decoded.split_once('|')?;
        Some(Flash {
            kind: FlashKind::parse(kind)?,
            message: message.to_string(),
        })
    }
}

pub struct Response {
    pub status_line: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    pub fn html(status_line: &'static str, body: String) -> Self {
        Response {
            status_line,
            headers: vec![(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )],
            body,
        }
    }

    pub fn redirect(location: &str) -> Self {
        Response {
            status_line: FOUND,
            headers: vec![("Location".to_string(), location.to_string())],
            body: String::new(),
        }
    }

    pub fn with_flash(self, flash: Flash) -> Self {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            flash.to_cookie_value()
        );
        self.with_header("Set-Cookie", cookie)
    }

    /// Expires the flash cookie so a message is shown only once.
    pub fn consume_flash(self) -> Self {
        let cookie = format!("{}=; Path=/; Max-Age=0", FLASH_COOKIE);
        self.with_header("Set-Cookie", cookie)
    }

    pub fn with_session(self, token: &str) -> Self {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, token
        );
        self.with_header("Set-Cookie", cookie)
    }

    pub fn clear_session(self) -> Self {
        let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
        self.with_header("Set-Cookie", cookie)
    }

    pub fn with_header(mut self, name: &str, value: String) -> Self {
        self.headers.push((name.to_string(), value));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn to_http(&self) -> String {
        let mut out = format!("{}\r\n", self.status_line);
        for (name, value) in &self.headers {
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        out.push_str("Connection: close\r\n\r\n");
        out.push_str(&self.body);
        out
    }
}
