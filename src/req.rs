use std::collections::HashMap;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

use crate::constants::{MAX_BODY_BYTES, MAX_HEAD_BYTES};
use crate::error::CustomError;
use crate::utils::parse_form;

#[derive(Debug, PartialEq)]
pub enum Method {
    GET,
    POST,
}

impl TryFrom<&str> for Method {
    type Error = CustomError;

    fn try_from(value: &str) -> Result<Self, CustomError> {
        match value {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(CustomError::MalformedRequest("Method not supported".to_string())),
        }
    }
}

pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Request {
    pub async fn new<Reader>(reader: Reader) -> Result<Self, CustomError>
    where
        Reader: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);

        let mut head = Vec::new();
        loop {
            // One byte past the cap is enough to know the head is too large
            let remaining = (MAX_HEAD_BYTES + 1 - head.len()) as u64;
            let read = (&mut reader)
                .take(remaining)
                .read_until(b'\n', &mut head)
                .await
                .map_err(CustomError::ConnectionError)?;
            if head.len() > MAX_HEAD_BYTES {
                return Err(CustomError::PayloadTooLarge);
            }
            if read == 0 || head.ends_with(b"\r\n\r\n") || head.ends_with(b"\n\n") {
                break;
            }
        }
        let head = String::from_utf8_lossy(&head);

        // Method and path
        let mut head_line = head.lines();
        let first = head_line
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| CustomError::MalformedRequest("Empty Request".to_string()))?;
        let mut request_parts = first.split_whitespace();
        let method: Method = request_parts
            .next()
            .ok_or_else(|| CustomError::MalformedRequest("Missing Method".to_string()))?
            .try_into()?;
        let target = request_parts
            .next()
            .ok_or_else(|| CustomError::MalformedRequest("No Path".to_string()))?;
        let path = target.split_once('?').map_or(target, |(path, _)| path);

        // Headers
        let mut headers = HashMap::new();
        for line in head_line {
            if let Some((k, v)) = line.split_once(':') {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }

        // Body
        let length = match headers.get("content-length") {
            Some(value) => value.parse::<usize>().map_err(|_| {
                CustomError::MalformedRequest(format!("Invalid Content-Length '{}'", value))
            })?,
            None => 0,
        };
        if length > MAX_BODY_BYTES {
            return Err(CustomError::PayloadTooLarge);
        }
        let mut body = vec![0; length];
        reader
            .read_exact(&mut body)
            .await
            .map_err(CustomError::ConnectionError)?;

        Ok(Request {
            method,
            path: path.to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers.get("cookie").and_then(|cookies| {
            cookies
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value)
        })
    }

    pub fn form(&self) -> HashMap<String, String> {
        parse_form(&self.body)
    }
}
