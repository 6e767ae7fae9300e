use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Read, Take, Write};
use chrono::Utc;
use log::debug;

pub const SERVER_NAME: &str = "simple-file-server";

/// The most bytes the request line and headers together may take.
pub const MAX_HEAD_BYTES: u64 = 1 << 20;

#[derive(Debug, Default)]
pub struct Headers {
    /// Header values keyed by lowercased name.
    headers: HashMap<String, String>
}

impl Headers {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn forwarded_for(&self) -> Option<&str> {
        self.get("X-Forwarded-For")
    }

    pub fn content_length(&self) -> Option<u64> {
        self.get("Content-Length").and_then(|value| value.parse().ok())
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
    }
}

#[derive(Debug)]
pub struct Request {
    pub method: String,

    /// The request target exactly as sent by the client.
    pub target: String,
    pub headers: Headers
}

impl Request {
    pub fn is_head(&self) -> bool {
        self.method == "HEAD"
    }
}

#[derive(Debug)]
pub struct BadRequest {
    pub code: &'static str,
    pub reason: &'static str
}

impl fmt::Display for BadRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

/// Reads a request line and its headers.
///
/// Returns `Ok(None)` if the peer closed the connection without sending
/// anything. A head longer than [`MAX_HEAD_BYTES`] is a bad request.
pub fn parse_request<S: BufRead>(buffed: &mut S) -> Result<Option<Request>, BadRequest> {
    let mut head = Read::take(buffed, MAX_HEAD_BYTES);
    let mut line_buff = String::new();
    if read_head_line(&mut head, &mut line_buff)? == 0 {
        return Ok(None)
    }
    let (method, target) = parse_request_line(&line_buff)?;
    let headers = parse_headers(&mut head)?;
    Ok(Some(Request { method, target, headers }))
}

fn parse_request_line(input: &str) -> Result<(String, String), BadRequest> {
    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => Ok((method.to_string(), target.to_string())),
        (Some(method), None) => {
            debug!("No URL:method={}", method);
            Err(BadRequest { code: "400", reason: "Bad Request" })
        },
        _ => Err(BadRequest { code: "400", reason: "Bad Request" })
    }
}

fn parse_headers<R: BufRead>(reader: &mut Take<R>) -> Result<Headers, BadRequest> {
    let mut headers = Headers::default();
    loop {
        let mut line = String::new();
        if read_head_line(reader, &mut line)? == 0 {
            break
        }
        let line = line.trim_end();
        if line.is_empty() {
            break
        }
        if let Some(index) = line.find(':') {
            let (name, value) = line.split_at(index);
            headers.insert(name.trim(), value[1..].trim());
        }
    }
    Ok(headers)
}

/// Reads one line of the request head.
///
/// Running into the limit before the end of the line is an error.
fn read_head_line<R: BufRead>(reader: &mut Take<R>, line: &mut String) -> Result<usize, BadRequest> {
    match reader.read_line(line) {
        Ok(read) => {
            if reader.limit() == 0 && !line.ends_with('\n') {
                debug!("Request head longer than {} bytes", MAX_HEAD_BYTES);
                return Err(BadRequest { code: "400", reason: "Bad Request" })
            }
            Ok(read)
        }
        Err(e) => {
            debug!("Error reading request head:{}", e);
            Err(BadRequest { code: "400", reason: "Bad Request" })
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,
    BadRequest,
    Forbidden,
    NotFound
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::Forbidden => 403,
            Status::NotFound => 404,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
        }
    }
}

/// A response as produced by a handler, before it hits the wire.
#[derive(Clone, Debug)]
pub struct Response {
    status: Status,
    headers: Vec<(&'static str, String)>,
    body: Vec<u8>
}

impl Response {
    pub fn new(status: Status) -> Response {
        Response { status, headers: Vec::new(), body: Vec::new() }
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Response {
        self.headers.push((name, value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Response {
        self.body = body;
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Writes a response, closing the exchange after the body.
///
/// The body is delimited by the connection closing, so no length header
/// is sent. With `suppress_body` only the head goes out.
pub fn write_response<W: Write>(writer: &mut W, response: &Response, suppress_body: bool) -> io::Result<()> {
    write!(writer, "HTTP/1.1 {} {}\r\n", response.status.code(), response.status.reason())?;
    write!(writer, "Connection: close\r\n")?;
    write!(writer, "Date: {}\r\n", Utc::now().format("%a, %d %b %Y %H:%M:%S GMT"))?;
    write!(writer, "Server: {}\r\n", SERVER_NAME)?;
    for (name, value) in &response.headers {
        write!(writer, "{}: {}\r\n", name, value)?;
    }
    write!(writer, "\r\n")?;
    if !suppress_body {
        writer.write_all(&response.body)?;
    }
    writer.flush()
}
