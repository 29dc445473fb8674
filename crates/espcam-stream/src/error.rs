use std::fmt;

#[derive(Debug)]
pub enum StreamError {
    /// Connection refused, timeout, or a broken body read.
    Http(String),
    /// The camera answered with a non-success status.
    Status(u16),
    /// The multipart framing could not be followed.
    Demux(String),
    /// The server ended the stream.
    Closed,
    Io(std::io::Error),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Http(msg) => write!(f, "http error: {msg}"),
            StreamError::Status(code) => write!(f, "unexpected status: {code}"),
            StreamError::Demux(msg) => write!(f, "demux error: {msg}"),
            StreamError::Closed => write!(f, "stream closed by server"),
            StreamError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<reqwest::Error> for StreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => StreamError::Status(status.as_u16()),
            None => StreamError::Http(err.to_string()),
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::Io(err)
    }
}
