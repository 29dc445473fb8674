use std::time::Duration;

/// Configuration for talking to one camera.
#[derive(Clone, Debug)]
pub struct StreamConfig {
    host: String,
    stream_path: String,
    capture_path: String,
    timeout: Duration,
    retry_delay: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            host: "192.168.4.1".to_string(),
            stream_path: "/stream".to_string(),
            capture_path: "/capture".to_string(),
            timeout: Duration::from_secs(10),
            retry_delay: Duration::from_secs(1),
        }
    }
}

fn with_leading_slash(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

impl StreamConfig {
    /// Configuration for the camera at `host` (an IP, `ip:port`, or full base URL).
    pub fn new(host: impl Into<String>) -> Self {
        Self::default().with_host(host)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the MJPEG endpoint path (e.g., "/stream").
    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = with_leading_slash(path.into());
        self
    }

    /// Set the snapshot endpoint path (e.g., "/capture").
    pub fn with_capture_path(mut self, path: impl Into<String>) -> Self {
        self.capture_path = with_leading_slash(path.into());
        self
    }

    /// Set the request timeout. For the stream this bounds connecting and
    /// each individual read.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the wait before reopening a failed stream.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    // Getters
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn stream_path(&self) -> &str {
        &self.stream_path
    }

    pub fn capture_path(&self) -> &str {
        &self.capture_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        }
    }

    pub fn stream_url(&self) -> String {
        format!("{}{}", self.base_url(), self.stream_path)
    }

    pub fn capture_url(&self) -> String {
        format!("{}{}", self.base_url(), self.capture_path)
    }
}
