//! Shared helpers for the workspace specs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use pdfq_server::{Config, ServerContext};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Writes `contents` to `root/name`, creating parent directories as needed.
pub fn write_file(root: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    let mut f = std::fs::File::create(&path).expect("create file");
    f.write_all(contents).expect("write file");
    path
}

/// A running server bound to an ephemeral port on 127.0.0.1.
pub struct RunningServer {
    pub addr: std::net::SocketAddr,
    pub token: Option<String>,
    _handle: tokio::task::JoinHandle<()>,
}

impl RunningServer {
    /// Starts a server rooted at `root` with an optional auth token, bound
    /// to port 0 so the OS assigns a free port.
    pub async fn start(root: &Path, token: Option<&str>) -> RunningServer {
        let config = Config { root: root.to_path_buf(), bind: "127.0.0.1".to_string(), port: 0, token: token.map(str::to_string) };
        let ctx = Arc::new(ServerContext::new(config.root, config.token, config.bind, config.port));
        ctx.queue.init().expect("queue init");

        let listener = pdfq_server::Listener::bind(ctx).await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            listener.run().await;
        });

        RunningServer { addr, token: token.map(str::to_string), _handle: handle }
    }

    /// Sends a raw HTTP/1.1 request and returns `(status, headers, body)`.
    pub async fn request(&self, method: &str, path_and_query: &str, headers: &[(&str, &str)], body: &[u8]) -> (u16, Vec<(String, String)>, Vec<u8>) {
        let mut stream = TcpStream::connect(self.addr).await.expect("connect");

        let mut head = format!("{method} {path_and_query} HTTP/1.1\r\nHost: 127.0.0.1\r\n");
        for (k, v) in headers {
            head.push_str(&format!("{k}: {v}\r\n"));
        }
        if !body.is_empty() {
            head.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        head.push_str("\r\n");

        stream.write_all(head.as_bytes()).await.expect("write head");
        if !body.is_empty() {
            stream.write_all(body).await.expect("write body");
        }
        stream.shutdown().await.ok();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.expect("read response");

        parse_response(&raw)
    }
}

fn parse_response(raw: &[u8]) -> (u16, Vec<(String, String)>, Vec<u8>) {
    let split = raw.windows(4).position(|w| w == b"\r\n\r\n").expect("response has header terminator");
    let head = std::str::from_utf8(&raw[..split]).expect("response head is utf8");
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().expect("status line");
    let status: u16 = status_line.split_whitespace().nth(1).expect("status code").parse().expect("status code is numeric");

    let headers = lines
        .filter(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':').map(|(k, v)| (k.trim().to_string(), v.trim().to_string())))
        .collect();

    (status, headers, body)
}

/// Builds a `multipart/form-data` body from text and file fields.
pub fn multipart_body(boundary: &str, text_fields: &[(&str, &str)], file_field: (&str, &str, &[u8])) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, value) in text_fields {
        out.extend_from_slice(format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes());
    }
    let (name, filename, bytes) = file_field;
    out.extend_from_slice(format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n").as_bytes());
    out.extend_from_slice(bytes);
    out.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    out
}
