// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection accept loop (spec §4.5, §5 REDESIGN): the source forks a
//! child per accepted connection and tracks a signal-atomic counter capped
//! at 32; here a `tokio::spawn`ed task plays the child's role and a
//! `tokio::sync::Semaphore` of the same size plays the counter's role,
//! since `unsafe_code = "forbid"` rules out `libc::fork` and a raw signal
//! handler. 503 on saturation is preserved exactly (spec §5).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::body::read_body;
use crate::config::MAX_ACTIVE_CONNECTIONS;
use crate::context::ServerContext;
use crate::error::ServerError;
use crate::http::request::read_request;
use crate::http::response::Response;
use crate::routes::dispatch;

pub struct Listener {
    socket: TcpListener,
    ctx: Arc<ServerContext>,
    limiter: Arc<Semaphore>,
}

impl Listener {
    pub async fn bind(ctx: Arc<ServerContext>) -> Result<Self, ServerError> {
        let addr = format!("{}:{}", ctx.bind, ctx.port);
        let socket = TcpListener::bind(&addr).await.map_err(ServerError::Io)?;
        Ok(Listener { socket, ctx, limiter: Arc::new(Semaphore::new(MAX_ACTIVE_CONNECTIONS)) })
    }

    /// The address actually bound, useful when `port` was 0 (tests).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub async fn run(self) {
        loop {
            let (stream, addr) = match self.socket.accept().await {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };

            let permit = self.limiter.clone().try_acquire_owned().ok();
            let ctx = Arc::clone(&self.ctx);

            tokio::spawn(async move {
                match permit {
                    Some(permit) => {
                        handle_connection(stream, addr, &ctx).await;
                        drop(permit);
                    }
                    None => reject_saturated(stream).await,
                }
            });
        }
    }
}

async fn reject_saturated(mut stream: TcpStream) {
    let resp = Response::text(503, "Service Unavailable", "service unavailable\n");
    let _ = stream.write_all(&resp.to_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn handle_connection(mut stream: TcpStream, addr: SocketAddr, ctx: &ServerContext) {
    let start = Instant::now();

    let request = match read_request(&mut stream).await {
        Ok(req) => req,
        Err(e) => {
            respond_and_log(&mut stream, addr, "-", "-", start, Response::from_error(&e)).await;
            return;
        }
    };

    let body = match read_body(&mut stream, &request).await {
        Ok(body) => body,
        Err(e) => {
            respond_and_log(&mut stream, addr, &request.method, &request.path, start, Response::from_error(&e)).await;
            return;
        }
    };

    let method = request.method.clone();
    let path = request.path.clone();
    let response = dispatch(request, body, ctx).await;
    respond_and_log(&mut stream, addr, &method, &path, start, response).await;
}

async fn respond_and_log(stream: &mut TcpStream, addr: SocketAddr, method: &str, path: &str, start: Instant, response: Response) {
    let status = response.status;
    let _ = stream.write_all(&response.to_bytes()).await;
    let _ = stream.shutdown().await;

    let sanitized_path: String = path.chars().map(|c| if c.is_control() { '?' } else { c }).collect();
    let latency_ms = start.elapsed().as_millis();
    info!(%addr, method, path = %sanitized_path, status, latency_ms, "request completed");
}
