//! Development server: build once, then serve the output directory.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Request, Response, Server};

use crate::config::SiteConfig;
use crate::core::BuildMode;
use crate::utils::mime;
use crate::{debug, log};

/// Build in development mode and serve the output directory.
///
/// Blocks until Ctrl-C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    super::build::build_all(config, BuildMode::Development)?;

    let addr = SocketAddr::new(config.serve.interface, config.serve.port);
    let server =
        Server::http(addr).map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
    let server = Arc::new(server);

    // Ctrl-C unblocks the request loop
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let server = Arc::clone(&server);
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
            server.unblock();
        })
        .context("Failed to set Ctrl-C handler")?;
    }

    log!("serve"; "http://{}:{}", config.serve.display_host(), config.serve.port);

    for request in server.incoming_requests() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        if let Err(e) = handle_request(request, config) {
            debug!("serve"; "request error: {e}");
        }
    }

    log!("serve"; "shutting down");
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve_request_path(&config.build.output, request.url()) {
        Some(file) => respond_file(request, &file),
        None => respond_not_found(request),
    }
}

/// Map a request URL to a file in the output directory.
///
/// Directory URLs resolve to their `index.html`; extension-less URLs are
/// treated as pages. Traversal segments are rejected.
fn resolve_request_path(output: &Path, url: &str) -> Option<PathBuf> {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path).decode_utf8().ok()?;

    if decoded.split('/').any(|segment| segment == "..") {
        return None;
    }

    let rel = decoded.trim_matches('/');
    let mut file = output.join(rel);
    if file.is_dir() {
        file = file.join("index.html");
    } else if file.extension().is_none() {
        file = file.join("index.html");
    }

    file.is_file().then_some(file)
}

/// Respond with a static file.
fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let response = Response::from_data(body)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());
    request.respond(response)?;
    Ok(())
}

/// Respond with a plain 404.
fn respond_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("404 not found")
        .with_status_code(404)
        .with_header(Header::from_bytes("Content-Type", mime::types::PLAIN).unwrap());
    request.respond(response)?;
    Ok(())
}
