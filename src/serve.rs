//! Feed server.
//!
//! A lightweight HTTP server built on `tiny_http` that answers a single
//! route, the feed path (`/rss.xml` by default). The feed is rebuilt from
//! the content source on every request; nothing is cached.
//!
//! | Request                     | Response                              |
//! |-----------------------------|---------------------------------------|
//! | `GET`/`HEAD` feed path      | `200`, `application/xml`, the feed    |
//! | same, content source fails  | `500`, `text/plain`, the error chain  |
//! | other method on feed path   | `405` with `Allow: GET, HEAD`         |
//! | anything else               | `404`                                 |

use crate::{
    config::SiteConfig, content::ContentSource, generator::rss::render_rss, log,
};
use anyhow::{Context, Result, anyhow};
use std::{net::SocketAddr, sync::Arc};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the feed until Ctrl+C is received.
pub fn serve_feed(config: &SiteConfig, source: &dyn ContentSource) -> Result<()> {
    let interface: std::net::IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}{}", addr, config.feed.path);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, source) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// A response, independent of the transport.
#[derive(Debug, PartialEq)]
struct Reply {
    status: u16,
    content_type: &'static str,
    allow: Option<&'static str>,
    body: String,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            allow: None,
            body: body.into(),
        }
    }
}

/// Route a request to a reply.
fn route(method: &Method, url: &str, config: &SiteConfig, source: &dyn ContentSource) -> Reply {
    // Decode URL-encoded characters and strip the query string
    let url_path = urlencoding::decode(url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| url.to_owned());
    let path = url_path.split(['?', '#']).next().unwrap_or_default();

    if path != config.feed.path {
        return Reply::text(404, "404 Not Found");
    }

    if !matches!(method, Method::Get | Method::Head) {
        return Reply {
            allow: Some("GET, HEAD"),
            ..Reply::text(405, "405 Method Not Allowed")
        };
    }

    match render_rss(config, source) {
        Ok(xml) => Reply {
            status: 200,
            content_type: XML_CONTENT_TYPE,
            allow: None,
            body: xml,
        },
        Err(e) => {
            log!("error"; "{e:#}");
            Reply::text(500, format!("500 Internal Server Error\n\n{e:?}"))
        }
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig, source: &dyn ContentSource) -> Result<()> {
    let reply = route(request.method(), request.url(), config, source);

    let mut response = Response::from_string(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header("Content-Type", reply.content_type)?);
    if let Some(allow) = reply.allow {
        response = response.with_header(header("Allow", allow)?);
    }

    request.respond(response)?;
    Ok(())
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|_| anyhow!("invalid header `{name}: {value}`"))
}
