//! HTTP response handlers.
//!
//! Every handler consumes the request, so each request is answered exactly
//! once. `HEAD` gets the status and headers of the matching `GET`.

use crate::utils::mime::{HTML, PLAIN};
use anyhow::Result;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// 200 with an HTML document.
pub fn respond_html(request: Request, body: String) -> Result<()> {
    send_body(request, 200, HTML, body.into_bytes())
}

/// 404 for paths that match no component.
pub fn respond_not_found(request: Request) -> Result<()> {
    let body = format!("404 Not Found: no component at {}", request.url());
    send_body(request, 404, PLAIN, body.into_bytes())
}

/// 500 with the render failure as plain text.
pub fn respond_render_error(request: Request, message: &str) -> Result<()> {
    send_body(request, 500, PLAIN, message.as_bytes().to_vec())
}

/// 405 for anything but `GET` and `HEAD`.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_string("405 Method Not Allowed")
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    request.respond(response)?;
    Ok(())
}

/// 503 while shutting down.
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = if is_head_request(&request) {
        Response::empty(StatusCode(status))
            .with_header(make_header("Content-Type", content_type))
            .with_header(make_header("Cache-Control", "no-store"))
            .boxed()
    } else {
        Response::from_data(body)
            .with_status_code(StatusCode(status))
            .with_header(make_header("Content-Type", content_type))
            .with_header(make_header("Cache-Control", "no-store"))
            .boxed()
    };
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).expect("static header is valid")
}
