use std::io::{self, Read, Write};
use std::net::SocketAddr;
use bufstream::BufStream;
use log::{debug, error, info, warn};
use crate::config::Config;
use super::access::{client_identifier, AccessPolicy};
use super::content_manager::ContentManager;
use super::file_system::request_file_name;
use super::http::{parse_request, write_response, Request, Response, Status};

/// Serves a single request on a freshly accepted connection.
pub fn handle_client<M: ContentManager, S: Read + Write>(
    stream: S, peer: SocketAddr, config: &Config, manager: &M
) {
    let mut buffed = BufStream::new(stream);

    let result = match parse_request(&mut buffed) {
        Ok(Some(request)) => {
            discard_body(&request, &mut buffed);
            let response = handle_request(&request, &peer, config, manager);
            write_response(&mut buffed, &response, request.is_head())
        }
        Ok(None) => Ok(()),
        Err(bad_request) => {
            debug!("Bad request from {}: {}", peer, bad_request);
            write_response(&mut buffed, &Response::new(Status::BadRequest), false)
        }
    };
    if let Err(err) = result {
        warn!("Error while writing response to {}: {}", peer, err);
    }
}

/// Produces the response for a request.
///
/// The method is never looked at. The client has to pass the access check
/// before the file system is touched at all.
pub fn handle_request<M: ContentManager>(
    request: &Request, peer: &SocketAddr, config: &Config, manager: &M
) -> Response {
    if let AccessPolicy::AllowListed(_) = config.access {
        let client = client_identifier(request.headers.forwarded_for(), peer);
        if !config.access.admits(&client) {
            info!("Forbidden: {} {} from {}", request.method, request.target, client);
            return Response::new(Status::Forbidden)
        }
    }

    let file_name = request_file_name(&request.target);
    match manager.find_content(file_name) {
        Ok(content) => {
            let mut response = Response::new(Status::Ok);
            if let Some(mime_type) = config.mime_types.for_file_name(file_name) {
                response = response.with_header("Content-Type", mime_type);
            }
            if let Some(ref origin) = config.cors_origin {
                response = response.with_header(
                    "Access-Control-Allow-Origin", origin
                );
            }
            response.with_body(content)
        }
        Err(err) => {
            error!("Error reading file {}: {}", file_name, err);
            Response::new(Status::NotFound)
        }
    }
}

/// Reads and drops a request body so the peer sees an orderly close.
fn discard_body<R: Read>(request: &Request, reader: &mut R) {
    if let Some(length) = request.headers.content_length() {
        if let Err(err) = io::copy(&mut reader.take(length), &mut io::sink()) {
            debug!("Error discarding request body: {}", err);
        }
    }
}
