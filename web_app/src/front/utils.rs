use ntex::web;

use crate::consts;

/// Address of the client that sent `req`.
///
/// Behind a reverse proxy the `Forwarded` / `X-Forwarded-For` client is used;
/// otherwise the socket peer address.
pub fn client_addr(req: &web::HttpRequest) -> String {
    req.connection_info()
        .remote()
        .filter(|addr| !addr.is_empty())
        .unwrap_or(consts::UNKNOWN_CLIENT_ADDR)
        .to_string()
}
