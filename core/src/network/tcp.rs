use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::session::SessionError;

/// Opens and immediately drops a TCP connection to `host:port`.
///
/// Name resolution happens inside the connect, so an unknown hostname is
/// reported the same way as a refused connection.
pub async fn probe(host: &str, port: u16, probe_timeout: Duration) -> Result<SocketAddr, SessionError> {
    match timeout(probe_timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => stream.peer_addr().map_err(|source| SessionError::Connect {
            host: host.to_string(),
            port,
            source,
        }),
        Ok(Err(source)) => Err(SessionError::Connect {
            host: host.to_string(),
            port,
            source,
        }),
        Err(_elapsed) => Err(SessionError::Timeout {
            host: host.to_string(),
            port,
        }),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
