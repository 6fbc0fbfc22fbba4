use socketcan::{CanFilter, CanFrame, CanSocket, EmbeddedFrame, Id, Socket, SocketOptions};
use std::{io, time::Duration};
use tracing::{info, warn};

use crate::frame::RawFrame;
use crate::registry::IdFilter;

/// Kernel flag marking a 29-bit identifier in `can_id`
const CAN_EFF_FLAG: u32 = 0x8000_0000;

/// Opens a CAN socket with automatic retry on failure
///
/// # Arguments
/// * `interface` - Name of the CAN interface (e.g., "can0", "vcan0")
pub fn open_can_socket_with_retry(interface: &str) -> CanSocket {
    loop {
        match CanSocket::open(interface) {
            Ok(socket) => {
                info!("Successfully opened CAN interface: {}", interface);
                return socket;
            }
            Err(e) => {
                warn!("Failed to open CAN interface '{}': {}", interface, e);
                warn!("Retrying in 10 seconds...");
                std::thread::sleep(Duration::from_secs(10));
            }
        }
    }
}

/// Installs the acceptance filters and a read timeout on the socket
///
/// The timeout keeps the reception loop from blocking forever on a silent bus.
pub fn configure_socket(socket: &CanSocket, filters: &[IdFilter]) -> io::Result<()> {
    socket.set_read_timeout(Duration::from_millis(500))?;
    let kernel_filters: Vec<CanFilter> = filters.iter().map(to_kernel_filter).collect();
    socket.set_filters(&kernel_filters)?;
    info!("Installed {} CAN filters", kernel_filters.len());
    Ok(())
}

fn to_kernel_filter(filter: &IdFilter) -> CanFilter {
    if filter.extended {
        CanFilter::new(filter.id | CAN_EFF_FLAG, filter.mask | CAN_EFF_FLAG)
    } else {
        CanFilter::new(filter.id, filter.mask)
    }
}

/// Reads the next data frame and stamps it with `timestamp`
///
/// Remote and error frames carry no payload for the decoders and are skipped.
pub fn read_raw_frame(socket: &CanSocket, timestamp: impl Fn() -> f64) -> io::Result<Option<RawFrame>> {
    match socket.read_frame()? {
        CanFrame::Data(frame) => {
            let id = match frame.id() {
                Id::Standard(id) => id.as_raw() as u32,
                Id::Extended(id) => id.as_raw(),
            };
            Ok(Some(RawFrame::new(id, frame.data(), timestamp())))
        }
        CanFrame::Remote(_) | CanFrame::Error(_) => Ok(None),
    }
}

/// True for read errors that only mean "no frame within the timeout"
pub fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        assert!(is_timeout(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(is_timeout(&io::Error::from(io::ErrorKind::TimedOut)));
        assert!(!is_timeout(&io::Error::from(io::ErrorKind::BrokenPipe)));
    }
}
