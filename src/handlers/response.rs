//! # Response contract for service-context rendering.

use std::io::{self, Write};

/// A rendered fault response, ready to be sent.
///
/// [`Handle::render`](crate::Handle::render) builds one of these for every
/// service-context dispatch; the interceptor then calls [`send`](Response::send)
/// once with the runtime's outbound channel and flushes the channel. Status
/// line, headers, and body shape are entirely the producer's business.
pub trait Response: Send {
    /// Writes the response to the outbound channel.
    fn send(&self, channel: &mut dyn Write) -> io::Result<()>;
}
