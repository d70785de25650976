//! Daemon core: the two long-running loop halves
//!
//! The receive loop drives captured frames through the classifier and
//! prints accepted messages; the send loop turns interactive input lines
//! into broadcast frames. Each half owns one side of the link; the only
//! other shared value is the copyable local identity, fixed at bootstrap.

use std::io::{BufRead, Write};

use tokio::task;
use tracing::{debug, error, trace};

use crate::chat::{self, Classification};
use crate::link::{FrameSink, FrameSource, Link};
use crate::wire::MacAddr;
use crate::{ChatError, Result};

/// The assembled chat daemon: local identity plus both link halves
pub struct ChatDaemon {
    local_addr: MacAddr,
    source: Box<dyn FrameSource>,
    sink: Box<dyn FrameSink>,
}

impl ChatDaemon {
    /// Build a daemon from an opened link
    pub fn new(link: Link) -> Self {
        Self {
            local_addr: link.local_addr,
            source: Box::new(link.source),
            sink: Box::new(link.sink),
        }
    }

    /// Hardware address this station suppresses its own frames by
    pub fn local_addr(&self) -> MacAddr {
        self.local_addr
    }

    /// Run both loops to completion.
    ///
    /// Each loop blocks indefinitely on its own source (captured frames,
    /// interactive input), so both run as blocking tasks. One loop ending
    /// does not interrupt the other; the daemon is done when both are.
    pub async fn run(self) -> Result<()> {
        let local = self.local_addr;
        let mut source = self.source;
        let mut sink = self.sink;

        let receiver = task::spawn_blocking(move || {
            receive_loop(source.as_mut(), local, &mut std::io::stdout())
        });

        let sender = task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            send_loop(&mut input, &mut std::io::stdout(), sink.as_mut(), local)
        });

        let (received, sent) = tokio::join!(receiver, sender);
        received.map_err(|e| ChatError::System(format!("receive task failed: {}", e)))??;
        sent.map_err(|e| ChatError::System(format!("send task failed: {}", e)))??;

        Ok(())
    }
}

/// Drive captured frames through the classifier, printing accepted chat
/// messages.
///
/// Rejected frames are the expected majority case and are skipped
/// silently. Returns when the frame source is exhausted or fails; that is
/// one half of the program's natural shutdown.
pub fn receive_loop(
    source: &mut dyn FrameSource,
    local: MacAddr,
    out: &mut impl Write,
) -> Result<()> {
    loop {
        let raw = match source.next_frame() {
            Ok(raw) => raw,
            Err(e) => {
                debug!("frame source closed: {}", e);
                return Ok(());
            }
        };

        match chat::classify(&raw, local) {
            Classification::Accepted(msg) => {
                // Return to line start so the pending prompt line is
                // overwritten rather than interleaved.
                writeln!(out, "\r< {}", msg)?;
                out.flush()?;
            }
            Classification::Rejected(reason) => {
                trace!("frame rejected: {:?}", reason);
            }
        }
    }
}

/// Read interactive lines, build chat frames and transmit them.
///
/// Empty lines are skipped and re-prompted. Returns `Ok` on end-of-input;
/// any build or transmit error is terminal for this loop, since a failing
/// handle will not recover.
pub fn send_loop(
    input: &mut impl BufRead,
    out: &mut impl Write,
    sink: &mut dyn FrameSink,
    local: MacAddr,
) -> Result<()> {
    loop {
        write!(out, "\r> ")?;
        out.flush()?;

        let mut line = String::new();
        let n = input.read_line(&mut line)?;
        if n == 0 {
            debug!("end of input, send loop done");
            return Ok(());
        }

        let text = line.trim_end_matches('\n').trim_end_matches('\r');
        if text.is_empty() {
            continue;
        }

        let frame = match chat::build_frame(text, local) {
            Ok(frame) => frame,
            Err(e) => {
                error!("failed to build chat frame: {}", e);
                writeln!(out, "{}", e)?;
                return Err(e);
            }
        };

        if let Err(e) = sink.send_frame(&frame) {
            error!("failed to transmit chat frame: {}", e);
            writeln!(out, "{}", e)?;
            return Err(e);
        }
    }
}
