//! Request timing instrumentation
//!
//! A pure side-channel annotator: one stamp taken immediately before dispatch,
//! one immediately after completion, composed explicitly by the client. It
//! never touches the payload it measures.

use std::time::{Duration, Instant};

/// Timing state carried alongside a single in-flight request.
///
/// Created on the outgoing path, consumed on the incoming path. Both stamps
/// must come from the same `Timing` value; a duration is only meaningful for
/// the request that produced it.
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    issued_at: Instant,
}

/// Outgoing-path stamp: record the issued-at instant for a request about to be
/// dispatched.
pub fn start() -> Timing {
    Timing {
        issued_at: Instant::now(),
    }
}

/// Incoming-path stamp: compute the round-trip duration from the issued-at
/// instant carried by the originating request.
///
/// Called for successful and failed completions alike, so HTTP error responses
/// are timed the same as 2xx responses.
pub fn finish(timing: Timing) -> Duration {
    timing.issued_at.elapsed()
}
