//! Transmission loop
//!
//! Writes one GPGGA sentence per interval to an [`NmeaSink`] until the
//! [`CancellationToken`] is cancelled. The sink is wrapped in a
//! [`SinkGuard`] so it is closed exactly once however the loop ends.

use crate::core::SENTENCE_TERMINATOR;
use crate::hardware::{CommError, CommResult, NmeaSink};
use crate::nmea::SentenceGenerator;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Shared stop flag, set from the interrupt handler
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Closes the wrapped sink when dropped
pub struct SinkGuard<'a, S: NmeaSink> {
    sink: &'a mut S,
}

impl<'a, S: NmeaSink> SinkGuard<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink }
    }

    pub fn sink(&mut self) -> &mut S {
        &mut *self.sink
    }
}

impl<S: NmeaSink> Drop for SinkGuard<'_, S> {
    fn drop(&mut self) {
        if !self.sink.is_open() {
            return;
        }
        if let Err(e) = self.sink.close() {
            error!("Failed to close {}: {}", self.sink.port_name(), e);
        }
    }
}

/// Outcome of a run that ended by cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub sentences_sent: u64,
}

/// Periodic GPGGA emitter
pub struct Simulator {
    generator: SentenceGenerator,
    interval: Duration,
    clock: fn() -> DateTime<Utc>,
}

impl Simulator {
    pub fn new(generator: SentenceGenerator, interval: Duration) -> Self {
        Self {
            generator,
            interval,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, mainly for tests
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Sentence with CRLF terminator as ASCII bytes
    pub fn frame(&self, now: DateTime<Utc>) -> CommResult<Vec<u8>> {
        let mut sentence = self.generator.sentence_at(now);
        sentence.push_str(SENTENCE_TERMINATOR);

        if !sentence.is_ascii() {
            return Err(CommError::InvalidMessage {
                details: format!("sentence is not ASCII: {:?}", sentence),
            });
        }

        Ok(sentence.into_bytes())
    }

    /// Emit sentences until `token` is cancelled.
    ///
    /// The sink is closed before this returns, on success and on error.
    pub fn run<S: NmeaSink>(&self, sink: &mut S, token: &CancellationToken) -> CommResult<RunSummary> {
        let mut guard = SinkGuard::new(sink);
        let mut sentences_sent = 0u64;

        info!(
            "Emitting GPGGA for {:.4}, {:.4} on {} every {:?}",
            self.generator.position().latitude,
            self.generator.position().longitude,
            guard.sink().port_name(),
            self.interval
        );

        while !token.is_cancelled() {
            let bytes = self.frame((self.clock)())?;
            guard.sink().write_sentence(&bytes)?;
            sentences_sent += 1;
            debug!("{}", String::from_utf8_lossy(&bytes).trim_end());

            thread::sleep(self.interval);
        }

        info!("Stopped by user after {} sentences", sentences_sent);
        Ok(RunSummary { sentences_sent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::hardware::MockTransmitter;
    use crate::nmea::verify;
    use chrono::TimeZone;
    use std::time::Instant;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    /// Cancels the token once `limit` sentences were written
    struct CancellingSink {
        inner: MockTransmitter,
        token: CancellationToken,
        limit: usize,
    }

    impl NmeaSink for CancellingSink {
        fn write_sentence(&mut self, bytes: &[u8]) -> CommResult<()> {
            self.inner.write_sentence(bytes)?;
            if self.inner.get_sent_messages().len() >= self.limit {
                self.token.cancel();
            }
            Ok(())
        }

        fn close(&mut self) -> CommResult<()> {
            self.inner.close()
        }

        fn is_open(&self) -> bool {
            self.inner.is_open()
        }

        fn port_name(&self) -> &str {
            self.inner.port_name()
        }
    }

    /// Records when each write happened
    struct TimedSink {
        inner: CancellingSink,
        written_at: Vec<Instant>,
    }

    impl NmeaSink for TimedSink {
        fn write_sentence(&mut self, bytes: &[u8]) -> CommResult<()> {
            self.written_at.push(Instant::now());
            self.inner.write_sentence(bytes)
        }

        fn close(&mut self) -> CommResult<()> {
            self.inner.close()
        }

        fn is_open(&self) -> bool {
            self.inner.is_open()
        }

        fn port_name(&self) -> &str {
            self.inner.port_name()
        }
    }

    fn simulator() -> Simulator {
        Simulator::new(
            SentenceGenerator::new(Position::new(37.7749, -122.4194)),
            Duration::from_millis(5),
        )
        .with_clock(noon)
    }

    #[test]
    fn test_frame_is_terminated() {
        let bytes = simulator().frame(noon()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "$GPGGA,120000.00,3746.4940,N,12225.1640,W,1,08,0.9,545.4,M,46.9,M,,*7D\r\n"
        );
    }

    #[test]
    fn test_run_until_cancelled() {
        let token = CancellationToken::new();
        let mut sink = CancellingSink {
            inner: MockTransmitter::new(),
            token: token.clone(),
            limit: 3,
        };

        let summary = simulator().run(&mut sink, &token).unwrap();

        assert_eq!(summary.sentences_sent, 3);
        assert_eq!(sink.inner.get_sent_messages().len(), 3);
        assert_eq!(sink.inner.close_count(), 1);
        for sentence in sink.inner.sent_sentences() {
            assert!(sentence.ends_with("\r\n"));
            assert!(verify(&sentence).is_ok());
        }
    }

    #[test]
    fn test_writes_are_one_interval_apart() {
        let interval = Duration::from_millis(30);
        let token = CancellationToken::new();
        let mut sink = TimedSink {
            inner: CancellingSink {
                inner: MockTransmitter::new(),
                token: token.clone(),
                limit: 4,
            },
            written_at: Vec::new(),
        };

        let simulator = Simulator::new(
            SentenceGenerator::new(Position::new(37.7749, -122.4194)),
            interval,
        )
        .with_clock(noon);
        let summary = simulator.run(&mut sink, &token).unwrap();

        assert_eq!(summary.sentences_sent, 4);
        assert_eq!(sink.written_at.len(), 4);
        for pair in sink.written_at.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= interval);
        }
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let mut sink = MockTransmitter::new();

        let summary = simulator().run(&mut sink, &token).unwrap();

        assert_eq!(summary.sentences_sent, 0);
        assert!(sink.get_sent_messages().is_empty());
        assert_eq!(sink.close_count(), 1);
    }

    #[test]
    fn test_write_error_propagates_and_closes() {
        let token = CancellationToken::new();
        let mut sink = MockTransmitter::new().fail_on_write(2);

        let result = simulator().run(&mut sink, &token);

        assert!(matches!(result, Err(CommError::Io { .. })));
        assert_eq!(sink.get_sent_messages().len(), 2);
        assert_eq!(sink.close_count(), 1);
        assert!(!sink.is_open());
    }

    #[test]
    fn test_guard_closes_once() {
        let mut sink = MockTransmitter::new();
        {
            let mut guard = SinkGuard::new(&mut sink);
            guard.sink().write_sentence(b"$X*58\r\n").unwrap();
        }
        assert_eq!(sink.close_count(), 1);

        // Already closed: the guard leaves it alone
        drop(SinkGuard::new(&mut sink));
        assert_eq!(sink.close_count(), 1);
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
