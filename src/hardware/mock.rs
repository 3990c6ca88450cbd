//! Mock output channel for testing and development

use crate::hardware::{CommError, CommResult, NmeaSink};

/// Records every sentence written instead of touching a device
pub struct MockTransmitter {
    port_name: String,
    sent_messages: Vec<Vec<u8>>,
    open: bool,
    close_count: u32,
    /// Fail the write with this index (0-based)
    fail_on_write: Option<usize>,
}

impl MockTransmitter {
    /// Create a new, open mock transmitter
    pub fn new() -> Self {
        Self {
            port_name: "mock".to_string(),
            sent_messages: Vec::new(),
            open: true,
            close_count: 0,
            fail_on_write: None,
        }
    }

    /// Make the nth write fail with an I/O error
    pub fn fail_on_write(mut self, index: usize) -> Self {
        self.fail_on_write = Some(index);
        self
    }

    /// Get all messages that were written
    pub fn get_sent_messages(&self) -> &[Vec<u8>] {
        &self.sent_messages
    }

    /// Written messages decoded as text
    pub fn sent_sentences(&self) -> Vec<String> {
        self.sent_messages
            .iter()
            .map(|m| String::from_utf8_lossy(m).into_owned())
            .collect()
    }

    /// Number of times `close` actually released the channel
    pub fn close_count(&self) -> u32 {
        self.close_count
    }
}

impl Default for MockTransmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl NmeaSink for MockTransmitter {
    fn write_sentence(&mut self, bytes: &[u8]) -> CommResult<()> {
        if !self.open {
            return Err(CommError::Closed {
                port: self.port_name.clone(),
            });
        }

        if self.fail_on_write == Some(self.sent_messages.len()) {
            return Err(CommError::Io {
                operation: "write".to_string(),
                description: "Simulated write failure".to_string(),
            });
        }

        self.sent_messages.push(bytes.to_vec());
        Ok(())
    }

    fn close(&mut self) -> CommResult<()> {
        if self.open {
            self.open = false;
            self.close_count += 1;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn port_name(&self) -> &str {
        &self.port_name
    }
}
