//! Snowflake ID Generator
//!
//! Time-ordered 64-bit identifiers for new entities.
//!
//! ```text
//! 63                          22           12            0
//! +----------------------------+------------+------------+
//! |   ms since epoch (41 bits) | machine(10)| seq (12)   |
//! +----------------------------+------------+------------+
//! ```

use chrono::Utc;
use parking_lot::Mutex;

/// Default epoch (2024-01-01T00:00:00.000Z)
pub const DEFAULT_EPOCH: u64 = 1_704_067_200_000;

const MACHINE_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const MACHINE_MASK: u64 = (1 << MACHINE_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

#[derive(Debug, Default)]
struct State {
    last_timestamp: u64,
    sequence: u64,
}

/// Snowflake ID generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch: u64,
    state: Mutex<State>,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator. The machine id is truncated to 10 bits.
    pub fn new(machine_id: u16, epoch: u64) -> Self {
        Self {
            machine_id: machine_id as u64 & MACHINE_MASK,
            epoch,
            state: Mutex::new(State::default()),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();
        let mut timestamp = self.current_timestamp().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond
                while timestamp <= state.last_timestamp {
                    std::hint::spin_loop();
                    timestamp = self.current_timestamp();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        let id = ((timestamp - self.epoch) << (MACHINE_BITS + SEQUENCE_BITS))
            | (self.machine_id << SEQUENCE_BITS)
            | state.sequence;

        id as i64
    }

    /// Milliseconds since the Unix epoch at which `id` was generated.
    pub fn timestamp_of(&self, id: i64) -> u64 {
        ((id as u64) >> (MACHINE_BITS + SEQUENCE_BITS)) + self.epoch
    }

    fn current_timestamp(&self) -> u64 {
        (Utc::now().timestamp_millis() as u64).max(self.epoch)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(1, DEFAULT_EPOCH)
    }
}
