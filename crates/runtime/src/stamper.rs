//! Wall-clock slot stamping.

use bummerl_core::{SlotId, SlotStamper, Timestamp};
use rand::Rng;

/// [`SlotStamper`] backed by the system clock and a thread-local RNG.
///
/// Ids combine the capture time with 32 random bits, e.g.
/// `18c2f0a4b1e-5f3a9c01`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemStamper;

impl SlotStamper for SystemStamper {
    fn timestamp(&mut self) -> Timestamp {
        chrono::Utc::now().timestamp_millis()
    }

    fn fresh_id(&mut self) -> SlotId {
        let now = chrono::Utc::now().timestamp_millis();
        let salt: u32 = rand::thread_rng().r#gen();
        SlotId::new(format!("{:x}-{:08x}", now, salt))
    }
}
