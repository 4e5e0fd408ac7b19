//! Actions Module - one-shot effects bound to viewport entry
//!
//! - **Counter** - count-up animation driven by animation frames
//! - **Reveal** - terminal "visible" markers
//! - **Lazy** - deferred image source promotion

mod counter;
mod lazy;
mod reveal;

pub use counter::{counter_action, counter_final_action, parse_target, CounterTask};
pub use lazy::{lazy_image_action, LAZY_CLASS};
pub use reveal::{arm_reveal, reveal_action, PENDING_CLASS, VISIBLE_CLASSES};
