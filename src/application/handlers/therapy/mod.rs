//! Therapy reply generation.

mod reply_generator;

pub use reply_generator::{
    ReplyGeneratorConfig, TherapyReply, TherapyReplyGenerator, FALLBACK_CONFIDENCE,
    MODEL_REPLY_CONFIDENCE,
};
