//! 具体渠道实现

pub mod slack;
pub mod stdout;

pub use slack::{SlackChannel, SlackConfig, SLACK_API_URL};
pub use stdout::StdoutChannel;
