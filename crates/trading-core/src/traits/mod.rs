//! Collaborator traits for the signal pipeline.

mod candle_source;
mod indicator;
mod notifier;

pub use candle_source::CandleSource;
pub use indicator::Indicator;
pub use notifier::SignalNotifier;
