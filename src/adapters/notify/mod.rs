//! Origin site notification adapter.

mod http_notifier;

pub use http_notifier::HttpOrderNotifier;
