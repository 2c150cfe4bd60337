//! Cumulative hierarchical timers for solver instrumentation.

// wasm targets have no std clock, so route through web_time there.
// Backends also use this Instant for their own solve-time statistics.
cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        pub use web_time::{Duration, Instant};
    } else {
        pub use std::time::{Duration, Instant};
    }
}

mod timers;
pub use timers::Timers;
pub(crate) use timers::{notimeit, timeit};
