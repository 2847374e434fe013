mod debounce;

pub use debounce::{Debouncer, LivenessFlag};
