//! Operators. Each module holds the operator struct returned by the
//! matching `ObservableExt` method and the observer it subscribes upstream.

pub mod catch_error;
pub mod debounce;
pub mod delay;
pub mod distinct_until_changed;
pub mod filter;
pub mod finalize;
pub mod map;
pub mod map_err;
pub mod observe_on;
pub mod on_complete;
pub mod switch_map;
pub mod take;
pub mod tap;
