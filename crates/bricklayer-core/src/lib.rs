/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("smoke", "Connecting to {}", host);
/// log_status!("generate", "Wrote {}", path);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod artifact;
pub mod env;
pub mod error;
pub mod json;
pub mod output;
pub mod prompt;
pub mod smoke;
pub mod template;
pub mod tty;
pub mod warehouse;

pub use error::{Error, ErrorCode, Result};
