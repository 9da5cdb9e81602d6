//! bishop main entrypoint.

use bishop::run;
use bishop::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
