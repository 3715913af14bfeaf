//! `issuebook` (ib) - Single-user issue tracker
//!
//! Issues with request metadata, a dated task log and photo/file
//! attachments, kept in one JSON slot on disk.

use issuebook::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
