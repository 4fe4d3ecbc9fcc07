//! # Calcvault CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! calcvault -u alice -p '…' init          # provision the reference credential
//! calcvault -u alice -p '…' add Sum 2+2   # create a note
//! calcvault -u alice -p '…'               # list notes
//! calcvault -u alice -p '…' eval 1        # evaluate note 1
//! ```
//!
//! Credentials may also come from `CALCVAULT_USERNAME` / `CALCVAULT_PASSWORD`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
