//! Command line tool of the six-bar linkage simulator and synthesizer.
//!
//! + `syn` synthesizes linkages for input/output angle targets.
//! + `sweep` prints the angle relation of a linkage as CSV.
//! + `pose` prints one position of a linkage and optionally draws it.
mod cli;
mod syn_method;

fn main() {
    cli::Entry::main()
}
