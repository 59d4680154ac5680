mod logger;
mod pose;
mod sweep;
mod syn;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about)]
pub(crate) struct Entry {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Synthesize six-bar linkages for the input-output angle pairs
    Syn(syn::Syn),
    /// Print the angle relation of a linkage file as CSV
    Sweep(sweep::Sweep),
    /// Print the joints and the angles of a linkage file at an input angle
    Pose(pose::Pose),
}

impl Entry {
    pub(super) fn main() {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        register_panic_hook();
        match entry.cmd {
            Cmd::Syn(syn) => syn::syn(syn),
            Cmd::Sweep(sweep) => sweep::sweep(sweep),
            Cmd::Pose(pose) => pose::pose(pose),
        }
    }
}

/// Read a linkage file.
fn load_linkage(path: &std::path::Path) -> six_bar::SixBar {
    let s = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    ron::from_str(&s).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

fn register_panic_hook() {
    // Print panic messages without stack trace
    std::panic::set_hook(Box::new(|info| {
        match info.payload().downcast_ref::<&str>() {
            Some(s) => eprintln!("{s}"),
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => eprintln!("{s}"),
                None => eprintln!("{info}"),
            },
        }
        std::process::exit(1);
    }));
}
