use six_bar::mh;

macro_rules! impl_method {
    ($($sym:ident, $name:literal, $full_name:literal)+) => {
        pub(crate) const fn name(&self) -> &'static str {
            match self { $(Self::$sym(_) => $full_name,)+ }
        }

        pub(crate) const fn abbr(&self) -> &'static str {
            match self { $(Self::$sym(_) => $name,)+ }
        }
    };
}

/// Build a solver of the method then apply the builder chain.
///
/// The algorithms are different types, so every arm expands the chain.
macro_rules! build_solver {
    ($method:expr, $func:expr, |$s:ident| $chain:expr) => {
        match $method {
            $crate::syn_method::SynMethod::De(alg) => {
                let $s = six_bar::mh::Solver::build(alg, $func);
                $chain
            }
            $crate::syn_method::SynMethod::Fa(alg) => {
                let $s = six_bar::mh::Solver::build(alg, $func);
                $chain
            }
            $crate::syn_method::SynMethod::Pso(alg) => {
                let $s = six_bar::mh::Solver::build(alg, $func);
                $chain
            }
            $crate::syn_method::SynMethod::Rga(alg) => {
                let $s = six_bar::mh::Solver::build(alg, $func);
                $chain
            }
            $crate::syn_method::SynMethod::Tlbo(alg) => {
                let $s = six_bar::mh::Solver::build(alg, $func);
                $chain
            }
        }
    };
}
pub(crate) use build_solver;

/// Optimization method and its parameters.
#[derive(Clone, serde::Serialize, clap::Subcommand)]
pub(crate) enum SynMethod {
    /// Differential Evolution
    De(mh::De),
    /// Firefly Algorithm
    Fa(mh::Fa),
    /// Particle Swarm Optimization
    Pso(mh::Pso),
    /// Real-coded Genetic Algorithm
    Rga(mh::Rga),
    /// Teaching Learning Based Optimization
    Tlbo(mh::Tlbo),
}

impl Default for SynMethod {
    fn default() -> Self {
        Self::De(mh::De::new())
    }
}

impl SynMethod {
    impl_method! {
        De, "DE", "Differential Evolution"
        Fa, "FA", "Firefly Algorithm"
        Pso, "PSO", "Particle Swarm Optimization"
        Rga, "RGA", "Real-coded Genetic Algorithm"
        Tlbo, "TLBO", "Teaching Learning Based Optimization"
    }
}
