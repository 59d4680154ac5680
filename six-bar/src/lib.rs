//! Six-bar is a simulator and a synthesizing tool for planar six-bar linkages.
//!
//! Five topologies are supported: Watt I, Watt II, Stephenson I, Stephenson
//! II and Stephenson III. The synthesis searches the link lengths and fixed
//! angles so that the output angle follows a set of prescribed input/output
//! angle pairs, while the transmission angles stay in a band.
//!
//! ```
//! use six_bar::{mh, syn, SixBarTy};
//!
//! let target = syn::Target::preset6();
//! let func = syn::AngleSyn::new(SixBarTy::WattI, target);
//! let s = mh::Solver::build(mh::De::default(), func)
//!     .seed(0)
//!     .pop_num(10)
//!     .task(|ctx| ctx.gen == 2)
//!     .solve();
//! let sb = s.func().linkage(s.as_best_xs());
//! assert_eq!(sb.ty, SixBarTy::WattI);
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
pub use crate::mech::*;
#[doc(no_inline)]
pub use metaheuristics_nature as mh;

#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
pub mod mech;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
pub mod syn;
#[cfg(test)]
mod tests;
