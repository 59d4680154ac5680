use crate::{syn::*, *};
use approx::assert_abs_diff_eq;

fn assemble(ty: SixBarTy) -> (SixBar, f64, Pose) {
    let (sb, t) = SixBar::example(ty);
    let pose = sb.pos(t).unwrap_or_else(|| panic!("{ty} example cannot be assembled"));
    (sb, t, pose)
}

fn dist([x1, y1]: [f64; 2], [x2, y2]: [f64; 2]) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

#[test]
fn watt1_joints() {
    let joints = [
        [10., 5.],
        [70., 5.],
        [25., 25.],
        [55., 35.],
        [40., 60.],
        [70., 80.],
        [90., 45.],
    ];
    let (sb, t) = SixBar::from_joints(SixBarTy::WattI, joints);
    assert_abs_diff_eq!(sb.l1, 60.);
    assert_abs_diff_eq!(sb.phi, 0.);
    let pose = sb.pos(t).unwrap();
    for ([x, y], [ex, ey]) in std::iter::zip(pose.joints, joints) {
        assert_abs_diff_eq!(x, ex - 10., epsilon = 1e-9);
        assert_abs_diff_eq!(y, ey - 5., epsilon = 1e-9);
    }
    assert_abs_diff_eq!(sb.l7().unwrap(), dist(joints[3], joints[4]), epsilon = 1e-9);
}

#[test]
fn loop_closure() {
    for ty in SixBarTy::LIST {
        let (sb, t, pose) = assemble(ty);
        assert_eq!(pose.joints[0], [0., 0.]);
        assert_abs_diff_eq!(pose.joints[1][0], sb.l1 * sb.phi.cos(), epsilon = 1e-9);
        assert_abs_diff_eq!(pose.joints[1][1], sb.l1 * sb.phi.sin(), epsilon = 1e-9);
        // Measure the linkage again from the solved joints
        let (measured, t2) = SixBar::from_joints(ty, pose.joints);
        assert_eq!(measured.ty, ty);
        assert_abs_diff_eq!(t2, t, epsilon = 1e-9);
        for (a, b) in std::iter::zip(measured.to_vectorized(), sb.to_vectorized()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
        let [input, _] = ty.input_link();
        assert_eq!(input, 0);
        for mu in pose.mu {
            assert!((0.0..=std::f64::consts::PI).contains(&mu), "{ty}: {mu}");
        }
    }
}

#[test]
fn edge_lengths() {
    for ty in SixBarTy::LIST {
        let (sb, _, pose) = assemble(ty);
        let edges = sb.edges();
        let len = |k: usize| dist(pose.joints[edges[k][0]], pose.joints[edges[k][1]]);
        let params = [sb.l1, sb.l2, sb.l3, sb.l4, sb.l5, sb.l6];
        for (k, l) in params.into_iter().enumerate() {
            assert_abs_diff_eq!(len(k), l, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(len(7), sb.l8, epsilon = 1e-9);
        assert_abs_diff_eq!(len(8), sb.l9, epsilon = 1e-9);
        if let Some(l7) = sb.l7() {
            assert_abs_diff_eq!(len(6), l7, epsilon = 1e-9);
        }
    }
}

#[test]
fn mu_vertices() {
    for ty in SixBarTy::LIST {
        let (_, _, pose) = assemble(ty);
        for (tri, mu) in std::iter::zip(ty.mu_joints(), pose.mu) {
            let [v, p, q] = tri.map(|i| pose.joints[i]);
            let [a, b] = [p, q].map(|c| [c[0] - v[0], c[1] - v[1]]);
            let cos = (a[0] * b[0] + a[1] * b[1]) / (dist(v, p) * dist(v, q));
            assert_abs_diff_eq!(cos.acos(), mu, epsilon = 1e-9);
        }
    }
}

#[test]
fn output_angle() {
    for ty in SixBarTy::LIST {
        let (_, _, pose) = assemble(ty);
        let [b, out] = ty.output_link();
        let [x1, y1] = pose.joints[b];
        let [x2, y2] = pose.joints[out];
        let theta = (y2 - y1).atan2(x2 - x1);
        let diff = (theta - pose.theta_o).rem_euclid(std::f64::consts::TAU);
        assert!(diff < 1e-9 || diff > std::f64::consts::TAU - 1e-9, "{ty}");
    }
}

#[test]
fn impossible_geometry() {
    let (sb, t) = SixBar::example(SixBarTy::WattI);
    let sb = SixBar { l3: 1., l4: 1., ..sb };
    assert!(sb.pos(t).is_none());
    let (sb, t) = SixBar::example(SixBarTy::StephensonII);
    let sb = SixBar { l9: 1000., ..sb };
    assert!(sb.pos(t).is_none());
    let (sb, t) = SixBar::example(SixBarTy::StephensonIII);
    let sb = SixBar { l8: 1., l9: 1., ..sb };
    assert!(sb.pos(t).is_none());
}

#[test]
fn sweep() {
    for ty in SixBarTy::LIST {
        let (sb, t) = SixBar::example(ty);
        let sweep = sb.sweep(t - 0.1, t + 0.1, 21);
        assert_eq!(sweep.len(), 21);
        assert_abs_diff_eq!(sweep[0].0, t - 0.1);
        assert_abs_diff_eq!(sweep[20].0, t + 0.1, epsilon = 1e-12);
        assert!(sweep.iter().all(|(_, pose)| pose.is_some()), "{ty}");
        let outputs = sb.output_angles(&[t]);
        assert_abs_diff_eq!(outputs[0].unwrap(), sweep[10].1.unwrap().theta_o, epsilon = 1e-6);
    }
}

#[test]
fn warm_start() {
    use std::f64::consts::{PI, TAU};
    let wrapped = |a: f64, b: f64| ((a - b + PI).rem_euclid(TAU) - PI).abs();
    let (sb, t) = SixBar::example(SixBarTy::StephensonII);
    let sweep = sb.sweep(t - 0.8, t + 0.8, 101);
    let poses = sweep
        .iter()
        .map(|(_, pose)| pose.expect("the sweep stays assembled"))
        .collect::<Vec<_>>();
    // The numerical angle `CE` moves continuously along one branch
    for w in poses.windows(2) {
        let gamma = [w[0], w[1]].map(|p| {
            let [[x1, y1], [x2, y2]] = p.link([2, 4]);
            (y2 - y1).atan2(x2 - x1)
        });
        assert!(wrapped(gamma[0], gamma[1]) < 0.05);
        assert!(wrapped(w[0].theta_o, w[1].theta_o) < 0.05);
    }
    let pose = sb.pos(t).unwrap();
    assert_abs_diff_eq!(poses[50].theta_o, pose.theta_o, epsilon = 1e-6);
}

#[test]
fn vectorized() {
    for ty in SixBarTy::LIST {
        let (sb, _) = SixBar::example(ty);
        let v = sb.to_vectorized();
        assert_eq!(SixBar::from_vectorized(ty, v), sb);
        assert_eq!(SixBar::from_slice(ty, &v), Some(sb));
        assert_eq!(SixBar::from_slice(ty, &v[1..]), None);
        assert_eq!(ty.bound().len(), DIM);
    }
    assert_eq!(SixBarTy::StephensonIII.bound()[0], [30., 100.]);
    let ub = SixBarTy::StephensonI.bound()[8][1];
    assert_abs_diff_eq!(ub, 359f64.to_radians(), epsilon = 1e-12);
    assert_abs_diff_eq!(SixBarTy::WattI.bound()[10][1], std::f64::consts::TAU);
}

#[test]
fn type_names() {
    assert_eq!("s2".parse::<SixBarTy>().unwrap(), SixBarTy::StephensonII);
    assert_eq!("W1".parse::<SixBarTy>().unwrap(), SixBarTy::WattI);
    assert!("w3".parse::<SixBarTy>().is_err());
    assert_eq!(SixBarTy::StephensonIII.to_string(), "Stephenson III");
    for ty in SixBarTy::LIST {
        let edges = ty.edges();
        for tri in ty.ternary() {
            // Every side of a ternary link is a link
            for (i, j) in [(0, 1), (1, 2), (0, 2)] {
                let side = [tri[i], tri[j]];
                let found = edges
                    .iter()
                    .any(|e| *e == side || *e == [side[1], side[0]]);
                assert!(found, "{ty}: {side:?}");
            }
        }
    }
}

#[test]
fn mu_band() {
    let band = MuBand::default();
    let [min, max] = band.to_degrees();
    assert_abs_diff_eq!(min, 40., epsilon = 1e-12);
    assert_abs_diff_eq!(max, 140., epsilon = 1e-12);
    assert!(band.contains(band.min));
    assert!(band.contains(band.max));
    assert!(!band.contains(0.1));
}

#[test]
fn target() {
    assert_eq!(Target::preset6().len(), 6);
    assert_eq!(Target::preset20().len(), 20);
    assert_eq!(Target::from_degrees(&[]), Err(TargetError::Empty));
    assert_eq!(Target::new(vec![1.], Vec::new()), Err(TargetError::Length(1, 0)));
    assert_eq!(Target::new(vec![f64::NAN], vec![1.]), Err(TargetError::NonFinite));
    let target = Target::preset6();
    assert_abs_diff_eq!(target.theta_i()[0], 50f64.to_radians());
    assert_abs_diff_eq!(target.to_degrees()[5][1], 93.8, epsilon = 1e-12);
}

fn self_target(ty: SixBarTy) -> (SixBar, Target) {
    let (sb, t) = SixBar::example(ty);
    let ts = vec![t - 0.05, t, t + 0.05];
    let outputs = sb.output_angles(&ts);
    let outputs = outputs.into_iter().map(Option::unwrap).collect();
    (sb, Target::new(ts, outputs).unwrap())
}

#[test]
fn fitness() {
    use mh::ObjFunc as _;
    for ty in SixBarTy::LIST {
        let (sb, target) = self_target(ty);
        let func = AngleSyn::new(ty, target.clone()).band(MuBand::new(90.));
        assert_abs_diff_eq!(func.fitness(&sb.to_vectorized()), 0., epsilon = 1e-12);
        let verify = func.verify(&sb);
        assert!(verify.is_ok(), "{ty}");
        assert_eq!(verify.passed(), 3);
        assert_abs_diff_eq!(verify.max_error().unwrap(), 0., epsilon = 1e-6);
        // No transmission angle is exactly 90 degrees
        let func = AngleSyn::new(ty, target).band(MuBand::new(0.));
        assert!(func.fitness(&sb.to_vectorized()) >= (INFEASIBLE - 10.).powi(2));
        assert!(!func.verify(&sb).is_ok());
    }
}

#[test]
fn infeasible_fitness() {
    use mh::ObjFunc as _;
    let (sb, target) = self_target(SixBarTy::WattI);
    let func = AngleSyn::new(SixBarTy::WattI, target).band(MuBand::new(90.));
    // The coupler dyad is too short to reach the output link
    let sb = SixBar { l3: 1., l4: 1., ..sb };
    assert!(func.achieved(&sb).iter().all(Option::is_none));
    assert!(func.fitness(&sb.to_vectorized()) >= 3. * (INFEASIBLE - 10.).powi(2));
    let verify = func.verify(&sb);
    assert_eq!(verify.passed(), 0);
    assert_eq!(verify.max_error(), None);
    assert!(verify.rows.iter().all(|r| r.theta_o.is_none() && !r.mu_ok));
}

#[cfg(feature = "plot")]
#[test]
fn plot_labels() {
    use crate::plot::*;
    for ty in SixBarTy::LIST {
        let (sb, t) = SixBar::example(ty);
        let mut buf = String::new();
        let svg = SVGBackend::with_string(&mut buf, (800, 800));
        Figure::new(&sb).angle(t).link_label(true).plot(svg).unwrap();
        for label in ["L₁", "L₁₀", "θi", "θo", "μ1", "μ2"] {
            assert!(buf.contains(label), "{ty}: {label}");
        }
    }
    let (sb, t) = SixBar::example(SixBarTy::WattI);
    let sb = SixBar { l3: 1., l4: 1., ..sb };
    let mut buf = String::new();
    let svg = SVGBackend::with_string(&mut buf, (800, 800));
    assert!(Figure::new(&sb).angle(t).plot(svg).is_err());
}

#[cfg(feature = "plot")]
#[test]
fn history_generations() {
    use crate::plot::*;
    let mut buf = String::new();
    let svg = SVGBackend::with_string(&mut buf, (800, 600));
    let fitness = (0..10u64).map(|i| (i * 50, 10. - i as f64)).collect::<Vec<_>>();
    history(svg, &fitness).unwrap();
    // The axis reaches the last generation, not the number of records
    assert!(buf.contains("\n400\n</text>"));
}

#[test]
fn custom_bound() {
    let func = AngleSyn::new(SixBarTy::WattII, Target::preset6());
    assert!(func.clone().with_bound(&[[0., 1.]; 3]).is_none());
    assert!(func.clone().with_bound(&[[1., 0.]; DIM]).is_none());
    let func = func.with_ranges([10., 50.], [0., 180.]).unwrap();
    assert_eq!(mh::Bounded::bound(&func)[0], [10., 50.]);
    assert_abs_diff_eq!(mh::Bounded::bound(&func)[9][1], std::f64::consts::PI);
}

#[test]
fn synthesis() {
    let (_, target) = self_target(SixBarTy::WattI);
    let func = AngleSyn::new(SixBarTy::WattI, target).band(MuBand::new(90.));
    let mut history = Vec::new();
    let s = mh::Solver::build(mh::De::default(), func)
        .seed(0)
        .pop_num(20)
        .task(|ctx| ctx.gen == 30)
        .callback(|ctx| history.push(ctx.best.get_eval()))
        .solve();
    let best = s.get_best_eval();
    assert!(best.is_finite());
    assert!(best <= history[0]);
    let sb = s.func().linkage(s.as_best_xs());
    assert_eq!(sb.ty, SixBarTy::WattI);
}
