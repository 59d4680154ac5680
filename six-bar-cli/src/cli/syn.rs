use super::logger::Logger;
use crate::syn_method::{build_solver, SynMethod};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use six_bar::{mh, plot, syn, SixBar, SixBarTy};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    time::Instant,
};

type AnyResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(clap::Args)]
pub(super) struct Syn {
    /// Target files, the CSV rows of input and output angles in degrees,
    /// or a RON linkage to reproduce
    ///
    /// The linkage type can be given by the extension of the file stem,
    /// e.g. `crank.w1.csv`.
    files: Vec<PathBuf>,
    /// Linkage type, override the type of the files
    #[clap(long, value_enum)]
    ty: Option<SixBarTy>,
    /// Input-output angle pair in degrees, used when no file is given,
    /// or the input angles of the RON linkages
    #[clap(long = "pair", value_name = "I,O", value_parser = parse_pair, allow_hyphen_values = true)]
    pairs: Vec<[f64; 2]>,
    /// Use the twenty-pair preset instead of the six-pair preset
    #[clap(long, conflicts_with = "pairs")]
    preset20: bool,
    /// Output directory when no file is given
    #[clap(short, long, default_value = ".")]
    out: PathBuf,
    /// Disable parallel for running all tasks
    #[clap(long)]
    no_parallel: bool,
    #[clap(flatten)]
    cfg: SynCfg,
    #[clap(subcommand)]
    method: Option<SynMethod>,
}

#[derive(Clone, clap::Args, serde::Serialize)]
struct SynCfg {
    /// Number of generations
    #[clap(short, long, default_value_t = syn::GEN)]
    gen: u64,
    /// Number of population
    #[clap(short, long, default_value_t = syn::POP_NUM)]
    pop: usize,
    /// Fix the seed to get a determined result, default to random
    #[clap(short, long)]
    seed: Option<u64>,
    /// Half width of the transmission angle band around 90 degrees
    #[clap(long, default_value_t = syn::DMU_DEG)]
    dmu: f64,
    /// Stop when the best fitness is lower than the tolerance
    #[clap(long, default_value_t = syn::ATOL)]
    tol: f64,
    /// Tolerance of the output angles in degrees for the result check
    #[clap(long, default_value_t = syn::TOL_DEG)]
    atol_deg: f64,
    /// Record the best fitness every N generations, zero to disable
    #[clap(long, default_value_t = 1)]
    log: u64,
    /// Number of samples of the angle relation outputs
    #[clap(long, default_value_t = 3600)]
    res: usize,
}

fn parse_pair(s: &str) -> Result<[f64; 2], String> {
    let (i, o) = s
        .split_once(',')
        .ok_or_else(|| format!("expect `I,O`, got `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v}: {e}"));
    Ok([parse(i)?, parse(o)?])
}

enum SynErr {
    // Unsupported format
    Format,
    // Linkage type is not given
    Type,
    // Reading file error
    Io(std::io::Error),
    // Serialization error
    RonSer(ron::error::SpannedError),
    // Invalid target
    Target(Box<dyn std::error::Error>),
    // Invalid linkage
    Linkage,
}

impl std::fmt::Display for SynErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Format => write!(f, "unsupported format"),
            Self::Type => write!(f, "unknown linkage type, use `--ty` or `<name>.w1.csv`"),
            Self::Io(e) => write!(f, "reading file error: {e}"),
            Self::RonSer(e) => write!(f, "ron serialization error: {e}"),
            Self::Target(e) => write!(f, "invalid target: {e}"),
            Self::Linkage => write!(f, "invalid linkage"),
        }
    }
}

struct Info {
    title: String,
    ty: SixBarTy,
    target: syn::Target,
    root: PathBuf,
}

enum Task {
    File(PathBuf),
    Target(Info),
}

#[derive(serde::Serialize)]
struct TargetLog<'a> {
    ty: &'a str,
    pairs: Vec<[f64; 2]>,
}

#[derive(serde::Serialize)]
struct Performance {
    time: f64,
    cost: f64,
    passed: usize,
    pairs: usize,
    max_error: Option<f64>,
    ok: bool,
}

pub(super) fn syn(syn: Syn) {
    let Syn { files, ty, pairs, preset20, out, no_parallel, cfg, method } = syn;
    let method = method.unwrap_or_default();
    {
        let SynCfg { gen, pop, seed, dmu, tol, atol_deg, log, res } = &cfg;
        println!("method={} ({})", method.abbr(), method.name());
        println!(
            "gen={gen}, pop={pop}, seed={seed:?}, dmu={dmu}, tol={tol}, \
             atol_deg={atol_deg}, log={log}, res={res}"
        );
    }
    let inputs = if pairs.is_empty() {
        preset(preset20).theta_i().to_vec()
    } else {
        pairs.iter().map(|[i, _]| i.to_radians()).collect()
    };
    let tasks = if files.is_empty() {
        let (name, target) = if pairs.is_empty() {
            (if preset20 { "preset20" } else { "preset6" }, preset(preset20))
        } else {
            let target = syn::Target::from_degrees(&pairs)
                .unwrap_or_else(|e| panic!("invalid pairs: {e}"));
            ("pairs", target)
        };
        let ty = ty.unwrap_or_default();
        let title = format!("{name}.{}", ty.abbr().to_lowercase());
        vec![Task::Target(Info { title, ty, target, root: out })]
    } else {
        files.into_iter().map(Task::File).collect()
    };
    let mpb = MultiProgress::new();
    let run = |task| run(&mpb, task, ty, &inputs, &cfg, &method);
    if no_parallel {
        tasks.into_iter().for_each(run);
    } else {
        use mh::rayon::prelude::*;
        tasks.into_par_iter().for_each(run);
    }
}

fn preset(preset20: bool) -> syn::Target {
    if preset20 {
        syn::Target::preset20()
    } else {
        syn::Target::preset6()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn run(
    mpb: &MultiProgress,
    task: Task,
    ty: Option<SixBarTy>,
    inputs: &[f64],
    cfg: &SynCfg,
    method: &SynMethod,
) {
    let pb = mpb.add(ProgressBar::new(cfg.gen));
    let info = match task {
        Task::Target(info) => info,
        Task::File(file) => {
            let info = file
                .canonicalize()
                .map_err(SynErr::Io)
                .and_then(|path| info(&path, ty, inputs));
            match info {
                Ok(info) => info,
                Err(SynErr::Format) => {
                    pb.finish_and_clear();
                    return;
                }
                Err(e) => {
                    pb.set_style(style("[{prefix}] {msg}"));
                    pb.set_prefix(file.display().to_string());
                    pb.finish_with_message(e.to_string());
                    return;
                }
            }
        }
    };
    pb.set_style(style("[{prefix}] {elapsed_precise} {wide_bar} {pos}/{len} {msg}"));
    pb.set_prefix(info.title.clone());
    if let Err(e) = solve(&pb, info, cfg, method) {
        pb.finish_with_message(format!("| error: {e}"));
    }
}

fn info(path: &Path, ty: Option<SixBarTy>, inputs: &[f64]) -> Result<Info, SynErr> {
    let read = || std::fs::read_to_string(path).map_err(SynErr::Io);
    let (target, linkage_ty) = match path.extension().and_then(OsStr::to_str) {
        Some("csv" | "txt") => {
            let target = six_bar::csv::parse_target(&read()?).map_err(SynErr::Target)?;
            (target, None)
        }
        Some("ron") => {
            let sb = ron::from_str::<SixBar>(&read()?).map_err(SynErr::RonSer)?;
            let theta_o = sb
                .output_angles(inputs)
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .ok_or(SynErr::Linkage)?;
            let target = syn::Target::new(inputs.to_vec(), theta_o)
                .map_err(|e| SynErr::Target(e.into()))?;
            (target, Some(sb.ty))
        }
        _ => return Err(SynErr::Format),
    };
    let title = path.file_stem().and_then(OsStr::to_str).ok_or(SynErr::Format)?;
    let stem_ty = Path::new(title)
        .extension()
        .and_then(OsStr::to_str)
        .and_then(|ty| ty.parse().ok());
    let ty = ty.or(stem_ty).or(linkage_ty).ok_or(SynErr::Type)?;
    let root = path.parent().ok_or(SynErr::Format)?.to_path_buf();
    Ok(Info { title: title.to_string(), ty, target, root })
}

fn solve(pb: &ProgressBar, info: Info, cfg: &SynCfg, method: &SynMethod) -> AnyResult {
    let Info { title, ty, target, root } = info;
    let func = syn::AngleSyn::new(ty, target.clone())
        .band(syn::MuBand::new(cfg.dmu))
        .tol_deg(cfg.atol_deg);
    let root = root.join(&title);
    if root.is_dir() {
        std::fs::remove_dir_all(&root)?;
    }
    std::fs::create_dir_all(&root)?;
    let use_log = cfg.log > 0;
    let mut history = Vec::with_capacity(if use_log { cfg.gen as usize } else { 0 });
    let t0 = Instant::now();
    let (cost, sb, verify) = build_solver!(method.clone(), func, |s| {
        let s = s.pop_num(cfg.pop);
        let s = match cfg.seed {
            Some(seed) => s.seed(seed),
            None => s,
        };
        let s = s
            .task(|ctx| ctx.gen >= cfg.gen || ctx.best.get_eval() < cfg.tol)
            .callback(|ctx| {
                if use_log && ctx.gen % cfg.log == 0 {
                    history.push((ctx.gen, ctx.best.get_eval()));
                }
                pb.set_position(ctx.gen);
            })
            .solve();
        let sb = s.func().linkage(s.as_best_xs());
        (s.get_best_eval(), sb, s.func().verify(&sb))
    });
    let spent_time = t0.elapsed();
    let sweep = sb.sweep(0., 359f64.to_radians(), cfg.res);
    {
        let pretty = ron::ser::PrettyConfig::default();
        let path = root.join("linkage.ron");
        std::fs::write(path, ron::ser::to_string_pretty(&sb, pretty)?)?;
        std::fs::write(root.join("report.csv"), six_bar::csv::dump_report(&verify)?)?;
        std::fs::write(root.join("sweep.csv"), six_bar::csv::dump_sweep(&sweep)?)?;
    }
    {
        let path = root.join("angles.svg");
        let svg = plot::SVGBackend::new(&path, (1200, 800));
        plot::angles(svg, &sweep, Some(&verify))?;
    }
    // `linkage.svg` is the first target that can be assembled
    let mut first = true;
    for (i, &angle) in target.theta_i().iter().enumerate() {
        if sb.pos(angle).is_none() {
            continue;
        }
        let fig = plot::Figure::new(&sb).angle(angle).link_label(true);
        if std::mem::take(&mut first) {
            let path = root.join("linkage.svg");
            fig.plot(plot::SVGBackend::new(&path, (1600, 1600)))?;
        }
        let path = root.join(format!("linkage_{i}.svg"));
        fig.plot(plot::SVGBackend::new(&path, (1600, 1600)))?;
    }
    if !history.is_empty() {
        let path = root.join("history.svg");
        let svg = plot::SVGBackend::new(&path, (800, 600));
        plot::history(svg, &history)?;
    }
    let perf = Performance {
        time: spent_time.as_secs_f64(),
        cost,
        passed: verify.passed(),
        pairs: verify.rows.len(),
        max_error: verify.max_error().map(f64::to_degrees),
        ok: verify.is_ok(),
    };
    {
        let file = std::fs::File::create(root.join(format!("{title}.log")))?;
        let mut log = Logger::new(std::io::BufWriter::new(file));
        log.section("config")?;
        log.log(cfg)?;
        log.section("method")?;
        log.log(method)?;
        log.section("target")?;
        log.log(TargetLog { ty: ty.abbr(), pairs: target.to_degrees() })?;
        log.section("performance")?;
        log.log(&perf)?;
        log.section("linkage")?;
        log.log(sb)?;
        for (i, row) in verify.rows.iter().enumerate() {
            log.section(&format!("verify.{i}"))?;
            log.log(six_bar::csv::ReportRow::from(row))?;
        }
        log.flush()?;
    }
    let Performance { passed, pairs, .. } = perf;
    pb.finish_with_message(format!(
        "| spent: {spent_time:?} | cost: {cost:.4e} | passed: {passed}/{pairs}"
    ));
    Ok(())
}
