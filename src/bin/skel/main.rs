//! skel-cli - Inspect and transform SKEL files.

use pointskel::prelude::*;
use std::env;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("skel-cli");

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-q" | "--quiet" => level = "warn",
            _ => filtered_args.push(arg),
        }
    }
    init_tracing(level);

    let result = match filtered_args.as_slice() {
        ["info" | "i", file] => cmd_info(file),
        ["normalize" | "n", input, output] => cmd_normalize(input, output),
        ["downsample" | "d", input, output, count, rest @ ..] => {
            cmd_downsample(input, output, count, rest)
        }
        ["xyzn", input, output] => cmd_xyzn(input, output),
        ["help" | "h" | "-h" | "--help"] | [] => {
            print_usage(prog);
            return ExitCode::SUCCESS;
        }
        _ => {
            eprintln!("Unknown command: {}", filtered_args.join(" "));
            print_usage(prog);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage(prog: &str) {
    println!("skel-cli - Inspect and transform SKEL files");
    println!();
    println!("Usage: {} [options] <command> ...", prog);
    println!();
    println!("Commands:");
    println!("  i, info <file.skel>                       Show collection and skeleton summary");
    println!("  n, normalize <in.skel> <out.skel>         Fit both point sets into the unit cube");
    println!("  d, downsample <in.skel> <out.skel> <n> [--random] [--seed S]");
    println!("                                            Resample n original points");
    println!("  xyzn <in.xyzn> <out.skel>                 Convert an XYZN point file");
    println!("  h, help                                   Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose  Debug output");
    println!("  -q, --quiet    Warnings only");
}

fn load(path: &str) -> Result<DataMgr> {
    let mut mgr = DataMgr::new(SkeletonParams::default());
    mgr.load_skeleton_from_skel(path)?;
    Ok(mgr)
}

fn cmd_info(path: &str) -> Result<()> {
    let mgr = load(path)?;
    let skel = mgr.skeleton();

    println!("File: {}", path);
    println!("Original: {} points, bbox {:?}", mgr.original().len(), mgr.original().bbox);
    println!("Samples:  {} points, bbox {:?}", mgr.samples().len(), mgr.samples().bbox);
    println!("Skeleton: {} branches, {} curve points", skel.num_branches(), skel.size());
    for (i, branch) in skel.branches.iter().enumerate() {
        debug!("branch {}: {} points, length {:.4}", i, branch.len(), branch.length());
    }

    let fixed = mgr.samples().vertices.iter().filter(|v| v.is_fixed_sample).count();
    let virt = mgr.samples().vertices.iter().filter(|v| v.is_skel_virtual).count();
    let branch = mgr.samples().vertices.iter().filter(|v| v.is_skel_branch).count();
    println!("Sample flags: {} fixed, {} virtual, {} branch", fixed, virt, branch);
    Ok(())
}

fn cmd_normalize(input: &str, output: &str) -> Result<()> {
    let mut mgr = load(input)?;
    let bbox = mgr.normalize_all();
    info!("normalized, sample bbox {:?}, radius {:.6}", bbox, mgr.params().initial_radius);
    mgr.save_skeleton_as_skel(output)
}

fn cmd_downsample(input: &str, output: &str, count: &str, rest: &[&str]) -> Result<()> {
    let mut mgr = load(input)?;
    mgr.params_mut().down_sample_num = count
        .parse()
        .map_err(|_| Error::other(format!("invalid sample count: {count}")))?;

    let mut use_random = false;
    let mut it = rest.iter();
    while let Some(arg) = it.next() {
        match *arg {
            "--random" => use_random = true,
            "--seed" => {
                let seed = it.next().ok_or_else(|| Error::other("--seed needs a value"))?;
                let seed = seed.parse().map_err(|_| Error::other(format!("invalid seed: {seed}")))?;
                mgr.params_mut().random_seed = Some(seed);
            }
            other => return Err(Error::other(format!("unknown option: {other}"))),
        }
    }

    mgr.downsample(use_random);
    info!("{} samples, radius {:.6}", mgr.samples().len(), mgr.params().initial_radius);
    mgr.save_skeleton_as_skel(output)
}

fn cmd_xyzn(input: &str, output: &str) -> Result<()> {
    if !Path::new(input).exists() {
        return Err(Error::FileNotFound(input.into()));
    }
    let mut mgr = DataMgr::new(SkeletonParams::default());
    mgr.load_xyzn(input)?;
    mgr.save_skeleton_as_skel(output)
}
