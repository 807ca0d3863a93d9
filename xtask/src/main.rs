//! Development tasks for the workspace. Run with `cargo xtask <command>`.

use anyhow::{Context as _, Result, anyhow, bail};
use pico_args::Arguments;
use std::path::Path;
use xshell::{Shell, cmd};

#[derive(Debug, Clone, Copy)]
enum Cmd {
  Help,
  Ci,
  Layout,
  Tag,
}

struct CmdSpec {
  name: &'static str,
  desc: &'static str,
  args: &'static [(&'static str, &'static str)],
}

impl Cmd {
  const VALUES: [Cmd; 4] = [Cmd::Help, Cmd::Ci, Cmd::Layout, Cmd::Tag];

  fn spec(self) -> CmdSpec {
    match self {
      Cmd::Help => CmdSpec { name: "help", desc: "show this help", args: &[] },
      Cmd::Ci => CmdSpec { name: "ci", desc: "check the layout and run the checks", args: &[] },
      Cmd::Layout => CmdSpec {
        name: "layout",
        desc: "check every crate has a manifest and a test-free lib, except the tests crate",
        args: &[],
      },
      Cmd::Tag => CmdSpec {
        name: "tag",
        desc: "set the workspace version, then commit a new tag",
        args: &[("<tag>", "the name of the tag, like v1.2.3")],
      },
    }
  }
}

impl std::str::FromStr for Cmd {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Cmd::VALUES
      .iter()
      .find(|c| c.spec().name == s)
      .copied()
      .ok_or_else(|| anyhow!("couldn't parse {s} into a command"))
  }
}

fn show_help() {
  println!("usage:");
  println!("  cargo xtask <command> [<args>]");
  println!();
  println!("commands:");
  for c in Cmd::VALUES {
    let spec = c.spec();
    println!("  {}", spec.name);
    println!("    {}", spec.desc);
    if !spec.args.is_empty() {
      println!();
      println!("    args:");
      for (name, desc) in spec.args {
        println!("      {name}");
        println!("        {desc}");
      }
    }
  }
}

fn finish_args(args: Arguments) -> Result<()> {
  let args = args.finish();
  if !args.is_empty() {
    bail!("unused arguments: {args:?}")
  }
  Ok(())
}

/// every dir in `crates` is a member of the workspace by glob, so it must have a manifest. only
/// the tests crate has tests.
fn check_layout(sh: &Shell) -> Result<()> {
  for dir in sh.read_dir("crates")? {
    let name = dir.file_name().and_then(|x| x.to_str()).context("bad crate dir")?.to_owned();
    let manifest = dir.join("Cargo.toml");
    if !sh.path_exists(&manifest) {
      bail!("{name}: no Cargo.toml");
    }
    let contents = sh.read_file(&manifest)?;
    if !contents.contains(&format!("name = \"{name}\"")) {
      bail!("{name}: package name does not match the dir");
    }
    if name != "tests" && !contents.contains("test = false") {
      bail!("{name}: has tests enabled, but tests go in the tests crate");
    }
  }
  Ok(())
}

fn run_ci(sh: &Shell) -> Result<()> {
  check_layout(sh)?;
  cmd!(sh, "cargo build --locked").run()?;
  cmd!(sh, "cargo fmt -- --check").run()?;
  cmd!(sh, "cargo clippy").run()?;
  cmd!(sh, "cargo test --locked").run()?;
  Ok(())
}

/// replaces the first `version = "..."` line of the root manifest, which is the workspace version.
fn set_version(sh: &Shell, version: &str) -> Result<()> {
  let contents = sh.read_file("Cargo.toml")?;
  let mut out = String::with_capacity(contents.len());
  let mut done = false;
  for line in contents.lines() {
    if !done && line.starts_with("version = ") {
      out.push_str("version = \"");
      out.push_str(version);
      out.push('"');
      done = true;
    } else {
      out.push_str(line);
    }
    out.push('\n');
  }
  if !done {
    bail!("no version in Cargo.toml");
  }
  sh.write_file("Cargo.toml", out)?;
  Ok(())
}

fn tag(sh: &Shell, tag: &str) -> Result<()> {
  let Some(version) = tag.strip_prefix('v') else { bail!("tag must start with v") };
  let parts: Vec<_> = version.split('.').collect();
  let num_parts = parts.len();
  if num_parts != 3 {
    bail!("version must have 3 dot-separated parts (got {num_parts})")
  }
  for part in parts {
    if let Err(e) = part.parse::<u16>() {
      bail!("{part}: not a non-negative 16-bit integer: {e}")
    }
  }
  set_version(sh, version)?;
  run_ci(sh)?;
  cmd!(sh, "git add Cargo.toml Cargo.lock").run()?;
  let msg = format!("Release {tag}");
  cmd!(sh, "git commit -m {msg} --no-verify").run()?;
  cmd!(sh, "git tag {tag}").run()?;
  Ok(())
}

fn main() -> Result<()> {
  let mut args = Arguments::from_env();
  let sh = Shell::new()?;
  if args.contains(["-h", "--help"]) {
    show_help();
    return Ok(());
  }
  let cmd: Cmd = match args.subcommand()? {
    Some(x) => x.parse()?,
    None => {
      show_help();
      return Ok(());
    }
  };
  let root = Path::new(env!("CARGO_MANIFEST_DIR")).parent().context("no workspace root")?;
  let _d = sh.push_dir(root);
  match cmd {
    Cmd::Help => show_help(),
    Cmd::Ci => {
      finish_args(args)?;
      run_ci(&sh)?;
    }
    Cmd::Layout => {
      finish_args(args)?;
      check_layout(&sh)?;
    }
    Cmd::Tag => {
      let name: String = args.free_from_str()?;
      finish_args(args)?;
      tag(&sh, &name)?;
    }
  }
  Ok(())
}
