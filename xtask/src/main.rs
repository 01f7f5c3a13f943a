#[cfg(test)]
mod tidy;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use xshell::{cmd, Shell};

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;
    sh.change_dir(project_root());

    // Runtime checks in `tests/it` skip themselves without bash, CI must not.
    cmd!(sh, "bash --version").run()?;

    {
        let _s = Section::new("BUILD");
        cmd!(sh, "cargo test --workspace --no-run").run()?;
    }

    {
        let _s = Section::new("TEST");
        let _e = sh.push_env("COMPSYNTH_REQUIRE_BASH", "1");
        cmd!(sh, "cargo test --workspace -- --nocapture").run()?;
    }

    {
        let _s = Section::new("SCRIPTS");
        let out_dir = sh.create_dir("target/completions")?;
        for description in sh.read_dir("crates/compsynth/tests/data")? {
            if description.extension().map_or(true, |it| it != "cmd") {
                continue;
            }
            let Some(name) = description.file_stem() else { continue };
            let script = out_dir.join(name).with_extension("bash");
            cmd!(sh, "cargo run -q -p compsynth-cli -- {description} -o {script}").run()?;
            cmd!(sh, "bash -O extglob -n {script}").run()?;
        }
    }

    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(1).unwrap().to_path_buf()
}

/// A collapsible group in the CI log, timed on drop.
struct Section {
    name: &'static str,
    start: Instant,
}

impl Section {
    fn new(name: &'static str) -> Section {
        println!("::group::{name}");
        Section { name, start: Instant::now() }
    }
}

impl Drop for Section {
    fn drop(&mut self) {
        eprintln!("{}: {:.2?}", self.name, self.start.elapsed());
        println!("::endgroup::");
    }
}
