use std::path::{Path, PathBuf};

use xshell::Shell;

use crate::project_root;

#[test]
fn pinned_version_matches_workspace() {
    let sh = Shell::new().unwrap();
    let manifest = sh.read_file(project_root().join("Cargo.toml")).unwrap();

    let value_of = |prefix: &str| {
        let line = manifest.lines().find(|it| it.starts_with(prefix)).unwrap();
        line.split('"').nth(1).unwrap().to_string()
    };
    let workspace = value_of("version = ");
    let pinned = manifest
        .lines()
        .find(|it| it.starts_with("compsynth = "))
        .and_then(|it| it.split("version = \"=").nth(1))
        .and_then(|it| it.split('"').next())
        .unwrap();
    assert_eq!(workspace, pinned, "bump the pinned `compsynth` dependency too");
}

#[test]
fn no_trailing_whitespace() {
    let sh = Shell::new().unwrap();
    let mut offenders = Vec::new();
    for file in rust_files(&sh, &project_root().join("crates")) {
        let text = sh.read_file(&file).unwrap();
        for (i, line) in text.lines().enumerate() {
            if line.ends_with(' ') || line.ends_with('\t') {
                offenders.push(format!("{}:{}", file.display(), i + 1));
            }
        }
    }
    assert!(offenders.is_empty(), "trailing whitespace:\n{}", offenders.join("\n"));
}

fn rust_files(sh: &Shell, dir: &Path) -> Vec<PathBuf> {
    let mut res = Vec::new();
    for entry in sh.read_dir(dir).unwrap() {
        if entry.is_dir() {
            res.extend(rust_files(sh, &entry));
        } else if entry.extension().map_or(false, |it| it == "rs") {
            res.push(entry);
        }
    }
    res
}
