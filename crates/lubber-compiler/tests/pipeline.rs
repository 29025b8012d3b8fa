use std::cell::RefCell;
use std::path::{Path, PathBuf};

use lubber_compiler::backend::BytecodeCompiler;
use lubber_compiler::pipeline::{run, BuildPlan};
use lubber_compiler::unit::CompileStatus;
use lubber_core::layout::ProjectLayout;
use lubber_core::manifest::Manifest;
use tempfile::TempDir;

/// Writes `BC[<source>]` for each module; fails on sources containing
/// `syntax error`. Bundles by concatenating inputs.
#[derive(Default)]
struct FakeCompiler {
    compiled: RefCell<Vec<String>>,
    bundled: RefCell<Vec<Vec<PathBuf>>>,
    strip_flags: RefCell<Vec<bool>>,
    fail_bundle: bool,
}

impl BytecodeCompiler for FakeCompiler {
    fn compile(&self, input: &Path, output: &Path, cwd: &Path, strip: bool) -> miette::Result<CompileStatus> {
        let source = String::from_utf8_lossy(&std::fs::read(cwd.join(input)).unwrap()).into_owned();
        self.compiled
            .borrow_mut()
            .push(input.to_string_lossy().replace('\\', "/"));
        self.strip_flags.borrow_mut().push(strip);
        if source.contains("syntax error") {
            return Ok(CompileStatus::failed("luac: syntax error near 'end'"));
        }
        std::fs::write(output, format!("BC[{source}]")).unwrap();
        Ok(CompileStatus::ok())
    }

    fn bundle(&self, inputs: &[PathBuf], output: &Path, _cwd: &Path, _strip: bool) -> miette::Result<CompileStatus> {
        self.bundled.borrow_mut().push(inputs.to_vec());
        if self.fail_bundle {
            return Ok(CompileStatus::failed("luac: cannot combine"));
        }
        let mut combined = String::new();
        for input in inputs {
            combined.push_str(&std::fs::read_to_string(input).unwrap());
        }
        std::fs::write(output, combined).unwrap();
        Ok(CompileStatus::ok())
    }
}

struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    fn plan(&self, release: bool, single_file: bool, shorten_names: bool) -> BuildPlan {
        BuildPlan {
            source_dir: self.root().join("src"),
            assets_dir: self.root().join("assets"),
            output_dir: self.root().join("dist"),
            obj_dir: self.root().join(".lubber").join("obj"),
            release,
            single_file,
            shorten_names,
        }
    }

    fn output_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.root().join("dist"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[test]
fn single_file_build_writes_header_and_bundle() {
    let project = Project::new();
    project
        .file("src/main.lua", "-- name: Test Mod\n-- description: a test\nlocal x = require_util()\n")
        .file("src/util.lua", "-- helper comment\nfunction require_util() return 1 end\n");
    let compiler = FakeCompiler::default();

    let report = run(&project.plan(false, true, false), &compiler).unwrap();

    assert_eq!(project.output_entries(), vec!["main.lua", "main64.luac"]);
    let header = std::fs::read_to_string(project.root().join("dist/main.lua")).unwrap();
    assert_eq!(header, "-- name: Test Mod\n-- description: a test\n");
    let bundle = std::fs::read_to_string(project.root().join("dist/main64.luac")).unwrap();
    assert!(bundle.contains("function require_util() return 1 end"));
    assert!(bundle.contains("local x = require_util()"));
    assert_eq!(report.compiled, vec!["main.lua", "util.lua"]);
    assert_eq!(compiler.bundled.borrow().len(), 1);
    assert_eq!(compiler.strip_flags.borrow().as_slice(), [false, false]);
}

#[test]
fn single_file_with_short_names_uses_short_bundle() {
    let project = Project::new();
    project.file("src/a.lua", "return 1\n");
    run(&project.plan(true, true, true), &FakeCompiler::default()).unwrap();
    assert_eq!(project.output_entries(), vec!["64.luac"]);
}

#[test]
fn bundle_failure_is_fatal() {
    let project = Project::new();
    project.file("src/a.lua", "return 1\n");
    let compiler = FakeCompiler {
        fail_bundle: true,
        ..Default::default()
    };
    let err = run(&project.plan(false, true, false), &compiler).unwrap_err();
    assert!(err.to_string().contains("main64.luac"));
}

#[test]
fn multi_file_build_copies_each_object() {
    let project = Project::new();
    project
        .file("src/main.lua", "-- hdr\nprint(1)\n")
        .file("src/lib/util.lua", "return {}\n")
        .file("src/Loud.LUA", "return 2\n")
        .file("src/notes.txt", "not lua");

    let report = run(&project.plan(false, false, false), &FakeCompiler::default()).unwrap();

    assert_eq!(
        project.output_entries(),
        vec!["Loud.LUAc", "lib.util.luac", "main.lua", "main.luac"]
    );
    assert_eq!(report.outputs.len(), 3);
}

#[test]
fn short_names_follow_build_order() {
    let project = Project::new();
    for i in 0..30 {
        project.file(&format!("src/m{i:02}.lua"), "return 0\n");
    }
    run(&project.plan(false, false, true), &FakeCompiler::default()).unwrap();

    let entries = project.output_entries();
    assert_eq!(entries.len(), 30);
    assert!(entries.contains(&"a.luac".to_string()));
    assert!(entries.contains(&"z.luac".to_string()));
    assert!(entries.contains(&"ad.luac".to_string()));
    let first = std::fs::read_to_string(project.root().join("dist/a.luac")).unwrap();
    assert_eq!(first, "BC[return 0\n]");
}

#[test]
fn compile_failure_is_a_warning_and_build_finishes() {
    let project = Project::new();
    project
        .file("src/a.lua", "return 1\n")
        .file("src/b.lua", "syntax error\n")
        .file("src/c.lua", "return 3\n");

    let report = run(&project.plan(false, false, true), &FakeCompiler::default()).unwrap();

    assert_eq!(report.compiled, vec!["a.lua", "c.lua"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].module, "b.lua");
    assert_eq!(report.module_count(), 3);
    // c keeps its slot in build order.
    assert_eq!(project.output_entries(), vec!["a.luac", "c.luac"]);
}

#[test]
fn flattened_name_collision_keeps_first_module() {
    let project = Project::new();
    project
        .file("src/a.b.lua", "return 'dotted'\n")
        .file("src/a/b.lua", "return 'nested'\n");
    let compiler = FakeCompiler::default();

    let report = run(&project.plan(false, true, false), &compiler).unwrap();

    assert_eq!(report.compiled, vec!["a.b.lua"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].module, "a/b.lua");
    assert!(report.warnings[0].message.contains("a.b.luac"));
    assert_eq!(*compiler.compiled.borrow(), vec!["a.b.lua"]);
    let bundle = std::fs::read_to_string(project.root().join("dist/main64.luac")).unwrap();
    assert_eq!(bundle.matches("dotted").count(), 1);
    assert!(!bundle.contains("nested"));
}

#[test]
fn flattened_name_collision_in_multi_file_build() {
    let project = Project::new();
    project
        .file("src/lib.util.lua", "return 1\n")
        .file("src/lib/util.lua", "return 2\n");

    let report = run(&project.plan(false, false, false), &FakeCompiler::default()).unwrap();

    assert_eq!(project.output_entries(), vec!["lib.util.luac"]);
    let object = std::fs::read_to_string(project.root().join("dist/lib.util.luac")).unwrap();
    assert_eq!(object, "BC[return 1\n]");
    assert_eq!(report.module_count(), 2);
}

#[test]
fn header_of_non_utf8_main_is_read_lossily() {
    let project = Project::new();
    project.file("src/main.lua", b"-- name: caf\xe9 mod\nprint(1)\n");

    let report = run(&project.plan(false, true, false), &FakeCompiler::default()).unwrap();

    assert_eq!(report.compiled, vec!["main.lua"]);
    let header = std::fs::read_to_string(project.root().join("dist/main.lua")).unwrap();
    assert!(header.starts_with("-- name: caf"));
    assert!(header.ends_with("mod\n"));
    assert!(!header.contains("print"));
}

#[test]
fn module_order_ignores_creation_order() {
    let files = ["zeta.lua", "alpha/inner.lua", "alpha.lua", "mid/x/y.lua", "b.lua"];

    let forward = Project::new();
    for f in files {
        forward.file(&format!("src/{f}"), "return 0\n");
    }
    let backward = Project::new();
    for f in files.iter().rev() {
        backward.file(&format!("src/{f}"), "return 0\n");
    }

    let c1 = FakeCompiler::default();
    let c2 = FakeCompiler::default();
    run(&forward.plan(false, true, false), &c1).unwrap();
    run(&backward.plan(false, true, false), &c2).unwrap();

    assert_eq!(*c1.compiled.borrow(), *c2.compiled.borrow());
    assert_eq!(
        *c1.compiled.borrow(),
        vec!["alpha.lua", "alpha/inner.lua", "b.lua", "mid/x/y.lua", "zeta.lua"]
    );
    let names = |c: &FakeCompiler| -> Vec<String> {
        c.bundled.borrow()[0]
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    };
    assert_eq!(names(&c1), names(&c2));
}

#[test]
fn output_is_cleared_between_builds() {
    let project = Project::new();
    project
        .file("src/a.lua", "return 1\n")
        .file("dist/stale.luac", "old")
        .file("dist/old_dir/x", "old");

    run(&project.plan(false, false, false), &FakeCompiler::default()).unwrap();
    assert_eq!(project.output_entries(), vec!["a.luac"]);
}

#[test]
fn release_build_filters_textures() {
    let project = Project::new();
    project
        .file("src/a.lua", "return 1\n")
        .file("assets/textures/a.png", "png")
        .file("assets/textures/a.tex", "tex")
        .file("assets/textures/a.txt", "txt");

    let report = run(&project.plan(true, false, false), &FakeCompiler::default()).unwrap();

    let textures = project.root().join("dist/textures");
    assert!(textures.join("a.png").is_file());
    assert!(textures.join("a.tex").is_file());
    assert!(!textures.join("a.txt").exists());
    assert_eq!(report.assets.len(), 2);
}

#[test]
fn release_build_flattens_nested_tex_files() {
    let project = Project::new();
    project
        .file("assets/textures/deep/nested/b.tex", "tex")
        .file("assets/sound/theme.ogg", "ogg")
        .file("assets/sound/raw.wav", "wav")
        .file("assets/actors/mario/model.bin", "bin");

    run(&project.plan(true, false, false), &FakeCompiler::default()).unwrap();

    let dist = project.root().join("dist");
    assert!(dist.join("textures/b.tex").is_file());
    assert!(dist.join("sound/theme.ogg").is_file());
    assert!(!dist.join("sound/raw.wav").exists());
    // only top-level actor files are shipped, but the category dir exists
    assert!(dist.join("actors").is_dir());
    assert!(!dist.join("actors/model.bin").exists());
}

#[test]
fn dev_build_copies_asset_dirs_verbatim() {
    let project = Project::new();
    project
        .file("assets/textures/a.txt", "txt")
        .file("assets/levels/castle/area.lvl", "lvl")
        .file("assets/unknown/x.bin", "bin");

    run(&project.plan(false, false, false), &FakeCompiler::default()).unwrap();

    let dist = project.root().join("dist");
    assert!(dist.join("textures/a.txt").is_file());
    assert!(dist.join("levels/castle/area.lvl").is_file());
    assert!(!dist.join("unknown").exists());
}

#[test]
fn plan_follows_manifest_settings() {
    let manifest = Manifest::parse_toml(
        r#"
[mod]
name = "plan-test"

[directories]
output = "out"

[build]
output_single_file = true
shorten_names = true
"#,
    )
    .unwrap();
    let layout = ProjectLayout::new("/proj");
    let plan = BuildPlan::new(&layout, &manifest, true);

    assert_eq!(plan.output_dir, Path::new("/proj/out"));
    assert_eq!(plan.source_dir, Path::new("/proj/src"));
    assert_eq!(plan.obj_dir, Path::new("/proj/.lubber/obj"));
    assert!(plan.single_file && plan.shorten_names && plan.release);
    assert_eq!(plan.bundle_name(), "64.luac");
}
