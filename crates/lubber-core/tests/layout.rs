use lubber_core::layout::ProjectLayout;
use lubber_core::manifest::Manifest;

#[test]
fn cache_paths_live_under_dot_lubber() {
    let layout = ProjectLayout::new("/proj");
    assert!(layout.lockfile_path().ends_with(".lubber/lubber.lock"));
    assert!(layout.obj_dir().ends_with(".lubber/obj"));
    assert!(layout
        .dependency_dir("sm64coopdx")
        .ends_with(".lubber/dependencies/sm64coopdx"));
    assert!(layout.manifest_path().ends_with("lubber.toml"));
}

#[test]
fn project_dirs_follow_manifest() {
    let layout = ProjectLayout::new("/proj");
    let manifest = Manifest::parse_toml("[directories]\nsource = \"lua\"\n").unwrap();
    assert!(layout.source_dir(&manifest).ends_with("proj/lua"));
    assert!(layout.output_dir(&manifest).ends_with("proj/dist"));
    assert!(layout.assets_dir(&manifest).ends_with("proj/assets"));
}
