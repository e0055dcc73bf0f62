use std::fs;

use tsaio_dev::detect_package_root_from_cwd;

// The working directory is process-wide, so this binary holds a single test.
#[test]
fn finds_package_root_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::write(root.join("package.json"), r#"{ "name": "@tsaio/app" }"#).unwrap();
    fs::create_dir_all(root.join("src/components")).unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(root.join("src/components")).unwrap();
    let from_nested = detect_package_root_from_cwd();
    std::env::set_current_dir(&root).unwrap();
    let from_root = detect_package_root_from_cwd();
    std::env::set_current_dir(original).unwrap();

    assert_eq!(from_nested, Some(root.clone()));
    assert_eq!(from_root, Some(root));
}
