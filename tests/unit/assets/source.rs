use super::*;

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b\\c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("img//x.png").unwrap(), "img/x.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn memory_source_hits_and_misses() {
    let mut src = MemoryImageSource::new();
    src.insert("crop-1", vec![1, 2, 3]);
    assert!(src.contains("crop-1"));
    assert_eq!(src.load_bytes("crop-1").unwrap(), vec![1, 2, 3]);
    let err = src.load_bytes("crop-2").unwrap_err();
    assert!(matches!(err, MosaicoError::Decode(_)));
}

#[test]
fn dir_source_reads_relative_files() {
    let root = std::path::PathBuf::from("target/unit_dir_source");
    std::fs::create_dir_all(root.join("imgs")).unwrap();
    std::fs::write(root.join("imgs/a.bin"), b"abc").unwrap();

    let src = DirImageSource::new(&root);
    assert_eq!(src.load_bytes("imgs/a.bin").unwrap(), b"abc");
    assert!(src.load_bytes("imgs/missing.bin").is_err());
    assert!(src.load_bytes("../escape.bin").is_err());
}
