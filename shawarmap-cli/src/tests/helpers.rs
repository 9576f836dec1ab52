//! Test helpers shared by the CLI unit and behaviour tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

/// A temporary directory addressed with UTF-8 paths.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Names of the places in text output, in listing order.
pub(super) fn listed_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let (rank, rest) = line.trim_start().split_once(". ")?;
            rank.parse::<usize>().ok()?;
            rest.split("  ").next().map(str::to_owned)
        })
        .collect()
}

/// A one-place catalogue in JSON form.
pub(super) const FALAFEL_CART: &str = r#"[
    {
        "id": "cart",
        "name": "Falafel Cart",
        "lat": 32.0700,
        "lng": 34.7700,
        "address": "Port of Jaffa",
        "rating": 4.1,
        "reviews": 12,
        "price_level": 1,
        "tags": ["vegan"]
    }
]"#;
