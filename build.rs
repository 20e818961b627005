use std::{fs, io};

// Wire types are generated into ./generated/ (not OUT_DIR) so the library can
// include them from a stable path.
fn main() -> io::Result<()> {
    fs::create_dir_all("./generated/")?;

    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path().unwrap());
    }

    tonic_build::configure()
        .out_dir("./generated/")
        .compile(&["./protos/kvstore.proto"], &["./protos/"])
}
