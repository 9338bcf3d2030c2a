fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use a vendored protoc when the environment doesn't provide one, so the
    // build works offline without a system protobuf-compiler install.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(path) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", path);
        }
    }
    println!("cargo:rerun-if-changed=proto/dashboard.proto");
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["proto/dashboard.proto"], &["proto"])?;
    Ok(())
}
