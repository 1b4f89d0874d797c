fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the bundled protoc unless the environment provides one
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    // Generate gRPC code from proto files
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/sso.proto"], &["../proto"])?;

    println!("cargo:rerun-if-changed=../proto/sso.proto");
    println!("cargo:rerun-if-changed=migrations");

    Ok(())
}
