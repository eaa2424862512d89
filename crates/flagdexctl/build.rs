// Build script for flagdexctl - bakes the version shown by `--version` and `status`

fn main() {
    // FLAGDEX_VERSION set in the environment wins over the workspace version
    let version =
        std::env::var("FLAGDEX_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=FLAGDEX_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=FLAGDEX_VERSION");
}
