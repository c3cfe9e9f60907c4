//! Build script: point the linker at the esmini library when the native
//! backend is enabled.

use std::env;

const LIB_DIR_ENV: &str = "ESMINI_LIB_DIR";

fn main() {
    println!("cargo:rerun-if-env-changed={LIB_DIR_ENV}");
    if env::var_os("CARGO_FEATURE_ESMINI").is_none() {
        return;
    }
    match env::var(LIB_DIR_ENV) {
        Ok(dir) => println!("cargo:rustc-link-search=native={dir}"),
        Err(_) => println!(
            "cargo:warning={LIB_DIR_ENV} is not set; relying on the system linker path \
             to find libesminiLib"
        ),
    }
}
