use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Build CXX bridge
    cxx_build::bridge("src/lib.rs")
        .flag_if_supported("-std=c++14")
        .compile("stackblur-cpp");

    println!("cargo:rerun-if-changed=src/lib.rs");

    generate_version_header();
}

fn generate_version_header() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let mut parts = version.split(['.', '-']);
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().unwrap_or("0");
    let patch = parts.next().unwrap_or("0");

    let version_hpp = format!(
        r#"#pragma once

// Auto-generated from Cargo.toml version
// Do not edit manually!

#define STACKBLUR_VERSION "{version}"
#define STACKBLUR_VERSION_MAJOR {major}
#define STACKBLUR_VERSION_MINOR {minor}
#define STACKBLUR_VERSION_PATCH {patch}
"#
    );

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        println!("cargo:warning=OUT_DIR is not set, skipping version.hpp");
        return;
    };

    if let Err(e) = fs::write(out_dir.join("version.hpp"), &version_hpp) {
        println!("cargo:warning=Could not write version.hpp: {}", e);
    }

    println!("cargo:rerun-if-changed=Cargo.toml");
}
