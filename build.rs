//! Build script to compile the C reference kernels.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_C_IMPL").is_none() {
        return;
    }

    // A missing toolchain only disables the C variants, it never fails the build.
    let compiler = match cc::Build::new().try_get_compiler() {
        Ok(compiler) => compiler,
        Err(_) => {
            println!("cargo:warning=No C compiler found. C reference kernels disabled.");
            return;
        }
    };

    let compiler_name = if compiler.is_like_clang() {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if target_os != "macos" {
            // Vanilla Clang shares the LLVM backend with rustc, so it adds no comparison point.
            println!("cargo:warning=Vanilla Clang detected. C reference kernels disabled (requires GCC, MSVC, or Apple Clang).");
            return;
        }
        "Apple Clang"
    } else if compiler.is_like_gnu() {
        "GCC"
    } else if compiler.is_like_msvc() {
        "MSVC"
    } else {
        println!("cargo:warning=C compiler is not compatible (needs GCC, Apple Clang, or MSVC). C reference kernels disabled.");
        return;
    };

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded_rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    let is_rust_native =
        rustflags.contains("target-cpu=native") || encoded_rustflags.contains("target-cpu=native");

    let mut build = cc::Build::new();
    let mut found = false;

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()),
        Err(_) => return,
    };
    for file in c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
        found = true;
    }

    if !found {
        return;
    }

    // Reference kernels keep strict left-to-right summation, so no -ffast-math.
    build.opt_level(3);

    if is_rust_native {
        build.flag_if_supported("-march=native");
        println!("cargo:warning=Detected Rust target-cpu=native. Enabling -march=native for C compilation.");
    }

    build.compile("micro_blas_c");

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
