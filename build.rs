fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // The libvips-rs bindings crate ships no build script of its own, so the
    // service has to tell cargo where the native library lives.
    //
    // Linux and macOS: the system package (libvips-dev / brew vips) is enough.
    // Windows: extract vips-dev-w64 to <crate-root>/vendor/libvips-native or
    // point VIPS_DIR at an existing installation.
    link_libvips();
}

fn link_libvips() {
    println!("cargo:rerun-if-env-changed=VIPS_DIR");

    let vips_dir = std::env::var("VIPS_DIR").unwrap_or_else(|_| {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("vendor")
            .join("libvips-native")
            .to_string_lossy()
            .to_string()
    });

    let lib_dir = std::path::Path::new(&vips_dir).join("lib");

    if cfg!(target_os = "windows") {
        if lib_dir.exists() {
            // rustc-link-arg reaches both the lib test harness and the binary,
            // rustc-link-lib alone does not on MSVC.
            let link_arg = |name: &str| {
                println!("cargo:rustc-link-arg={}", lib_dir.join(name).display());
            };
            link_arg("libvips.lib");
            link_arg("libglib-2.0.lib");
            link_arg("libgobject-2.0.lib");
        } else {
            println!("cargo:warning=libvips directory not found at '{vips_dir}'.");
            println!("cargo:warning=Set VIPS_DIR to a vips-dev-w64 installation.");
        }
    } else {
        if lib_dir.exists() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        }
        println!("cargo:rustc-link-lib=dylib=vips");
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
    }
}
